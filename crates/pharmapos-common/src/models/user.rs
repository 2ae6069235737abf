//! Account models for the admin users screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pharmacy staff account as returned by `/admin/users`.
///
/// `role` stays a plain string: the screens uppercase and compare it, and a
/// typed enum here would reject accounts created by newer backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: i64,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Payload for creating a staff account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdminUser {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    pub role: String,
}
