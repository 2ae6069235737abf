//! Audit log models. The backend writes the log; the client only queries it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: i64,
    pub actor: Option<String>,
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub message: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for `/admin/audit`. Unset fields are omitted from the query.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub actor: Option<String>,
    pub entity_type: Option<String>,
    pub action: Option<String>,
    pub limit: Option<u32>,
}
