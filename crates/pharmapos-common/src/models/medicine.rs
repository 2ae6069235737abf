//! Medicine model — the inventory backbone.
//!
//! Stock levels, pricing, and expiry all hang off this record. The backend
//! owns stock decrement and expiry rejection; the client only reads and
//! submits these fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A medicine in the pharmacy inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: i64,

    pub name: String,

    pub category: Option<String>,

    pub manufacturer: Option<String>,

    /// Batch number — unique per delivery, used for batch-level updates.
    #[serde(alias = "batch")]
    pub batch_number: Option<String>,

    /// Expiry date; sales from expired batches are rejected server-side.
    #[serde(alias = "expiry", alias = "expiration")]
    pub expiry_date: Option<NaiveDate>,

    /// Selling price per unit.
    #[serde(alias = "unitPrice")]
    pub price: f64,

    /// Acquisition cost per unit; basis for profit reporting.
    #[serde(alias = "cost", alias = "purchasePrice")]
    pub cost_price: Option<f64>,

    /// Units on hand.
    #[serde(alias = "stock", alias = "qty")]
    pub quantity: i64,

    /// Stock level that triggers a low-stock alert.
    pub reorder_level: Option<i64>,

    pub description: Option<String>,
}

/// Payload for creating or updating a medicine.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub price: f64,
    pub cost_price: f64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
