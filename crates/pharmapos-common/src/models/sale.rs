//! Sale models — checkout results and the reporting shapes built on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a sale attempt. The backend records rejected attempts too, so
/// the sales screen can show why a checkout line failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    Valid,
    RejectedExpired,
    RejectedOutOfStock,
    /// Anything a newer backend starts emitting.
    #[serde(other)]
    Unknown,
}

impl SaleStatus {
    /// Wire value, as used in `/sales/status/{status}` paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::RejectedExpired => "REJECTED_EXPIRED",
            Self::RejectedOutOfStock => "REJECTED_OUT_OF_STOCK",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// A recorded sale (or rejected sale attempt).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(alias = "saleId")]
    pub id: i64,

    pub medicine_id: Option<i64>,

    #[serde(alias = "name")]
    pub medicine_name: Option<String>,

    #[serde(alias = "quantity", alias = "qty")]
    pub quantity_sold: i64,

    #[serde(alias = "total")]
    pub total_price: f64,

    /// Server-computed profit for this sale; absent on rejected attempts.
    pub profit: Option<f64>,

    pub status: SaleStatus,

    #[serde(alias = "soldAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Checkout payload — one line of the cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub medicine_id: i64,
    pub quantity: i64,
}

/// One month of aggregated sales, from `/sales/summary/monthly`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlySalesSummary {
    /// `"YYYY-MM"`.
    pub month: Option<String>,
    pub total_revenue: f64,
    pub total_sales: i64,
    pub total_profit: Option<f64>,
}

/// Aggregated profit over a date range.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfitSummary {
    #[serde(alias = "profit")]
    pub total_profit: f64,
    pub total_revenue: Option<f64>,
    pub total_cost: Option<f64>,
}

/// One bucket of the profit time series.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfitPoint {
    #[serde(alias = "label", alias = "month")]
    pub period: Option<String>,
    #[serde(alias = "value")]
    pub profit: f64,
    pub revenue: Option<f64>,
}

/// A top-seller row from `/sales/profit/top`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopProfitMedicine {
    pub medicine_id: Option<i64>,
    #[serde(alias = "medicineName")]
    pub name: Option<String>,
    pub profit: f64,
    pub quantity_sold: Option<i64>,
    pub revenue: Option<f64>,
}
