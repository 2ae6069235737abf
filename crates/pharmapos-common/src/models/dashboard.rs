//! Admin dashboard summary.

use serde::Deserialize;

/// Headline numbers from `/admin/dashboard`. Everything defaults to zero so
/// a partial response from an older backend still renders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    pub total_medicines: i64,
    pub total_sales: i64,
    pub total_users: i64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub low_stock: Option<i64>,
    pub out_of_stock: Option<i64>,
    pub today_revenue: Option<f64>,
    pub today_profit: Option<f64>,
}
