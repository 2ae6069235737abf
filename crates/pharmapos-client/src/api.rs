//! Typed endpoint surface over the gateway.
//!
//! One method per backend operation, grouped the way the screens consume
//! them. Everything funnels through [`PosClient::request`], so auth,
//! refresh, and failure classification apply uniformly.

use chrono::NaiveDate;
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use pharmapos_common::models::{
    AdminUser, AuditLog, AuditQuery, DashboardSummary, Medicine, MonthlySalesSummary, NewAdminUser,
    NewMedicine, NewSale, NewStockIn, NewSupplier, ProfitPoint, ProfitSummary, Sale, SaleStatus,
    StockIn, Supplier, TopProfitMedicine,
};

use crate::client::PosClient;
use crate::error::{PosError, Result};
use crate::session::LogoutReason;

/// Login/register response. The token shape has varied across backend
/// revisions, so every observed spelling is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default, alias = "accessToken", alias = "token")]
    pub access_token: Option<String>,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthUser {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
}

/// Role entries have been sent both as plain strings and as objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoleEntry {
    Named { name: String },
    Plain(String),
}

impl AuthResponse {
    /// The role under whichever key this backend revision put it.
    pub fn resolved_role(&self) -> Option<String> {
        self.role.clone().or_else(|| {
            let user = self.user.as_ref()?;
            user.role.clone().or_else(|| {
                user.roles.first().map(|entry| match entry {
                    RoleEntry::Named { name } => name.clone(),
                    RoleEntry::Plain(role) => role.clone(),
                })
            })
        })
    }
}

/// Accept both bare arrays and the `data`/`items`/`content` envelopes the
/// backend has used across revisions. Unrecognized shapes yield an empty
/// list rather than an error — matching what the screens always did.
fn unwrap_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => ["data", "items", "content"]
            .iter()
            .find_map(|key| map.remove(*key))
            .and_then(|v| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(PosError::Json))
        .collect()
}

fn date_range_query(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<(String, String)> {
    let mut query = Vec::new();
    if let Some(start) = start {
        query.push(("start".to_owned(), start.to_string()));
    }
    if let Some(end) = end {
        query.push(("end".to_owned(), end.to_string()));
    }
    query
}

impl PosClient {
    // ── Auth ──────────────────────────────────────────────────────────────

    /// Sign in and persist the returned credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let auth: AuthResponse = self
            .request(
                Method::POST,
                "/auth/login",
                Vec::new(),
                Some(json!({ "username": username, "password": password })),
            )
            .await?;

        let Some(token) = auth.access_token.clone() else {
            return Err(PosError::Other("login response carried no token".into()));
        };
        self.session()
            .set_credentials(token, auth.refresh_token.clone(), auth.resolved_role());
        Ok(auth)
    }

    /// Create an account. Credentials are persisted only when the backend
    /// returns a token immediately (some deployments require confirmation
    /// first, in which case the response carries none).
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let auth: AuthResponse = self
            .request(
                Method::POST,
                "/auth/register",
                Vec::new(),
                Some(json!({
                    "name": name,
                    "email": email,
                    "username": email,
                    "password": password,
                })),
            )
            .await?;

        if let Some(token) = auth.access_token.clone() {
            self.session()
                .set_credentials(token, auth.refresh_token.clone(), auth.resolved_role());
        }
        Ok(auth)
    }

    /// Explicit user sign-out.
    pub fn logout(&self) {
        self.force_logout(LogoutReason::Manual);
    }

    // ── Medicines ─────────────────────────────────────────────────────────

    pub async fn medicines(&self) -> Result<Vec<Medicine>> {
        let value: Value = self.request(Method::GET, "/medicines", Vec::new(), None).await?;
        unwrap_list(value)
    }

    pub async fn create_medicine(&self, medicine: &NewMedicine) -> Result<Medicine> {
        self.request(
            Method::POST,
            "/medicines",
            Vec::new(),
            Some(serde_json::to_value(medicine)?),
        )
        .await
    }

    pub async fn update_medicine(&self, id: i64, medicine: &NewMedicine) -> Result<Medicine> {
        self.request(
            Method::PUT,
            &format!("/medicines/{id}"),
            Vec::new(),
            Some(serde_json::to_value(medicine)?),
        )
        .await
    }

    /// Update a medicine addressed by batch number (CSV import path).
    pub async fn update_medicine_by_batch(
        &self,
        batch_number: &str,
        medicine: &NewMedicine,
    ) -> Result<Medicine> {
        self.request(
            Method::PUT,
            &format!("/medicines/batch/{batch_number}"),
            Vec::new(),
            Some(serde_json::to_value(medicine)?),
        )
        .await
    }

    pub async fn delete_medicine(&self, id: i64) -> Result<()> {
        let _: Value = self
            .request(Method::DELETE, &format!("/medicines/{id}"), Vec::new(), None)
            .await?;
        Ok(())
    }

    /// The stock level below which the dashboard raises a low-stock alert.
    pub async fn low_stock_threshold(&self) -> Result<i64> {
        let value: Value = self
            .request(Method::GET, "/medicines/threshold", Vec::new(), None)
            .await?;
        value
            .as_i64()
            .or_else(|| value.get("threshold").and_then(Value::as_i64))
            .ok_or_else(|| PosError::Other("unrecognized threshold response".into()))
    }

    // ── Sales ─────────────────────────────────────────────────────────────

    pub async fn sales_by_status(&self, status: SaleStatus) -> Result<Vec<Sale>> {
        let value: Value = self
            .request(
                Method::GET,
                &format!("/sales/status/{}", status.as_str()),
                Vec::new(),
                None,
            )
            .await?;
        unwrap_list(value)
    }

    /// All sales. The backend has no "all" endpoint; the three status
    /// queries go out concurrently and are concatenated, like the sales
    /// screen always did.
    pub async fn sales(&self) -> Result<Vec<Sale>> {
        let (valid, expired, out_of_stock) = tokio::join!(
            self.sales_by_status(SaleStatus::Valid),
            self.sales_by_status(SaleStatus::RejectedExpired),
            self.sales_by_status(SaleStatus::RejectedOutOfStock),
        );
        let mut all = valid?;
        all.extend(expired?);
        all.extend(out_of_stock?);
        Ok(all)
    }

    /// Record one checkout line. Pricing, stock decrement, and expiry
    /// rejection happen server-side; the result says what the backend did.
    pub async fn create_sale(&self, sale: &NewSale) -> Result<Sale> {
        self.request(Method::POST, "/sales", Vec::new(), Some(serde_json::to_value(sale)?))
            .await
    }

    pub async fn monthly_sales_summary(
        &self,
        year: i32,
        month: u32,
    ) -> Result<MonthlySalesSummary> {
        self.request(
            Method::GET,
            "/sales/summary/monthly",
            vec![
                ("year".to_owned(), year.to_string()),
                ("month".to_owned(), month.to_string()),
            ],
            None,
        )
        .await
    }

    /// `count` months of summaries ending at the given month.
    pub async fn monthly_sales_range(
        &self,
        year: i32,
        month: u32,
        count: u32,
    ) -> Result<Vec<MonthlySalesSummary>> {
        let value: Value = self
            .request(
                Method::GET,
                "/sales/summary/monthly/range",
                vec![
                    ("year".to_owned(), year.to_string()),
                    ("month".to_owned(), month.to_string()),
                    ("count".to_owned(), count.to_string()),
                ],
                None,
            )
            .await?;
        unwrap_list(value)
    }

    pub async fn profit_summary(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<ProfitSummary> {
        self.request(Method::GET, "/sales/profit/summary", date_range_query(start, end), None)
            .await
    }

    pub async fn profit_series(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        period: Option<&str>,
    ) -> Result<Vec<ProfitPoint>> {
        let mut query = date_range_query(start, end);
        if let Some(period) = period {
            query.push(("period".to_owned(), period.to_owned()));
        }
        let value: Value =
            self.request(Method::GET, "/sales/profit/series", query, None).await?;
        unwrap_list(value)
    }

    pub async fn top_profit_medicines(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        limit: u32,
    ) -> Result<Vec<TopProfitMedicine>> {
        let mut query = date_range_query(start, end);
        query.push(("limit".to_owned(), limit.to_string()));
        let value: Value = self.request(Method::GET, "/sales/profit/top", query, None).await?;
        unwrap_list(value)
    }

    // ── Suppliers ─────────────────────────────────────────────────────────

    pub async fn suppliers(&self) -> Result<Vec<Supplier>> {
        let value: Value = self.request(Method::GET, "/suppliers", Vec::new(), None).await?;
        unwrap_list(value)
    }

    pub async fn create_supplier(&self, supplier: &NewSupplier) -> Result<Supplier> {
        self.request(
            Method::POST,
            "/suppliers",
            Vec::new(),
            Some(serde_json::to_value(supplier)?),
        )
        .await
    }

    pub async fn update_supplier(&self, id: i64, supplier: &NewSupplier) -> Result<Supplier> {
        self.request(
            Method::PUT,
            &format!("/suppliers/{id}"),
            Vec::new(),
            Some(serde_json::to_value(supplier)?),
        )
        .await
    }

    pub async fn delete_supplier(&self, id: i64) -> Result<()> {
        let _: Value = self
            .request(Method::DELETE, &format!("/suppliers/{id}"), Vec::new(), None)
            .await?;
        Ok(())
    }

    // ── Stock-ins ─────────────────────────────────────────────────────────

    pub async fn stock_ins(&self) -> Result<Vec<StockIn>> {
        let value: Value = self.request(Method::GET, "/stock-ins", Vec::new(), None).await?;
        unwrap_list(value)
    }

    pub async fn create_stock_in(&self, stock_in: &NewStockIn) -> Result<StockIn> {
        self.request(
            Method::POST,
            "/stock-ins",
            Vec::new(),
            Some(serde_json::to_value(stock_in)?),
        )
        .await
    }

    // ── Admin ─────────────────────────────────────────────────────────────

    pub async fn admin_users(
        &self,
        role: Option<&str>,
        active: Option<bool>,
    ) -> Result<Vec<AdminUser>> {
        let mut query = Vec::new();
        if let Some(role) = role {
            query.push(("role".to_owned(), role.to_owned()));
        }
        if let Some(active) = active {
            query.push(("active".to_owned(), active.to_string()));
        }
        let value: Value = self.request(Method::GET, "/admin/users", query, None).await?;
        unwrap_list(value)
    }

    pub async fn create_admin_user(&self, user: &NewAdminUser) -> Result<AdminUser> {
        self.request(
            Method::POST,
            "/admin/users",
            Vec::new(),
            Some(serde_json::to_value(user)?),
        )
        .await
    }

    pub async fn update_admin_user_role(&self, id: i64, role: &str) -> Result<AdminUser> {
        self.request(
            Method::PATCH,
            &format!("/admin/users/{id}/role"),
            Vec::new(),
            Some(json!({ "role": role })),
        )
        .await
    }

    pub async fn update_admin_user_status(&self, id: i64, active: bool) -> Result<AdminUser> {
        self.request(
            Method::PATCH,
            &format!("/admin/users/{id}/status"),
            Vec::new(),
            Some(json!({ "active": active })),
        )
        .await
    }

    pub async fn reset_admin_user_password(&self, id: i64, password: &str) -> Result<AdminUser> {
        self.request(
            Method::PATCH,
            &format!("/admin/users/{id}/password"),
            Vec::new(),
            Some(json!({ "password": password })),
        )
        .await
    }

    pub async fn audit_logs(&self, filters: &AuditQuery) -> Result<Vec<AuditLog>> {
        let mut query = Vec::new();
        if let Some(actor) = &filters.actor {
            query.push(("actor".to_owned(), actor.clone()));
        }
        if let Some(entity_type) = &filters.entity_type {
            query.push(("entityType".to_owned(), entity_type.clone()));
        }
        if let Some(action) = &filters.action {
            query.push(("action".to_owned(), action.clone()));
        }
        if let Some(limit) = filters.limit {
            query.push(("limit".to_owned(), limit.to_string()));
        }
        let value: Value = self.request(Method::GET, "/admin/audit", query, None).await?;
        unwrap_list(value)
    }

    pub async fn admin_dashboard(&self) -> Result<DashboardSummary> {
        self.request(Method::GET, "/admin/dashboard", Vec::new(), None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_list_accepts_every_known_envelope() {
        let bare = json!([{"id": 1, "name": "A", "email": null, "phone": null, "address": null}]);
        let enveloped = json!({ "content": bare.clone() });
        let data = json!({ "data": bare.clone() });

        for value in [bare, enveloped, data] {
            let suppliers: Vec<Supplier> = unwrap_list(value).unwrap();
            assert_eq!(suppliers.len(), 1);
            assert_eq!(suppliers[0].name, "A");
        }
    }

    #[test]
    fn unwrap_list_yields_empty_on_unknown_shapes() {
        let suppliers: Vec<Supplier> = unwrap_list(json!({ "unexpected": true })).unwrap();
        assert!(suppliers.is_empty());
        let suppliers: Vec<Supplier> = unwrap_list(Value::Null).unwrap();
        assert!(suppliers.is_empty());
    }

    #[test]
    fn auth_response_accepts_all_token_spellings() {
        let a: AuthResponse = serde_json::from_str(r#"{"token":"t","role":"ADMIN"}"#).unwrap();
        assert_eq!(a.access_token.as_deref(), Some("t"));

        let b: AuthResponse =
            serde_json::from_str(r#"{"accessToken":"t","refresh_token":"r"}"#).unwrap();
        assert_eq!(b.access_token.as_deref(), Some("t"));
        assert_eq!(b.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn role_is_resolved_from_nested_user_shapes() {
        let flat: AuthResponse =
            serde_json::from_str(r#"{"token":"t","role":"ADMIN"}"#).unwrap();
        assert_eq!(flat.resolved_role().as_deref(), Some("ADMIN"));

        let nested: AuthResponse =
            serde_json::from_str(r#"{"token":"t","user":{"role":"CASHIER"}}"#).unwrap();
        assert_eq!(nested.resolved_role().as_deref(), Some("CASHIER"));

        let role_objects: AuthResponse =
            serde_json::from_str(r#"{"token":"t","user":{"roles":[{"name":"ADMIN"}]}}"#).unwrap();
        assert_eq!(role_objects.resolved_role().as_deref(), Some("ADMIN"));

        let role_strings: AuthResponse =
            serde_json::from_str(r#"{"token":"t","user":{"roles":["CASHIER"]}}"#).unwrap();
        assert_eq!(role_strings.resolved_role().as_deref(), Some("CASHIER"));
    }

    #[test]
    fn date_range_query_skips_unset_bounds() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            date_range_query(Some(from), None),
            vec![("start".to_owned(), "2024-03-01".to_owned())]
        );
        assert!(date_range_query(None, None).is_empty());
    }
}
