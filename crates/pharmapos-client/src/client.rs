//! The authenticated request gateway.
//!
//! Every endpoint method in [`crate::api`] funnels through
//! [`PosClient::request`], which owns the credential lifecycle for a single
//! request:
//!
//! - auth endpoints (`/auth/...`) pass through untouched, no token attached;
//! - a missing access token rejects locally and tears the session down;
//! - an expired access token is refreshed *before* the request is sent;
//! - a 401 answer triggers one refresh-and-retry, never more;
//! - 429 / connectivity / 5xx failures are classified and surfaced on the
//!   notification channel before propagating to the caller.
//!
//! Refreshing is single-flight: however many requests hit an expired token
//! in the same window, exactly one `POST /auth/refresh` goes out and every
//! waiter observes the same outcome.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info, warn};
use url::Url;

use pharmapos_common::auth;
use pharmapos_common::config::AppConfig;

use crate::error::{PosError, Result};
use crate::notify::{Notice, NoticeLevel, Notifier};
use crate::session::{LogoutReason, Navigator, SessionStore};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};

/// Path prefix of the authentication endpoints. Requests under it carry no
/// bearer token and never participate in 401 recovery.
const AUTH_PREFIX: &str = "/auth";

/// The PharmaPOS API client.
pub struct PosClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Notifier,
    base_url: String,
    /// Holding this marks a refresh in flight; see [`Self::refresh_access_token`].
    refresh_gate: Mutex<()>,
}

impl PosClient {
    /// Client over the production reqwest transport with a default timeout.
    pub fn new(
        base_url: &str,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(30))?;
        Self::with_transport(Arc::new(transport), base_url, session, navigator)
    }

    /// Client configured from [`AppConfig`].
    pub fn from_config(
        config: &AppConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.api.timeout_secs))?;
        Self::with_transport(Arc::new(transport), &config.api.base_url, session, navigator)
    }

    /// Client over an arbitrary transport — the seam tests use.
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        base_url: &str,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            transport,
            session,
            navigator,
            notifier: Notifier::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            refresh_gate: Mutex::new(()),
        })
    }

    /// Notification feed for the UI shell. Dropping the receiver unsubscribes.
    pub fn notifications(&self) -> broadcast::Receiver<Notice> {
        self.notifier.subscribe()
    }

    /// The credential store this client reads and maintains.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ── Session teardown ──────────────────────────────────────────────────

    /// Tear down the session: clear credentials, record a one-shot reason
    /// for the login screen, and bring up the login view — unless it is
    /// already showing, so repeated calls cannot loop.
    pub fn force_logout(&self, reason: LogoutReason) {
        self.session.clear();
        self.session.set_logout_reason(reason);
        if !self.navigator.is_login_view() {
            info!("ending session ({})", reason.code());
            self.navigator.show_login();
        }
    }

    // ── Request pipeline ──────────────────────────────────────────────────

    /// Issue an authenticated request and deserialize the JSON answer.
    ///
    /// This is the generic entry point every typed endpoint method uses;
    /// it is public so consumers can reach endpoints the typed surface
    /// doesn't cover yet.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<T> {
        self.request_raw(method, path, query, body).await?.json()
    }

    async fn request_raw(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);

        if path.starts_with(AUTH_PREFIX) {
            let request = ApiRequest { method, url, query, body, bearer: None };
            let response = self.dispatch(request).await?;
            if response.status == 401 {
                // No retry on the auth endpoints themselves: a 401 here is final.
                self.force_logout(LogoutReason::Unauthorized);
            }
            return self.classify(response);
        }

        // Pre-send: attach a live token, refreshing an expired one first.
        let bearer = match self.session.access_token() {
            None => {
                self.force_logout(LogoutReason::Unauthorized);
                return Err(PosError::Unauthenticated);
            }
            Some(token) if !auth::is_expired(&token, Utc::now().timestamp()) => token,
            Some(token) => self.refresh_access_token(&token).await?,
        };

        let request =
            ApiRequest { method, url, query, body, bearer: Some(bearer.clone()) };
        let first = self.dispatch(request.clone()).await?;
        if first.status != 401 {
            return self.classify(first);
        }

        // Post-receive: one refresh-and-retry. The retried request is a
        // fresh dispatch with an explicit new bearer, not a mutation of the
        // original; a second 401 ends the session.
        warn!("unauthorized response from {path}, refreshing and retrying once");
        let fresh = self.refresh_access_token(&bearer).await?;
        let second = self.dispatch(ApiRequest { bearer: Some(fresh), ..request }).await?;
        if second.status == 401 {
            self.force_logout(LogoutReason::Unauthorized);
        }
        self.classify(second)
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!("dispatching {} {}", request.method, request.url);
        self.transport.execute(request).await.map_err(|e| {
            self.notifier.error("Network error — check your connection.");
            PosError::Network(e.to_string())
        })
    }

    /// Turn a received response into the caller-facing result, emitting
    /// notifications for the user-visible failure classes.
    fn classify(&self, response: ApiResponse) -> Result<ApiResponse> {
        if response.is_success() {
            return Ok(response);
        }
        let status = response.status;
        match status {
            429 => {
                let hint = response.retry_after_secs;
                let message = match hint {
                    Some(secs) => format!("Too many requests — retry in {secs}s."),
                    None => "Too many requests — please slow down.".to_owned(),
                };
                self.notifier.publish(Notice {
                    level: NoticeLevel::Warning,
                    message,
                    retry_after_secs: hint,
                });
                Err(PosError::RateLimited { retry_after_secs: hint })
            }
            500..=599 => {
                self.notifier.error(format!("Server error ({status}) — please try again."));
                Err(PosError::Api { status, message: response.error_message() })
            }
            _ => Err(PosError::Api { status, message: response.error_message() }),
        }
    }

    // ── Refresh coordinator ───────────────────────────────────────────────

    /// Exchange the stored refresh token for a new access token.
    ///
    /// `observed` is the token the caller just saw fail (expired locally or
    /// rejected by the server). Single-flight: the gate serializes attempts,
    /// and a waiter that acquires it after someone else already swapped the
    /// observed token for a live one returns that token without touching
    /// the network. On any failure the session is torn down before the
    /// error propagates, so queued waiters fast-fail instead of refreshing
    /// again.
    pub(crate) async fn refresh_access_token(&self, observed: &str) -> Result<String> {
        let _flight = self.refresh_gate.lock().await;

        if let Some(current) = self.session.access_token() {
            if current != observed && !auth::is_expired(&current, Utc::now().timestamp()) {
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            self.force_logout(LogoutReason::Unauthorized);
            return Err(PosError::Unauthenticated);
        };

        debug!("access token expired, refreshing");
        let request = ApiRequest {
            method: Method::POST,
            url: format!("{}{AUTH_PREFIX}/refresh", self.base_url),
            query: Vec::new(),
            body: Some(serde_json::json!({ "refreshToken": refresh_token })),
            bearer: None,
        };

        let response = match self.transport.execute(request).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                error!("refresh rejected by server (HTTP {})", response.status);
                self.force_logout(LogoutReason::Unauthorized);
                return Err(PosError::Api {
                    status: response.status,
                    message: response.error_message(),
                });
            }
            Err(e) => {
                error!("refresh request failed: {e}");
                self.force_logout(LogoutReason::Unauthorized);
                return Err(PosError::Network(e.to_string()));
            }
        };

        let refreshed = match response.json::<RefreshedTokens>() {
            Ok(tokens) => tokens,
            Err(e) => {
                error!("unreadable refresh response: {e}");
                self.force_logout(LogoutReason::Unauthorized);
                return Err(e);
            }
        };

        // Rotation is optional: without a replacement the old refresh token
        // stays. The backend is trusted not to invalidate one silently.
        self.session.set_credentials(
            refreshed.access_token.clone(),
            refreshed.refresh_token,
            None,
        );
        info!("access token refreshed");
        Ok(refreshed.access_token)
    }
}

/// Refresh response body. The backend has emitted both spellings of both
/// fields across revisions.
#[derive(Debug, Deserialize)]
struct RefreshedTokens {
    #[serde(alias = "accessToken", alias = "token")]
    access_token: String,
    #[serde(default, alias = "refreshToken")]
    refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CredentialStorage, MemoryStorage, StoredCredentials};
    use crate::transport::TransportError;
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ── Test doubles ─────────────────────────────────────────────────────

    type Handler =
        Box<dyn Fn(&ApiRequest) -> std::result::Result<ApiResponse, TransportError> + Send + Sync>;

    /// Scripted transport. Records every request; yields once per call so
    /// concurrent requests genuinely interleave on the current-thread
    /// test runtime.
    struct FakeTransport {
        requests: StdMutex<Vec<ApiRequest>>,
        handler: Handler,
    }

    impl FakeTransport {
        fn new(
            handler: impl Fn(&ApiRequest) -> std::result::Result<ApiResponse, TransportError>
            + Send
            + Sync
            + 'static,
        ) -> Arc<Self> {
            Arc::new(Self { requests: StdMutex::new(Vec::new()), handler: Box::new(handler) })
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn refresh_calls(&self) -> Vec<ApiRequest> {
            self.requests()
                .into_iter()
                .filter(|r| r.url.ends_with("/auth/refresh"))
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl HttpTransport for FakeTransport {
        async fn execute(
            &self,
            request: ApiRequest,
        ) -> std::result::Result<ApiResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            tokio::task::yield_now().await;
            (self.handler)(&request)
        }
    }

    struct FakeNavigator {
        on_login: StdMutex<bool>,
        navigations: AtomicUsize,
    }

    impl FakeNavigator {
        fn new(on_login: bool) -> Arc<Self> {
            Arc::new(Self { on_login: StdMutex::new(on_login), navigations: AtomicUsize::new(0) })
        }

        fn navigation_count(&self) -> usize {
            self.navigations.load(Ordering::SeqCst)
        }
    }

    impl Navigator for FakeNavigator {
        fn is_login_view(&self) -> bool {
            *self.on_login.lock().unwrap()
        }

        fn show_login(&self) {
            self.navigations.fetch_add(1, Ordering::SeqCst);
            *self.on_login.lock().unwrap() = true;
        }
    }

    fn token_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{exp}}}"#).as_bytes());
        format!("{header}.{payload}.sig")
    }

    /// Every call yields a distinct token: tests that hand out a "stale"
    /// and a "fresh" one must be able to tell them apart.
    fn live_token() -> String {
        static BUMP: AtomicUsize = AtomicUsize::new(0);
        let bump = BUMP.fetch_add(1, Ordering::SeqCst) as i64;
        token_with_exp(Utc::now().timestamp() + 3600 + bump)
    }

    fn expired_token() -> String {
        token_with_exp(Utc::now().timestamp() - 3600)
    }

    fn session_with(access: Option<String>, refresh: Option<String>) -> Arc<SessionStore> {
        let storage = MemoryStorage::default();
        if access.is_some() || refresh.is_some() {
            storage.persist(&StoredCredentials {
                access_token: access,
                refresh_token: refresh,
                role: Some("CASHIER".into()),
            });
        }
        Arc::new(SessionStore::new(Box::new(storage)))
    }

    fn ok_json(value: Value) -> ApiResponse {
        ApiResponse {
            status: 200,
            retry_after_secs: None,
            body: serde_json::to_vec(&value).unwrap(),
        }
    }

    fn status(code: u16) -> ApiResponse {
        ApiResponse { status: code, retry_after_secs: None, body: Vec::new() }
    }

    fn client(
        transport: Arc<FakeTransport>,
        session: Arc<SessionStore>,
        navigator: Arc<FakeNavigator>,
    ) -> PosClient {
        PosClient::with_transport(transport, "http://test.local/api", session, navigator).unwrap()
    }

    // ── Single-flight refresh ────────────────────────────────────────────

    #[tokio::test]
    async fn concurrent_requests_share_one_refresh() {
        let fresh = live_token();
        let fresh_for_handler = fresh.clone();
        let transport = FakeTransport::new(move |req| {
            if req.url.ends_with("/auth/refresh") {
                Ok(ok_json(serde_json::json!({ "token": fresh_for_handler })))
            } else {
                Ok(ok_json(serde_json::json!([])))
            }
        });
        let session = session_with(Some(expired_token()), Some("R1".into()));
        let nav = FakeNavigator::new(false);
        let client = client(transport.clone(), session.clone(), nav);

        let (a, b) = tokio::join!(client.medicines(), client.medicines());
        assert!(a.is_ok() && b.is_ok());

        // Exactly one refresh, carrying the stored refresh token.
        let refreshes = transport.refresh_calls();
        assert_eq!(refreshes.len(), 1);
        assert_eq!(
            refreshes[0].body,
            Some(serde_json::json!({ "refreshToken": "R1" }))
        );
        assert_eq!(refreshes[0].bearer, None);

        // Both data requests went out with the refreshed token attached.
        let data_requests: Vec<_> = transport
            .requests()
            .into_iter()
            .filter(|r| r.url.ends_with("/medicines"))
            .collect();
        assert_eq!(data_requests.len(), 2);
        for request in &data_requests {
            assert_eq!(request.bearer.as_deref(), Some(fresh.as_str()));
        }

        // Store rotated the access token and kept the old refresh token.
        assert_eq!(session.access_token(), Some(fresh));
        assert_eq!(session.refresh_token().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn refresh_failure_fails_every_waiter_without_a_second_attempt() {
        let transport = FakeTransport::new(|req| {
            if req.url.ends_with("/auth/refresh") {
                Ok(status(502))
            } else {
                Ok(ok_json(serde_json::json!([])))
            }
        });
        let session = session_with(Some(expired_token()), Some("R1".into()));
        let nav = FakeNavigator::new(false);
        let client = client(transport.clone(), session.clone(), nav.clone());

        let (a, b) = tokio::join!(client.medicines(), client.medicines());
        assert!(a.is_err() && b.is_err());

        assert_eq!(transport.refresh_calls().len(), 1);
        assert!(!session.is_authenticated());
        assert_eq!(nav.navigation_count(), 1);
        assert_eq!(session.take_logout_reason(), Some(LogoutReason::Unauthorized));
    }

    // ── Auth endpoint bypass ─────────────────────────────────────────────

    #[tokio::test]
    async fn auth_endpoints_get_no_bearer_and_no_refresh_on_401() {
        let transport = FakeTransport::new(|_| Ok(status(401)));
        let session = session_with(Some(live_token()), Some("R1".into()));
        let nav = FakeNavigator::new(true);
        let client = client(transport.clone(), session, nav);

        let result = client.login("admin", "wrong-password").await;
        assert!(matches!(result, Err(PosError::Api { status: 401, .. })));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1, "401 on /auth must not trigger a refresh");
        assert_eq!(requests[0].bearer, None);
    }

    // ── Local rejection ──────────────────────────────────────────────────

    #[tokio::test]
    async fn missing_credentials_reject_locally_and_end_the_session() {
        let transport = FakeTransport::new(|_| Ok(ok_json(serde_json::json!([]))));
        let session = session_with(None, None);
        let nav = FakeNavigator::new(false);
        let client = client(transport.clone(), session.clone(), nav.clone());

        let result = client.medicines().await;
        assert!(matches!(result, Err(PosError::Unauthenticated)));
        assert!(transport.requests().is_empty(), "nothing may reach the network");
        assert_eq!(nav.navigation_count(), 1);
        assert_eq!(
            session.take_logout_reason().map(|r| r.code()),
            Some("unauthorized")
        );
    }

    #[tokio::test]
    async fn expired_token_without_refresh_token_fails_fast() {
        let transport = FakeTransport::new(|_| Ok(ok_json(serde_json::json!([]))));
        let session = session_with(Some(expired_token()), None);
        let nav = FakeNavigator::new(false);
        let client = client(transport.clone(), session.clone(), nav);

        let result = client.medicines().await;
        assert!(matches!(result, Err(PosError::Unauthenticated)));
        assert!(transport.requests().is_empty());
        assert!(!session.is_authenticated());
    }

    // ── 401 retry policy ─────────────────────────────────────────────────

    #[tokio::test]
    async fn first_401_is_retried_once_with_the_fresh_token() {
        let stale = live_token();
        let fresh = live_token();
        let stale_for_handler = stale.clone();
        let fresh_for_handler = fresh.clone();
        let transport = FakeTransport::new(move |req| {
            if req.url.ends_with("/auth/refresh") {
                Ok(ok_json(serde_json::json!({ "accessToken": fresh_for_handler })))
            } else if req.bearer.as_deref() == Some(stale_for_handler.as_str()) {
                // Server-side revocation: the token looks live locally.
                Ok(status(401))
            } else {
                Ok(ok_json(serde_json::json!([])))
            }
        });
        let session = session_with(Some(stale.clone()), Some("R1".into()));
        let nav = FakeNavigator::new(false);
        let client = client(transport.clone(), session, nav.clone());

        client.medicines().await.unwrap();

        let data_requests: Vec<_> = transport
            .requests()
            .into_iter()
            .filter(|r| r.url.ends_with("/medicines"))
            .collect();
        assert_eq!(data_requests.len(), 2);
        assert_eq!(data_requests[0].bearer.as_deref(), Some(stale.as_str()));
        assert_eq!(data_requests[1].bearer.as_deref(), Some(fresh.as_str()));
        assert_eq!(transport.refresh_calls().len(), 1);
        assert_eq!(nav.navigation_count(), 0);
    }

    #[tokio::test]
    async fn second_401_forces_logout_instead_of_a_second_refresh() {
        let fresh = live_token();
        let transport = FakeTransport::new(move |req| {
            if req.url.ends_with("/auth/refresh") {
                Ok(ok_json(serde_json::json!({ "token": fresh })))
            } else {
                Ok(status(401))
            }
        });
        let session = session_with(Some(live_token()), Some("R1".into()));
        let nav = FakeNavigator::new(false);
        let client = client(transport.clone(), session.clone(), nav.clone());

        let result = client.medicines().await;
        assert!(matches!(result, Err(PosError::Api { status: 401, .. })));

        assert_eq!(transport.refresh_calls().len(), 1);
        assert_eq!(nav.navigation_count(), 1);
        assert!(!session.is_authenticated());
    }

    // ── Failure classification ───────────────────────────────────────────

    #[tokio::test]
    async fn rate_limiting_emits_a_warning_with_the_server_hint() {
        let transport = FakeTransport::new(|_| {
            Ok(ApiResponse { status: 429, retry_after_secs: Some(30), body: Vec::new() })
        });
        let session = session_with(Some(live_token()), None);
        let nav = FakeNavigator::new(false);
        let client = client(transport, session, nav);
        let mut notices = client.notifications();

        let result: Result<Vec<Value>> =
            client.request(Method::GET, "/sales", Vec::new(), None).await;
        assert!(matches!(
            result,
            Err(PosError::RateLimited { retry_after_secs: Some(30) })
        ));

        let notice = notices.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("30"), "hint missing from {:?}", notice.message);
        assert_eq!(notice.retry_after_secs, Some(30));
    }

    #[tokio::test]
    async fn connectivity_failure_emits_a_network_notice() {
        let transport =
            FakeTransport::new(|_| Err(TransportError("connection refused".into())));
        let session = session_with(Some(live_token()), None);
        let nav = FakeNavigator::new(false);
        let client = client(transport, session, nav);
        let mut notices = client.notifications();

        let result = client.medicines().await;
        assert!(matches!(result, Err(PosError::Network(_))));

        let notice = notices.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn server_errors_notify_and_propagate() {
        let transport = FakeTransport::new(|_| Ok(status(503)));
        let session = session_with(Some(live_token()), None);
        let nav = FakeNavigator::new(false);
        let client = client(transport, session, nav);
        let mut notices = client.notifications();

        let result = client.medicines().await;
        assert!(matches!(result, Err(PosError::Api { status: 503, .. })));

        let notice = notices.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("503"));
    }

    #[tokio::test]
    async fn unclassified_failures_propagate_without_a_notice() {
        let transport = FakeTransport::new(|_| {
            Ok(ApiResponse {
                status: 404,
                retry_after_secs: None,
                body: br#"{"error":"no such medicine"}"#.to_vec(),
            })
        });
        let session = session_with(Some(live_token()), None);
        let nav = FakeNavigator::new(false);
        let client = client(transport, session, nav);
        let mut notices = client.notifications();

        let result = client.medicines().await;
        match result {
            Err(PosError::Api { status: 404, message }) => {
                assert_eq!(message, "no such medicine");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(notices.try_recv().is_err(), "404 must not toast");
    }

    // ── Credential persistence on login ──────────────────────────────────

    #[tokio::test]
    async fn login_persists_the_returned_credentials() {
        let token = live_token();
        let token_for_handler = token.clone();
        let transport = FakeTransport::new(move |_| {
            Ok(ok_json(serde_json::json!({
                "token": token_for_handler,
                "refreshToken": "R1",
                "role": "ADMIN",
            })))
        });
        let session = session_with(None, None);
        let nav = FakeNavigator::new(true);
        let client = client(transport.clone(), session.clone(), nav);

        client.login("admin", "hunter2").await.unwrap();

        assert_eq!(session.access_token(), Some(token));
        assert_eq!(session.refresh_token().as_deref(), Some("R1"));
        assert_eq!(session.role().as_deref(), Some("ADMIN"));
        assert_eq!(transport.requests()[0].bearer, None);
    }

    // ── Teardown idempotence ─────────────────────────────────────────────

    #[tokio::test]
    async fn force_logout_does_not_navigate_away_from_the_login_view() {
        let transport = FakeTransport::new(|_| Ok(status(200)));
        let session = session_with(Some(live_token()), None);
        let nav = FakeNavigator::new(true);
        let client = client(transport, session.clone(), nav.clone());

        client.force_logout(LogoutReason::Unauthorized);
        client.force_logout(LogoutReason::Unauthorized);

        assert_eq!(nav.navigation_count(), 0);
        assert!(!session.is_authenticated());
        assert_eq!(session.take_logout_reason(), Some(LogoutReason::Unauthorized));
    }
}
