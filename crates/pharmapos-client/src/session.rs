//! Session state — credentials, persistence, and teardown plumbing.
//!
//! The store is an explicit object owned by the composition root and handed
//! to [`crate::PosClient`], never ambient global state. It reads its backend
//! eagerly at construction and writes through synchronously on every
//! mutation, so a reader immediately after a write always sees the new
//! credentials.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Credential snapshot as persisted by a storage backend.
///
/// Absence of the access token means "unauthenticated" regardless of what
/// else is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub role: Option<String>,
}

/// Durable home for the credentials. Implementations must be synchronous;
/// the store calls them with its state lock held.
pub trait CredentialStorage: Send + Sync {
    fn load(&self) -> Option<StoredCredentials>;
    fn persist(&self, credentials: &StoredCredentials);
    fn clear(&self);
}

/// In-memory backend for tests and throwaway shells.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<StoredCredentials>>,
}

impl CredentialStorage for MemoryStorage {
    fn load(&self) -> Option<StoredCredentials> {
        self.slot.lock().unwrap().clone()
    }

    fn persist(&self, credentials: &StoredCredentials) {
        *self.slot.lock().unwrap() = Some(credentials.clone());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

/// JSON file backend — the store that survives restarts.
///
/// Persistence is best-effort: an unwritable file degrades the session to
/// in-memory lifetime, it never fails the mutation.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStorage for JsonFileStorage {
    fn load(&self) -> Option<StoredCredentials> {
        let bytes = std::fs::read(&self.path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn persist(&self, credentials: &StoredCredentials) {
        match serde_json::to_vec_pretty(credentials) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(&self.path, bytes) {
                    warn!("failed to persist session to {}: {e}", self.path.display());
                }
            }
            Err(e) => warn!("failed to serialize session: {e}"),
        }
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to clear session file {}: {e}", self.path.display());
            }
        }
    }
}

/// Why a session ended. The code is stable for programmatic use; the
/// message is what the login screen shows in its banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// Credentials missing, expired beyond recovery, or rejected twice.
    Unauthorized,
    /// The user signed out.
    Manual,
}

impl LogoutReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Manual => "logged_out",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Your session has expired. Please sign in again.",
            Self::Manual => "You have been signed out.",
        }
    }
}

/// What the gateway needs from the UI shell: where the user currently is,
/// and how to put the login view back up.
pub trait Navigator: Send + Sync {
    fn is_login_view(&self) -> bool;
    fn show_login(&self);
}

/// Process-wide credential store.
pub struct SessionStore {
    state: Mutex<StoredCredentials>,
    storage: Box<dyn CredentialStorage>,
    /// Tab-lifetime only — never persisted, read at most once.
    logout_reason: Mutex<Option<LogoutReason>>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn CredentialStorage>) -> Self {
        let state = storage.load().unwrap_or_default();
        Self {
            state: Mutex::new(state),
            storage,
            logout_reason: Mutex::new(None),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.lock().unwrap().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state.lock().unwrap().refresh_token.clone()
    }

    pub fn role(&self) -> Option<String> {
        self.state.lock().unwrap().role.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().access_token.is_some()
    }

    /// Replace the access token; refresh token and role keep their previous
    /// values unless new ones are provided.
    pub fn set_credentials(
        &self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        role: Option<String>,
    ) {
        let mut state = self.state.lock().unwrap();
        state.access_token = Some(access_token.into());
        if let Some(refresh) = refresh_token {
            state.refresh_token = Some(refresh);
        }
        if let Some(role) = role {
            state.role = Some(role);
        }
        self.storage.persist(&state);
    }

    /// Remove all three credential entries.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        *state = StoredCredentials::default();
        self.storage.clear();
    }

    pub fn set_logout_reason(&self, reason: LogoutReason) {
        *self.logout_reason.lock().unwrap() = Some(reason);
    }

    /// One-shot read for the login screen's banner.
    pub fn take_logout_reason(&self) -> Option<LogoutReason> {
        self.logout_reason.lock().unwrap().take()
    }
}
