//! PharmaPOS API client for Rust.
//!
//! All data access goes through [`PosClient`], which owns the credential
//! lifecycle: bearer attachment, refresh-before-send on expired tokens,
//! single-flight refresh coalescing, and the 401 retry-once policy.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pharmapos_client::PosClient;
//! use pharmapos_client::session::{MemoryStorage, Navigator, SessionStore};
//!
//! struct Headless;
//! impl Navigator for Headless {
//!     fn is_login_view(&self) -> bool { true }
//!     fn show_login(&self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> pharmapos_client::Result<()> {
//!     let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::default())));
//!     let client = PosClient::new("http://localhost:8080/api", session, Arc::new(Headless))?;
//!
//!     client.login("admin", "hunter2").await?;
//!     let medicines = client.medicines().await?;
//!     println!("{} medicines in stock", medicines.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod notify;
pub mod session;
pub mod transport;

pub use api::AuthResponse;
pub use client::PosClient;
pub use error::{PosError, Result};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use session::{LogoutReason, Navigator, SessionStore};
