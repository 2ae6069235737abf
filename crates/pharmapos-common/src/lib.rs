//! # pharmapos-common
//!
//! Shared types, token utilities, and configuration used by the PharmaPOS
//! client crates. This is the foundation layer — no network code, just
//! primitives and contracts.

pub mod auth;
pub mod config;
pub mod csv;
pub mod models;
