//! Octodrop Server Library
//!
//! Stores uploaded files in a GitHub repository under a name derived from
//! their content. The main server binary is in main.rs.
//!
//! # Modules
//!
//! - `hashing`: git blob and dedup hashes of file content
//! - `storage`: content-addressed paths and the contents API client
//! - `routes`: HTTP handlers

pub mod config;
pub mod error;
pub mod hashing;
pub mod routes;
pub mod state;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
pub use hashing::ContentHashes;
pub use state::AppState;
