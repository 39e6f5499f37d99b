//! Client library for a dashboard server's administrative REST API.
//!
//! ```no_run
//! # async fn demo() -> Result<(), gapi_core::ApiError> {
//! use gapi_core::{ApiClient, Credentials};
//!
//! let client = ApiClient::new("http://localhost:3000", Some(Credentials::parse("admin:admin")))?;
//! for entry in client.dashboards().await? {
//!     println!("{} -> {}", entry.title, entry.uri);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError, Credentials};
pub use config::Config;
