//! REST API client module for the dashboard server.
//!
//! This module provides the `ApiClient` and its endpoint wrappers, grouped
//! by resource:
//!
//! - `users`: list users, switch the active organization
//! - `admin`: create and delete users (server admin only)
//! - `orgs`: organization CRUD
//! - `dashboards`: search, fetch, save, import, and delete dashboards
//!
//! Every wrapper is a single request/response exchange. Non-2xx responses
//! are turned into an `ApiError` by status code.

pub mod admin;
pub mod client;
pub mod dashboards;
pub mod error;
pub mod orgs;
pub mod users;

pub use client::{ApiClient, Credentials};
pub use error::ApiError;
