//! Data models for the dashboard server admin API.
//!
//! These are flat DTOs mirroring the server's JSON shapes:
//!
//! - `User`, `AdminCreateUserForm`: user accounts and the admin create form
//! - `Org`, `OrgResponse`: organizations and their mutation replies
//! - `Dashboard`, `DashboardEntry`: stored dashboards and search hits
//! - Save/import request and response types for dashboard persistence

pub mod dashboard;
pub mod organization;
pub mod user;

pub use dashboard::{
    Dashboard, DashboardEntry, DashboardImportInput, DashboardImportResponse, DashboardList,
    DashboardMeta, DashboardSaveResponse, SearchQuery,
};
pub use organization::{Org, OrgResponse};
pub use user::{AdminCreateUserForm, AdminCreateUserResponse, SwitchUserContextResponse, User};
