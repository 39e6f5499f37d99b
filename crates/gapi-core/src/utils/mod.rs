//! Utility functions for building request paths.

pub mod path;

pub use path::{clean_path, dashboard_path, segment};
