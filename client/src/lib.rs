//! State synchronization core of the MoonTracker dashboard: a paginated
//! transaction feed, stats aggregation, category cache, delete confirmation
//! and notifications, all driven through [`dashboard::Dashboard`].

pub mod api;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod format;
pub mod models;
pub mod mutation;
pub mod notify;
pub mod stats;
pub mod status;

#[cfg(test)]
mod test_utils;

pub use api::{Backend, HttpBackend};
pub use config::ClientConfig;
pub use dashboard::{Command, Dashboard, DashboardView};
pub use error::AppError;
