pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod state;

pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
