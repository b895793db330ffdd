pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{AppSettings, CliConfig};
pub use crate::config::DashConfig;

pub use crate::adapters::{HttpDashSource, LocalStorage, SnapshotExporter, SnapshotRenderer};
pub use crate::core::cycle::DashEngine;
pub use crate::utils::error::{DashError, Result};
