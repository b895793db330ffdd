#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{AppSettings, CliConfig};
pub use toml_config::DashConfig;
