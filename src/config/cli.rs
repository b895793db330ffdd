use crate::config::toml_config::DashConfig;
use crate::domain::model::DateRange;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "dash-etl")]
#[command(about = "Fetches a dashboard analytics payload and renders its KPIs and series")]
pub struct CliConfig {
    /// TOML configuration file; flags override its values.
    #[arg(long)]
    pub config: Option<String>,

    /// Webhook endpoint returning the dashboard payload.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Range start (YYYY-MM-DD). Defaults to the first day of the current month.
    #[arg(long)]
    pub entry_start: Option<String>,

    /// Range end (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub entry_end: Option<String>,

    /// Treat upstream money amounts as integer minor units.
    #[arg(long)]
    pub minor_units: bool,

    #[arg(long, help = "Write the snapshot as a ZIP archive into this directory")]
    pub export: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON instead of compact text")]
    pub log_json: bool,
}

/// Fully resolved run settings: file config merged with flag overrides.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub dash: DashConfig,
    pub range: DateRange,
    pub export_path: Option<String>,
}

impl CliConfig {
    pub fn into_settings(self) -> Result<AppSettings> {
        let mut dash = match (&self.config, self.endpoint) {
            (Some(path), endpoint) => {
                let mut config = DashConfig::from_file(path)?;
                if let Some(endpoint) = endpoint {
                    config.dashboard.endpoint = endpoint;
                }
                config
            }
            (None, Some(endpoint)) => DashConfig::for_endpoint(endpoint),
            (None, None) => {
                return Err(DashError::MissingConfig {
                    field: "endpoint".to_string(),
                })
            }
        };

        if self.minor_units {
            dash.dashboard.money_is_minor_units = Some(true);
        }

        dash.validate()?;

        let range = DateRange::new(
            self.entry_start.unwrap_or_else(first_day_of_month),
            self.entry_end.unwrap_or_else(today),
        );
        validation::validate_date_key("entry_start", &range.entry_start)?;
        validation::validate_date_key("entry_end", &range.entry_end)?;

        let export_path = self
            .export
            .or_else(|| dash.export.as_ref().map(|e| e.output_path.clone()));

        Ok(AppSettings {
            dash,
            range,
            export_path,
        })
    }
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub fn first_day_of_month() -> String {
    chrono::Local::now().format("%Y-%m-01").to_string()
}
