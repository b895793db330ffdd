use crate::domain::model::MoneyConvention;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashConfig {
    pub dashboard: DashboardSection,
    pub export: Option<ExportSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSection {
    pub endpoint: String,
    /// Whether the upstream sends money amounts as integer minor units.
    pub money_is_minor_units: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
    pub parameters: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSection {
    pub output_path: String,
}

impl DashConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| DashError::InvalidConfigValue {
            field: "toml".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Minimal config when the caller only provides an endpoint.
    pub fn for_endpoint(endpoint: String) -> Self {
        Self {
            dashboard: DashboardSection {
                endpoint,
                money_is_minor_units: None,
                timeout_seconds: None,
                headers: None,
                parameters: None,
            },
            export: None,
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("dashboard.endpoint", &self.dashboard.endpoint)?;

        if let Some(timeout) = self.dashboard.timeout_seconds {
            validation::validate_positive_number("dashboard.timeout_seconds", timeout, 1)?;
        }

        if let Some(export) = &self.export {
            validation::validate_path("export.output_path", &export.output_path)?;
        }

        Ok(())
    }
}

/// Replaces `${VAR_NAME}` with the environment value; unset variables are
/// left verbatim so validation reports them in context.
fn substitute_env_vars(content: &str) -> String {
    let re = match regex::Regex::new(r"\$\{([^}]+)\}") {
        Ok(re) => re,
        Err(_) => return content.to_string(),
    };

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl ConfigProvider for DashConfig {
    fn endpoint(&self) -> &str {
        &self.dashboard.endpoint
    }

    fn money_convention(&self) -> MoneyConvention {
        MoneyConvention::from_minor_flag(self.dashboard.money_is_minor_units.unwrap_or(false))
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.dashboard.timeout_seconds
    }

    fn headers(&self) -> Option<&HashMap<String, String>> {
        self.dashboard.headers.as_ref()
    }

    fn parameters(&self) -> Option<&HashMap<String, String>> {
        self.dashboard.parameters.as_ref()
    }
}

impl Validate for DashConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
