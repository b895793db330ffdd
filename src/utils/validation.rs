use crate::utils::error::{DashError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DashError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DashError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DashError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Calendar-day request parameters must be canonical `YYYY-MM-DD`.
pub fn validate_date_key(field_name: &str, value: &str) -> Result<()> {
    let well_formed = value.len() == 10
        && chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();

    if well_formed {
        Ok(())
    } else {
        Err(DashError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a calendar day formatted YYYY-MM-DD".to_string(),
        })
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DashError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DashError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DashError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("dashboard.endpoint", "https://example.com/webhook/dash").is_ok());
        assert!(validate_url("dashboard.endpoint", "http://example.com").is_ok());
        assert!(validate_url("dashboard.endpoint", "").is_err());
        assert!(validate_url("dashboard.endpoint", "not-a-url").is_err());
        assert!(validate_url("dashboard.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_date_key() {
        assert!(validate_date_key("entry_start", "2024-01-31").is_ok());
        assert!(validate_date_key("entry_start", "2024-1-31").is_err());
        assert!(validate_date_key("entry_start", "2024-13-01").is_err());
        assert!(validate_date_key("entry_start", "2024-01-01T00:00:00Z").is_err());
        assert!(validate_date_key("entry_start", "").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("dashboard.timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("dashboard.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("export.output_path", "./output").is_ok());
        assert!(validate_path("export.output_path", "").is_err());
    }
}
