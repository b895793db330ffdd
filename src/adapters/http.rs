use crate::domain::cancel::CancelToken;
use crate::domain::model::{DateRange, RawResponse};
use crate::domain::ports::{ConfigProvider, DashSource};
use crate::utils::error::{DashError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches the dashboard payload from the configured webhook endpoint.
pub struct HttpDashSource<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpDashSource<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Query parameters for one request: the date range, any configured
    /// extras, and a timestamp to defeat intermediary caching. Blank values
    /// are skipped, matching the upstream contract.
    fn query_params(&self, range: &DateRange) -> Vec<(String, String)> {
        let mut params = Vec::new();

        for (key, value) in [
            ("entry_start", range.entry_start.as_str()),
            ("entry_end", range.entry_end.as_str()),
        ] {
            if !value.trim().is_empty() {
                params.push((key.to_string(), value.to_string()));
            }
        }

        if let Some(extra) = self.config.parameters() {
            for (key, value) in extra {
                if !value.trim().is_empty() {
                    params.push((key.clone(), value.clone()));
                }
            }
        }

        params.push((
            "_ts".to_string(),
            chrono::Utc::now().timestamp_millis().to_string(),
        ));
        params
    }
}

#[async_trait]
impl<C: ConfigProvider> DashSource for HttpDashSource<C> {
    async fn fetch(&self, range: &DateRange, cancel: &CancelToken) -> Result<RawResponse> {
        let mut request = self
            .client
            .get(self.config.endpoint())
            .query(&self.query_params(range));

        if let Some(headers) = self.config.headers() {
            for (key, value) in headers {
                request = request.header(key, value);
            }
        }

        if let Some(timeout) = self.config.timeout_seconds() {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        tracing::debug!(endpoint = %self.config.endpoint(), "requesting dashboard payload");

        let send = async {
            let response = request.send().await?;
            tracing::debug!(status = %response.status(), "dashboard response");

            if !response.status().is_success() {
                return Err(DashError::Status {
                    status: response.status().as_u16(),
                });
            }

            let payload: RawResponse = response.json().await?;
            Ok(payload)
        };

        tokio::select! {
            result = send => result,
            _ = cancel.cancelled() => {
                tracing::debug!("request cancelled by a newer cycle");
                Err(DashError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MoneyConvention;
    use std::collections::HashMap;

    struct TestConfig {
        endpoint: String,
        parameters: Option<HashMap<String, String>>,
    }

    impl ConfigProvider for TestConfig {
        fn endpoint(&self) -> &str {
            &self.endpoint
        }

        fn money_convention(&self) -> MoneyConvention {
            MoneyConvention::MajorUnits
        }

        fn timeout_seconds(&self) -> Option<u64> {
            None
        }

        fn headers(&self) -> Option<&HashMap<String, String>> {
            None
        }

        fn parameters(&self) -> Option<&HashMap<String, String>> {
            self.parameters.as_ref()
        }
    }

    #[test]
    fn test_query_params_skip_blanks_and_append_cache_buster() {
        let source = HttpDashSource::new(TestConfig {
            endpoint: "https://example.com/dash".to_string(),
            parameters: Some(HashMap::from([
                ("tenant".to_string(), "acme".to_string()),
                ("blank".to_string(), "  ".to_string()),
            ])),
        });

        let params = source.query_params(&DateRange::new("2024-01-01", ""));

        assert!(params.contains(&("entry_start".to_string(), "2024-01-01".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "entry_end"));
        assert!(params.contains(&("tenant".to_string(), "acme".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "blank"));
        assert_eq!(params.last().map(|(k, _)| k.as_str()), Some("_ts"));
    }
}
