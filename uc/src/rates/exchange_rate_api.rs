//! ExchangeRate-API client (`/v6/{key}/latest/{BASE}`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{RateError, RateProvider, RateTable};
use crate::config::CurrencyConfig;

/// HTTP rate provider backed by exchangerate-api.com
pub struct ExchangeRateApi {
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
    http: Client,
}

impl ExchangeRateApi {
    /// Create a provider from configuration
    ///
    /// A missing API key is not an error here; lookups report it instead.
    pub fn from_config(config: &CurrencyConfig) -> Result<Self, RateError> {
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "ExchangeRateApi::from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key(),
            api_key_env: config.api_key_env.clone(),
            http,
        })
    }

    fn latest_url(&self, api_key: &str, base_code: &str) -> String {
        format!("{}/{}/latest/{}", self.base_url, api_key, base_code)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    async fn lookup(&self, base_code: &str) -> Result<RateTable, RateError> {
        debug!(%base_code, "ExchangeRateApi::lookup: called");
        let api_key = self.api_key.as_deref().ok_or_else(|| RateError::MissingApiKey {
            env: self.api_key_env.clone(),
        })?;

        // reqwest errors quote the request URL, which carries the key
        let response = self
            .http
            .get(self.latest_url(api_key, base_code))
            .send()
            .await
            .map_err(|e| RateError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), %base_code, "ExchangeRateApi::lookup: non-success status");
            return Err(RateError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| RateError::Network(e.without_url()))?;
        parse_rates(&body)
    }
}

/// Extract the `conversion_rates` table from a response body
pub(crate) fn parse_rates(body: &str) -> Result<RateTable, RateError> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        debug!(error = %e, "parse_rates: body is not JSON");
        RateError::MalformedResponse
    })?;

    let rates = json
        .get("conversion_rates")
        .and_then(Value::as_object)
        .ok_or(RateError::MalformedResponse)?;

    rates
        .iter()
        .map(|(code, rate)| match rate.as_f64() {
            Some(r) => Ok((code.clone(), r)),
            None => {
                debug!(%code, %rate, "parse_rates: non-numeric rate");
                Err(RateError::MalformedResponse)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::testing::{closed_port_url, serve_once};

    fn provider(base_url: String, api_key: Option<&str>) -> ExchangeRateApi {
        ExchangeRateApi {
            base_url,
            api_key: api_key.map(str::to_string),
            api_key_env: "EXCHANGE_RATE_API_KEY".to_string(),
            http: Client::builder().timeout(Duration::from_secs(5)).build().unwrap(),
        }
    }

    #[test]
    fn test_latest_url() {
        let api = provider("https://v6.exchangerate-api.com/v6".to_string(), Some("k"));
        assert_eq!(
            api.latest_url("k", "USD"),
            "https://v6.exchangerate-api.com/v6/k/latest/USD"
        );
    }

    #[test]
    fn test_parse_rates() {
        let table = parse_rates(r#"{"result":"success","conversion_rates":{"USD":1,"EUR":0.92}}"#).unwrap();
        assert_eq!(table.get("USD"), Some(&1.0));
        assert_eq!(table.get("EUR"), Some(&0.92));
    }

    #[test]
    fn test_parse_rates_missing_table() {
        let err = parse_rates(r#"{"result":"error","error-type":"invalid-key"}"#).unwrap_err();
        assert!(matches!(err, RateError::MalformedResponse));
    }

    #[test]
    fn test_parse_rates_non_numeric_entry() {
        let err = parse_rates(r#"{"conversion_rates":{"USD":1,"EUR":"0.92"}}"#).unwrap_err();
        assert!(matches!(err, RateError::MalformedResponse));
    }

    #[test]
    fn test_parse_rates_not_json() {
        assert!(matches!(parse_rates("<html>"), Err(RateError::MalformedResponse)));
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let url = serve_once("200 OK", r#"{"conversion_rates":{"EUR":0.5}}"#).await;
        let table = provider(url, Some("key")).lookup("USD").await.unwrap();
        assert_eq!(table.get("EUR"), Some(&0.5));
    }

    #[tokio::test]
    async fn test_lookup_http_404() {
        let url = serve_once("404 Not Found", r#"{"result":"error"}"#).await;
        let err = provider(url, Some("key")).lookup("USD").await.unwrap_err();
        assert!(matches!(err, RateError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn test_lookup_missing_key() {
        let err = provider("http://127.0.0.1:9".to_string(), None)
            .lookup("USD")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("EXCHANGE_RATE_API_KEY"));
    }

    #[tokio::test]
    async fn test_lookup_connection_refused() {
        let url = closed_port_url().await;
        let err = provider(url, Some("SUPERSECRETKEY123")).lookup("USD").await.unwrap_err();
        assert!(matches!(err, RateError::Network(_)));
        assert!(!err.to_string().contains("SUPERSECRETKEY123"), "key leaked: {}", err);
    }
}
