//! Exchange-rate lookup errors

use thiserror::Error;

/// Errors that can occur while fetching conversion rates
#[derive(Debug, Error)]
pub enum RateError {
    #[error("Currency API key not configured. Set the {env} environment variable.")]
    MissingApiKey { env: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Currency API returned HTTP {status}")]
    Status { status: u16 },

    #[error("Unexpected response format from currency API.")]
    MalformedResponse,

    #[error("No conversion rates available for base currency '{0}'")]
    UnknownBase(String),
}
