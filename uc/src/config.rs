//! unitchat configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main unitchat configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Exchange-rate provider configuration
    pub currency: CurrencyConfig,

    /// Orchestration loop limits
    pub agent: AgentConfig,
}

impl Config {
    /// Validate configuration before starting a chat session
    ///
    /// The model API key is required up front. The currency key is optional:
    /// without it currency conversions report an error to the model.
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key().is_none() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        if self.currency.api_key().is_none() {
            tracing::warn!(
                env = %self.currency.api_key_env,
                "Currency API key not set; currency conversions will fail"
            );
        }
        if self.agent.max_iterations == 0 {
            return Err(eyre::eyre!("agent.max-iterations must be at least 1"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .unitchat.yml
        let local_config = PathBuf::from(".unitchat.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/unitchat/unitchat.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("unitchat").join("unitchat.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Read a non-empty secret from the named environment variable
fn env_secret(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "openai" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// API key from the configured environment variable, if set
    pub fn api_key(&self) -> Option<String> {
        env_secret(&self.api_key_env)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 4096,
            timeout_ms: 300_000,
        }
    }
}

/// Exchange-rate provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// Environment variable containing the exchange-rate API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Base URL; requests go to `{base-url}/{key}/latest/{BASE}`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Lookup timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl CurrencyConfig {
    /// API key from the configured environment variable, if set
    pub fn api_key(&self) -> Option<String> {
        env_secret(&self.api_key_env)
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            api_key_env: "EXCHANGE_RATE_API_KEY".to_string(),
            base_url: "https://v6.exchangerate-api.com/v6".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Orchestration loop limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum model invocations per user turn
    #[serde(rename = "max-iterations")]
    pub max_iterations: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { max_iterations: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.currency.timeout_ms, 5_000);
        assert_eq!(config.agent.max_iterations, 10);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: DEBUG
llm:
  provider: openai
  model: gpt-4o-mini
  api-key-env: MY_OPENAI_KEY
  base-url: https://llm.example.com
  max-tokens: 1024
  timeout-ms: 60000

currency:
  api-key-env: MY_RATES_KEY
  base-url: http://localhost:9000
  timeout-ms: 2000

agent:
  max-iterations: 4
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.api_key_env, "MY_OPENAI_KEY");
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.currency.base_url, "http://localhost:9000");
        assert_eq!(config.currency.timeout_ms, 2000);
        assert_eq!(config.agent.max_iterations, 4);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gpt-4.1
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gpt-4.1");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.currency.api_key_env, "EXCHANGE_RATE_API_KEY");
        assert_eq!(config.agent.max_iterations, 10);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "agent:\n  max-iterations: 3").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.agent.max_iterations, 3);
    }

    #[test]
    fn test_load_explicit_path_missing_is_error() {
        let missing = PathBuf::from("/definitely/not/here/unitchat.yml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    #[serial]
    fn test_validate_requires_llm_key() {
        let config = Config {
            llm: LlmConfig {
                api_key_env: "UNITCHAT_TEST_MISSING_LLM_KEY".to_string(),
                ..LlmConfig::default()
            },
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("UNITCHAT_TEST_MISSING_LLM_KEY"));
    }

    #[test]
    #[serial]
    fn test_validate_tolerates_missing_currency_key() {
        // SAFETY: serialized test, no other thread reads this variable
        unsafe { std::env::set_var("UNITCHAT_TEST_LLM_KEY", "sk-test") };

        let config = Config {
            llm: LlmConfig {
                api_key_env: "UNITCHAT_TEST_LLM_KEY".to_string(),
                ..LlmConfig::default()
            },
            currency: CurrencyConfig {
                api_key_env: "UNITCHAT_TEST_MISSING_RATES_KEY".to_string(),
                ..CurrencyConfig::default()
            },
            ..Config::default()
        };

        assert!(config.validate().is_ok());

        unsafe { std::env::remove_var("UNITCHAT_TEST_LLM_KEY") };
    }

    #[test]
    #[serial]
    fn test_blank_key_counts_as_missing() {
        unsafe { std::env::set_var("UNITCHAT_TEST_BLANK_KEY", "   ") };

        let config = CurrencyConfig {
            api_key_env: "UNITCHAT_TEST_BLANK_KEY".to_string(),
            ..CurrencyConfig::default()
        };
        assert!(config.api_key().is_none());

        unsafe { std::env::remove_var("UNITCHAT_TEST_BLANK_KEY") };
    }

    #[test]
    #[serial]
    fn test_validate_rejects_zero_iterations() {
        unsafe { std::env::set_var("UNITCHAT_TEST_LLM_KEY_2", "sk-test") };

        let config = Config {
            llm: LlmConfig {
                api_key_env: "UNITCHAT_TEST_LLM_KEY_2".to_string(),
                ..LlmConfig::default()
            },
            agent: AgentConfig { max_iterations: 0 },
            ..Config::default()
        };
        assert!(config.validate().is_err());

        unsafe { std::env::remove_var("UNITCHAT_TEST_LLM_KEY_2") };
    }
}
