use anyhow::{Context, Result};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the API gateway, without a trailing slash.
    pub api_base_url: String,
    pub search_debounce_ms: u32,
}

impl AppConfig {
    /// Configuration baked into the wasm bundle at build time.
    pub fn from_build_env() -> Result<Self> {
        Self::from_values(
            option_env!("API_GATEWAY_URL").map(str::to_string),
            option_env!("SEARCH_DEBOUNCE_MS").map(str::to_string),
        )
    }

    fn from_values(api_base_url: Option<String>, debounce_ms: Option<String>) -> Result<Self> {
        let api_base_url = api_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let search_debounce_ms = match debounce_ms {
            Some(raw) => raw
                .trim()
                .parse()
                .context("SEARCH_DEBOUNCE_MS must be a valid number")?,
            None => DEFAULT_SEARCH_DEBOUNCE_MS,
        };

        Ok(Self {
            api_base_url,
            search_debounce_ms,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_values(None, None).expect("should build config");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::from_values(Some("https://gw.example/api/".to_string()), None)
            .expect("should build config");
        assert_eq!(config.api_base_url, "https://gw.example/api");
    }

    #[test]
    fn test_invalid_debounce_rejected() {
        let err = AppConfig::from_values(None, Some("soon".to_string()))
            .expect_err("should reject");
        assert!(err.to_string().contains("SEARCH_DEBOUNCE_MS"));
    }

    #[test]
    fn test_debounce_parsed() {
        let config = AppConfig::from_values(None, Some(" 250 ".to_string())).expect("should parse");
        assert_eq!(config.search_debounce_ms, 250);
    }
}
