//! Configuration module for environment variable parsing.
//!
//! The three channel/backend secrets are mandatory; everything else has a default.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// LINE channel access token (Bearer token for the reply API)
    pub line_channel_access_token: String,

    /// LINE channel secret used to sign webhook bodies
    pub line_channel_secret: String,

    /// Gemini API key
    pub gemini_api_key: String,

    /// Port for the web server to listen on
    pub port: u16,

    /// Gemini model name, e.g. `gemini-2.0-flash`
    pub gemini_model: String,

    /// Base URL of the Gemini REST API
    pub gemini_api_base: String,

    /// Base URL of the LINE Messaging API
    pub line_api_base: String,

    /// Upper bound on a single generation call in milliseconds
    pub generate_timeout_ms: u64,

    /// Upper bound on a single reply API call in milliseconds
    pub reply_timeout_ms: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("line_channel_access_token", &"<redacted>")
            .field("line_channel_secret", &"<redacted>")
            .field("gemini_api_key", &"<redacted>")
            .field("port", &self.port)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("line_api_base", &self.line_api_base)
            .field("generate_timeout_ms", &self.generate_timeout_ms)
            .field("reply_timeout_ms", &self.reply_timeout_ms)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            line_channel_access_token: require("LINE_CHANNEL_ACCESS_TOKEN")?,
            line_channel_secret: require("LINE_CHANNEL_SECRET")?,
            gemini_api_key: require("GEMINI_API_KEY")?,

            port: parse_or("PORT", 8080),

            gemini_model: non_blank_or("GEMINI_MODEL", "gemini-2.0-flash"),

            gemini_api_base: non_blank_or(
                "GEMINI_API_BASE",
                "https://generativelanguage.googleapis.com",
            ),

            line_api_base: non_blank_or("LINE_API_BASE", "https://api.line.me"),

            generate_timeout_ms: parse_or("GENERATE_TIMEOUT_MS", 20_000),

            reply_timeout_ms: parse_or("REPLY_TIMEOUT_MS", 10_000),
        })
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_millis(self.generate_timeout_ms)
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }
}

/// Read a mandatory, non-blank variable.
fn require(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        Ok(_) => bail!("environment variable {} is blank", name),
        Err(_) => bail!("environment variable {} is not set", name),
    }
}

/// Read an optional string variable, treating blank as unset.
fn non_blank_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse an optional variable, falling back to `default` when unset or invalid.
fn parse_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "invalid_value_using_default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_valid() {
        env::set_var("TEST_PARSE_OR_VALID", " 1500 ");
        let result: u64 = parse_or("TEST_PARSE_OR_VALID", 0);
        assert_eq!(result, 1500);
        env::remove_var("TEST_PARSE_OR_VALID");
    }

    #[test]
    fn test_parse_or_invalid_falls_back() {
        env::set_var("TEST_PARSE_OR_INVALID", "soon");
        let result: u16 = parse_or("TEST_PARSE_OR_INVALID", 8080);
        assert_eq!(result, 8080);
        env::remove_var("TEST_PARSE_OR_INVALID");
    }

    #[test]
    fn test_parse_or_default() {
        let result: u64 = parse_or("NONEXISTENT_VAR_FOR_TUTOR", 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_non_blank_or() {
        env::set_var("TEST_NON_BLANK_BLANK", "   ");
        assert_eq!(
            non_blank_or("TEST_NON_BLANK_BLANK", "https://api.line.me"),
            "https://api.line.me"
        );
        env::remove_var("TEST_NON_BLANK_BLANK");

        env::set_var("TEST_NON_BLANK_SET", " http://localhost:9000 ");
        assert_eq!(
            non_blank_or("TEST_NON_BLANK_SET", "https://api.line.me"),
            "http://localhost:9000"
        );
        env::remove_var("TEST_NON_BLANK_SET");

        assert_eq!(non_blank_or("TEST_NON_BLANK_MISSING", "fallback"), "fallback");
    }

    #[test]
    fn test_require() {
        env::set_var("TEST_REQUIRE_SET", "  secret  ");
        assert_eq!(require("TEST_REQUIRE_SET").unwrap(), "secret");
        env::remove_var("TEST_REQUIRE_SET");

        env::set_var("TEST_REQUIRE_BLANK", "   ");
        assert!(require("TEST_REQUIRE_BLANK").is_err());
        env::remove_var("TEST_REQUIRE_BLANK");

        assert!(require("TEST_REQUIRE_MISSING").is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config {
            line_channel_access_token: "token-value".to_string(),
            line_channel_secret: "secret-value".to_string(),
            gemini_api_key: "key-value".to_string(),
            port: 8080,
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_api_base: "http://localhost".to_string(),
            line_api_base: "http://localhost".to_string(),
            generate_timeout_ms: 1,
            reply_timeout_ms: 1,
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("token-value"));
        assert!(!rendered.contains("secret-value"));
        assert!(!rendered.contains("key-value"));
    }
}
