use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CommunityError, Result};

const MODERATOR_KEYS_VAR: &str = "COMMUNITIES_MODERATOR_KEYS";
const EMBEDDED_EVENT_VAR: &str = "COMMUNITIES_EMBEDDED_EVENT";
const DEBUG_LOGGING_VAR: &str = "COMMUNITIES_DEBUG_LOGGING";

/// How a parser treats a malformed optional sub-field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tolerance {
    /// Drop the sub-field, record a warning and keep parsing.
    #[default]
    Lenient,
    /// Fail the whole parse.
    Strict,
}

impl FromStr for Tolerance {
    type Err = CommunityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(CommunityError::Configuration(format!(
                "Invalid tolerance: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Configuration for community record parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Policy for `p` moderator tags whose key cannot be decoded
    pub moderator_keys: Tolerance,

    /// Policy for approval content that is not a decodable event
    pub embedded_event: Tolerance,

    /// Whether to log every successfully parsed record
    pub enable_debug_logging: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            moderator_keys: Tolerance::Lenient,
            embedded_event: Tolerance::Lenient,
            enable_debug_logging: false,
        }
    }
}

impl ParseConfig {
    /// Rejects every malformed sub-field instead of skipping it.
    pub fn strict() -> Self {
        Self {
            moderator_keys: Tolerance::Strict,
            embedded_event: Tolerance::Strict,
            ..Self::default()
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if one exists.
    /// Variables that are not set keep their default value.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Builds the configuration from explicit key/value pairs.
    ///
    /// Unknown keys are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                MODERATOR_KEYS_VAR => config.moderator_keys = value.parse()?,
                EMBEDDED_EVENT_VAR => config.embedded_event = value.parse()?,
                DEBUG_LOGGING_VAR => config.enable_debug_logging = parse_flag(value)?,
                _ => {}
            }
        }
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(CommunityError::Configuration(format!(
            "Invalid boolean flag: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ParseConfig::default();

        assert_eq!(config.moderator_keys, Tolerance::Lenient);
        assert_eq!(config.embedded_event, Tolerance::Lenient);
        assert!(!config.enable_debug_logging);
    }

    #[test]
    fn test_strict_config() {
        let config = ParseConfig::strict();

        assert_eq!(config.moderator_keys, Tolerance::Strict);
        assert_eq!(config.embedded_event, Tolerance::Strict);
        assert!(!config.enable_debug_logging);
    }

    #[test]
    fn test_from_vars() {
        let config = ParseConfig::from_vars([
            ("COMMUNITIES_MODERATOR_KEYS", "strict"),
            ("COMMUNITIES_EMBEDDED_EVENT", " Lenient "),
            ("COMMUNITIES_DEBUG_LOGGING", "1"),
            ("UNRELATED", "whatever"),
        ])
        .unwrap();

        assert_eq!(config.moderator_keys, Tolerance::Strict);
        assert_eq!(config.embedded_event, Tolerance::Lenient);
        assert!(config.enable_debug_logging);
    }

    #[test]
    fn test_from_vars_empty() {
        let config = ParseConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, ParseConfig::default());
    }

    #[test]
    fn test_from_vars_invalid() {
        let result = ParseConfig::from_vars([("COMMUNITIES_MODERATOR_KEYS", "sometimes")]);
        assert!(matches!(result, Err(CommunityError::Configuration(_))));

        let result = ParseConfig::from_vars([("COMMUNITIES_DEBUG_LOGGING", "maybe")]);
        assert!(matches!(result, Err(CommunityError::Configuration(_))));
    }

    #[test]
    fn test_tolerance_display_round_trip() {
        for tolerance in [Tolerance::Lenient, Tolerance::Strict] {
            assert_eq!(tolerance.to_string().parse::<Tolerance>().unwrap(), tolerance);
        }
    }
}
