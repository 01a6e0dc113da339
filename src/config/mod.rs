//! Environment-driven settings
//!
//! The configuration is read once at startup and handed by reference to
//! whichever channel or provider needs it. Blank variables are treated the
//! same as unset ones.

use std::path::PathBuf;

use thiserror::Error;

use crate::channels::ChannelKind;

pub const ETSY_API_KEY: &str = "ETSY_API_KEY";
pub const ETSY_ACCESS_TOKEN: &str = "ETSY_ACCESS_TOKEN";
pub const ETSY_SHOP_ID: &str = "ETSY_SHOP_ID";
pub const ETSY_API_BASE: &str = "ETSY_API_BASE";
pub const PRINTFUL_API_KEY: &str = "PRINTFUL_API_KEY";
pub const PRINTFUL_API_BASE: &str = "PRINTFUL_API_BASE";
pub const WEBSITE_OUTPUT_DIR: &str = "WEBSITE_OUTPUT_DIR";

pub const DEFAULT_ETSY_API_BASE: &str = "https://openapi.etsy.com/v3/application";
pub const DEFAULT_PRINTFUL_API_BASE: &str = "https://api.printful.com";
pub const DEFAULT_WEBSITE_OUTPUT_DIR: &str = "./output/products";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{channel} is not configured; missing environment variables: {}", .vars.join(", "))]
    MissingVars {
        channel: String,
        vars: Vec<&'static str>,
    },
}

/// Etsy credentials and endpoint
#[derive(Debug, Clone, Default)]
pub struct EtsyConfig {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub shop_id: Option<String>,
    pub api_base: String,
}

impl EtsyConfig {
    pub fn missing_vars(&self) -> Vec<&'static str> {
        [
            (ETSY_API_KEY, &self.api_key),
            (ETSY_ACCESS_TOKEN, &self.access_token),
            (ETSY_SHOP_ID, &self.shop_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_vars().is_empty()
    }
}

/// Printful API key and endpoint
#[derive(Debug, Clone, Default)]
pub struct PrintfulConfig {
    pub api_key: Option<String>,
    pub api_base: String,
}

/// Where the website channel writes its files
#[derive(Debug, Clone)]
pub struct WebsiteConfig {
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub etsy: EtsyConfig,
    pub printful: PrintfulConfig,
    pub website: WebsiteConfig,
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            etsy: EtsyConfig {
                api_key: get(ETSY_API_KEY),
                access_token: get(ETSY_ACCESS_TOKEN),
                shop_id: get(ETSY_SHOP_ID),
                api_base: get(ETSY_API_BASE)
                    .unwrap_or_else(|| DEFAULT_ETSY_API_BASE.to_string()),
            },
            printful: PrintfulConfig {
                api_key: get(PRINTFUL_API_KEY),
                api_base: get(PRINTFUL_API_BASE)
                    .unwrap_or_else(|| DEFAULT_PRINTFUL_API_BASE.to_string()),
            },
            website: WebsiteConfig {
                output_dir: get(WEBSITE_OUTPUT_DIR)
                    .map_or_else(|| PathBuf::from(DEFAULT_WEBSITE_OUTPUT_DIR), PathBuf::from),
            },
        }
    }

    /// Variables the given channel still needs.
    pub fn missing_vars(&self, channel: ChannelKind) -> Vec<&'static str> {
        match channel {
            ChannelKind::Etsy => self.etsy.missing_vars(),
            ChannelKind::Website => Vec::new(),
        }
    }

    pub fn require_channel(&self, channel: ChannelKind) -> Result<(), ConfigError> {
        let vars = self.missing_vars(channel);
        if vars.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingVars {
                channel: channel.to_string(),
                vars,
            })
        }
    }

    pub fn require_printful(&self) -> Result<(), ConfigError> {
        if self.printful.api_key.is_some() {
            Ok(())
        } else {
            Err(ConfigError::MissingVars {
                channel: "printful".to_string(),
                vars: vec![PRINTFUL_API_KEY],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);

        assert_eq!(config.etsy.api_base, DEFAULT_ETSY_API_BASE);
        assert_eq!(config.printful.api_base, DEFAULT_PRINTFUL_API_BASE);
        assert_eq!(
            config.website.output_dir,
            PathBuf::from(DEFAULT_WEBSITE_OUTPUT_DIR)
        );
        assert!(config.printful.api_key.is_none());
    }

    #[test]
    fn test_etsy_requires_all_three_credentials() {
        let config = config_from(&[(ETSY_API_KEY, "key"), (ETSY_SHOP_ID, "  ")]);

        assert_eq!(
            config.missing_vars(ChannelKind::Etsy),
            vec![ETSY_ACCESS_TOKEN, ETSY_SHOP_ID]
        );
        let err = config.require_channel(ChannelKind::Etsy).unwrap_err();
        assert_eq!(
            err.to_string(),
            "etsy is not configured; missing environment variables: ETSY_ACCESS_TOKEN, ETSY_SHOP_ID"
        );
    }

    #[test]
    fn test_complete_etsy_config() {
        let config = config_from(&[
            (ETSY_API_KEY, "key"),
            (ETSY_ACCESS_TOKEN, "token"),
            (ETSY_SHOP_ID, "123"),
        ]);

        assert!(config.etsy.is_complete());
        assert!(config.require_channel(ChannelKind::Etsy).is_ok());
    }

    #[test]
    fn test_website_never_needs_variables() {
        let config = config_from(&[(WEBSITE_OUTPUT_DIR, "/tmp/shop")]);

        assert!(config.require_channel(ChannelKind::Website).is_ok());
        assert_eq!(config.website.output_dir, PathBuf::from("/tmp/shop"));
    }

    #[test]
    fn test_printful_key() {
        assert!(config_from(&[]).require_printful().is_err());
        assert!(
            config_from(&[(PRINTFUL_API_KEY, "pk")])
                .require_printful()
                .is_ok()
        );
    }
}
