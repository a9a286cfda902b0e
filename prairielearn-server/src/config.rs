//! Application configuration - paths, feature flags and secrets
//!
//! Configuration is loaded from environment variables:
//! - `NEWS_ITEMS_DIR`: directory holding one subdirectory per news item (default: ./news_items)
//! - `PL_SHARING_ENABLED`: show the question sharing panel (default: false)
//! - `PL_ENTERPRISE`: enterprise licensing text on the share modal (default: false)
//! - `PL_DEV_AUTHN_UID`: uid used when no `X-Authn-Uid` header is present (default: unset)
//! - `PL_CSRF_SECRET`: key for signing CSRF tokens

use std::path::PathBuf;

const DEFAULT_NEWS_ITEMS_DIR: &str = "news_items";
const DEFAULT_CSRF_SECRET: &str = "development-csrf-secret";

/// Application configuration shared by every request
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root directory for news item content
    pub news_items_dir: PathBuf,
    pub sharing_enabled: bool,
    pub enterprise: bool,
    /// Fallback authenticated user for local development
    pub dev_authn_uid: Option<String>,
    pub csrf_secret: String,
}

impl AppConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let news_items_dir = std::env::var("NEWS_ITEMS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_NEWS_ITEMS_DIR));

        let csrf_secret = std::env::var("PL_CSRF_SECRET").unwrap_or_else(|_| {
            tracing::warn!("PL_CSRF_SECRET not set, using the development secret");
            DEFAULT_CSRF_SECRET.to_string()
        });

        Self {
            news_items_dir,
            sharing_enabled: env_flag("PL_SHARING_ENABLED"),
            enterprise: env_flag("PL_ENTERPRISE"),
            dev_authn_uid: std::env::var("PL_DEV_AUTHN_UID")
                .ok()
                .filter(|uid| !uid.trim().is_empty()),
            csrf_secret,
        }
    }

    /// Create config with an explicit news items directory (for testing)
    pub fn with_news_items_dir(news_items_dir: PathBuf) -> Self {
        Self {
            news_items_dir,
            sharing_enabled: false,
            enterprise: false,
            dev_authn_uid: None,
            csrf_secret: DEFAULT_CSRF_SECRET.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(value), "{:?} should be true", value);
        }
        for value in ["", "0", "false", "off", "nope"] {
            assert!(!parse_flag(value), "{:?} should be false", value);
        }
    }

    #[test]
    fn test_config_has_everything_disabled() {
        let config = AppConfig::with_news_items_dir(PathBuf::from("/tmp/news"));
        assert_eq!(config.news_items_dir, PathBuf::from("/tmp/news"));
        assert!(!config.sharing_enabled);
        assert!(!config.enterprise);
        assert!(config.dev_authn_uid.is_none());
        assert!(!config.csrf_secret.is_empty());
    }
}
