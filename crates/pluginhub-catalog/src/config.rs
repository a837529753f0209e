//! Catalog configuration.

use crate::error::CatalogError;

/// Public Packagist instance.
pub const DEFAULT_REGISTRY_BASE_URL: &str = "https://packagist.org";

/// Composer package types that identify shop plugins.
pub const DEFAULT_CATEGORIES: [&str; 4] = [
    "shopware-plugin",
    "shopware-core-plugin",
    "shopware-frontend-plugin",
    "shopware-backend-plugin",
];

/// Package name fragments that are never offered in the catalog.
pub const DEFAULT_BLACKLIST: [&str; 1] = ["shopec"];

/// Immutable configuration for building the plugin catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Registry root, without trailing slash.
    pub registry_base_url: String,
    /// Composer package types queried, in order.
    pub categories: Vec<String>,
    /// Substrings excluding a package name (case-sensitive).
    pub blacklist: Vec<String>,
    /// Skip packages whose details cannot be fetched instead of aborting
    /// the whole listing (default: true).
    pub skip_failed_packages: bool,
    /// Also treat inactive rows with an installation date as installed
    /// (default: false, only active rows are read).
    pub include_installed_inactive: bool,
    /// HTTP request timeout in seconds (default: 10).
    pub http_timeout_secs: u64,
    /// Lifetime of cached registry responses in seconds; 0 disables the
    /// cache (default: 0).
    pub cache_ttl_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            registry_base_url: DEFAULT_REGISTRY_BASE_URL.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            blacklist: DEFAULT_BLACKLIST.iter().map(|b| b.to_string()).collect(),
            skip_failed_packages: true,
            include_installed_inactive: false,
            http_timeout_secs: 10,
            cache_ttl_secs: 0,
        }
    }
}

impl CatalogConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            registry_base_url: std::env::var("REGISTRY_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.registry_base_url),
            categories: std::env::var("CATALOG_CATEGORIES")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.categories),
            blacklist: std::env::var("CATALOG_BLACKLIST")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.blacklist),
            skip_failed_packages: std::env::var("CATALOG_SKIP_FAILED_PACKAGES")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.skip_failed_packages),
            include_installed_inactive: std::env::var("CATALOG_INCLUDE_INSTALLED_INACTIVE")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.include_installed_inactive),
            http_timeout_secs: std::env::var("REGISTRY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
            cache_ttl_secs: std::env::var("REGISTRY_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
        }
    }

    /// Reject configurations that could never produce a listing.
    pub fn validate(&self) -> Result<(), CatalogError> {
        url::Url::parse(&self.registry_base_url).map_err(|e| {
            CatalogError::Config(format!(
                "invalid registry base URL '{}': {e}",
                self.registry_base_url
            ))
        })?;
        if self.categories.is_empty() {
            return Err(CatalogError::Config(
                "at least one plugin category is required".into(),
            ));
        }
        if self.blacklist.iter().any(|b| b.is_empty()) {
            return Err(CatalogError::Config(
                "blacklist entries must not be empty".into(),
            ));
        }
        if self.http_timeout_secs == 0 {
            return Err(CatalogError::Config(
                "registry timeout must be at least one second".into(),
            ));
        }
        Ok(())
    }
}

/// Read a boolean flag. Unrecognised values yield `None`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split a comma separated list, dropping blank entries.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.registry_base_url, "https://packagist.org");
        assert_eq!(config.categories.len(), 4);
        assert_eq!(config.categories[0], "shopware-plugin");
        assert_eq!(config.blacklist, vec!["shopec".to_string()]);
        assert!(config.skip_failed_packages);
        assert!(!config.include_installed_inactive);
        assert_eq!(config.cache_ttl_secs, 0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CatalogConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = CatalogConfig {
            registry_base_url: "not a url".into(),
            ..CatalogConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_no_categories() {
        let config = CatalogConfig {
            categories: vec![],
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_blacklist_entry() {
        // An empty fragment would match every package name.
        let config = CatalogConfig {
            blacklist: vec!["".into()],
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = CatalogConfig {
            http_timeout_secs: 0,
            ..CatalogConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CatalogError::Config(msg) if msg.contains("timeout")));
    }

    #[test]
    fn test_parse_flag() {
        for raw in ["true", "TRUE", "1", "yes", " On "] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["false", "False", "0", "no", "OFF"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag(""), None);
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("shopware-plugin, shopware-core-plugin ,,"),
            vec!["shopware-plugin".to_string(), "shopware-core-plugin".to_string()]
        );
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ").is_empty());
    }
}
