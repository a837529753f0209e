//! Plugin list builder.
//!
//! Walks every configured composer type on the registry, drops blacklisted
//! packages, selects the version to advertise and merges it with the local
//! installation snapshot. Requests are issued one after another.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::CachedRegistryClient;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::installed::{DbInstalledPluginRepository, InstalledPluginRepository};
use crate::model::{
    InstalledPlugin, PackageFailure, PackageNameList, PackageVersion, Plugin, PluginList,
};
use crate::registry::{package_list_url, package_url, HttpRegistryClient, RegistryClient};
use crate::version::latest_version;

/// Builds the enriched plugin catalog.
pub struct PluginListService {
    registry: Arc<dyn RegistryClient>,
    installed: Arc<dyn InstalledPluginRepository>,
    config: CatalogConfig,
}

impl PluginListService {
    pub fn new(
        registry: Arc<dyn RegistryClient>,
        installed: Arc<dyn InstalledPluginRepository>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            registry,
            installed,
            config,
        }
    }

    /// Wire the production HTTP client and database repository.
    ///
    /// Wraps the HTTP client in a [`CachedRegistryClient`] when
    /// `cache_ttl_secs` is non-zero.
    pub fn from_config(db: DatabaseConnection, config: CatalogConfig) -> Result<Self, CatalogError> {
        config.validate()?;

        let http: Arc<dyn RegistryClient> = Arc::new(HttpRegistryClient::new(
            Duration::from_secs(config.http_timeout_secs),
        )?);
        let registry: Arc<dyn RegistryClient> = if config.cache_ttl_secs > 0 {
            Arc::new(CachedRegistryClient::new(
                http,
                Duration::from_secs(config.cache_ttl_secs),
            ))
        } else {
            http
        };
        let installed = Arc::new(DbInstalledPluginRepository::new(
            db,
            config.include_installed_inactive,
        ));

        Ok(Self::new(registry, installed, config))
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Build the full catalog across all configured categories.
    pub async fn get_plugin_list(&self) -> Result<PluginList, CatalogError> {
        let installed = self.installed.list_installed_or_active().await?;
        info!(
            installed = installed.len(),
            categories = self.config.categories.len(),
            "building plugin catalog"
        );

        let mut list = PluginList::default();
        for category in &self.config.categories {
            self.fetch_plugins_by_type(category, &installed, &mut list)
                .await?;
        }

        info!(
            plugins = list.plugins.len(),
            failures = list.failures.len(),
            "plugin catalog built"
        );
        Ok(list)
    }

    /// Append the plugins of one composer type to `list`.
    ///
    /// A failing package-name request aborts. Failures on a single package
    /// are recorded and skipped when `skip_failed_packages` is set.
    pub async fn fetch_plugins_by_type(
        &self,
        category: &str,
        installed: &[InstalledPlugin],
        list: &mut PluginList,
    ) -> Result<(), CatalogError> {
        let names = self.fetch_package_names(category).await?;
        let before = list.plugins.len();

        for name in names {
            if self.is_blacklisted(&name) {
                debug!(package = %name, "skipping blacklisted package");
                continue;
            }

            let versions = match self.fetch_package_versions(&name).await {
                Ok(versions) => versions,
                Err(e) if self.config.skip_failed_packages => {
                    warn!(package = %name, category = category, "skipping package: {e}");
                    list.failures.push(PackageFailure {
                        package: name,
                        category: category.to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(latest) = latest_version(&versions) else {
                debug!(package = %name, "package has no versions");
                continue;
            };
            let Some(install_name) = latest.install_name() else {
                debug!(package = %name, version = %latest.version, "missing installer-name");
                continue;
            };

            list.plugins.push(Plugin::from_version(
                &name,
                category,
                latest,
                install_name,
                installed,
                &self.config.registry_base_url,
            ));
        }

        debug!(
            category = category,
            added = list.plugins.len() - before,
            "category processed"
        );
        Ok(())
    }

    /// Whether a package name contains any blacklisted fragment.
    pub fn is_blacklisted(&self, name: &str) -> bool {
        self.config
            .blacklist
            .iter()
            .any(|fragment| name.contains(fragment.as_str()))
    }

    async fn fetch_package_names(&self, category: &str) -> Result<Vec<String>, CatalogError> {
        let url = package_list_url(&self.config.registry_base_url, category);
        let body: PackageNameList = serde_json::from_value(self.registry.fetch_json(&url).await?)?;
        Ok(body.package_names)
    }

    /// Version history of a package in registry order.
    async fn fetch_package_versions(&self, name: &str) -> Result<Vec<PackageVersion>, CatalogError> {
        let url = package_url(&self.config.registry_base_url, name);
        let mut body = self.registry.fetch_json(&url).await?;

        let versions = match body
            .get_mut("packages")
            .and_then(|packages| packages.get_mut(name))
            .map(Value::take)
        {
            Some(Value::Object(versions)) => versions,
            // PHP encodes an empty map as `[]`
            Some(Value::Array(entries)) if entries.is_empty() => return Ok(Vec::new()),
            _ => {
                return Err(CatalogError::MalformedResponse(format!(
                    "no version map for {name}"
                )))
            }
        };

        versions
            .into_iter()
            .map(|(key, entry)| {
                let mut version: PackageVersion = serde_json::from_value(entry)?;
                if version.version.is_empty() {
                    version.version = key;
                }
                Ok::<_, CatalogError>(version)
            })
            .collect()
    }
}
