//! pluginhub plugin catalog
//!
//! Builds the list of shop plugins available on a composer registry
//! (Packagist), annotated with the local installation state read from the
//! shop database. The registry and the database are reached through the
//! [`RegistryClient`] and [`InstalledPluginRepository`] traits so either can
//! be replaced in tests.

pub mod cache;
pub mod config;
pub mod error;
pub mod installed;
pub mod model;
pub mod registry;
pub mod service;
pub mod version;

pub use cache::CachedRegistryClient;
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use installed::{DbInstalledPluginRepository, InstalledPluginRepository};
pub use model::{
    Author, InstalledPlugin, PackageFailure, PackageVersion, Plugin, PluginList, PluginState,
};
pub use registry::{HttpRegistryClient, RegistryClient};
pub use service::PluginListService;
pub use version::{is_dev_version, latest_version};
