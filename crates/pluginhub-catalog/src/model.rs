//! Registry payloads, local snapshots and the enriched plugin record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use pluginhub_db::entities::installed_plugin;

// ─── Registry payloads ──────────────────────────────────────────────────

/// Body of `/packages/list.json?type=…`.
#[derive(Debug, Deserialize)]
pub(crate) struct PackageNameList {
    #[serde(rename = "packageNames")]
    pub package_names: Vec<String>,
}

/// A package author as declared in `composer.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Source repository of a package version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageSource {
    #[serde(default)]
    pub url: Option<String>,
}

/// One entry of a package's version history.
///
/// Composer metadata is loosely typed in the wild, so every field except
/// the version tolerates `null` or absence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageVersion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(rename = "type", default)]
    pub package_type: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub license: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub source: Option<PackageSource>,
    /// Free-form `extra` section; packagist encodes an empty one as `[]`.
    #[serde(default)]
    pub extra: serde_json::Value,
}

impl PackageVersion {
    /// The shop-side plugin name declared under `extra.installer-name`.
    pub fn install_name(&self) -> Option<&str> {
        self.extra
            .get("installer-name")
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}

// ─── Local state ────────────────────────────────────────────────────────

/// A plugin row read from the shop database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPlugin {
    pub name: String,
    pub active: bool,
    pub installation_date: Option<NaiveDateTime>,
    pub version: String,
}

impl From<installed_plugin::Model> for InstalledPlugin {
    fn from(model: installed_plugin::Model) -> Self {
        Self {
            name: model.name,
            active: model.active,
            installation_date: model.installation_date,
            version: model.version,
        }
    }
}

/// Installation state of a catalog entry in the local shop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PluginState {
    #[default]
    NotInstalled,
    Installed,
    Active,
}

impl PluginState {
    /// Numeric code understood by the shop backend.
    pub fn code(self) -> u8 {
        match self {
            PluginState::NotInstalled => 0,
            PluginState::Installed => 1,
            PluginState::Active => 2,
        }
    }
}

impl Serialize for PluginState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

// ─── Catalog output ─────────────────────────────────────────────────────

/// A registry package enriched with local installation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub name: String,
    #[serde(rename = "type")]
    pub plugin_type: String,
    pub version: String,
    pub time: Option<String>,
    pub description: Option<String>,
    pub authors: Vec<Author>,
    pub homepage: Option<String>,
    pub license: Vec<String>,
    pub keywords: Vec<String>,
    pub install_name: String,
    pub url: String,
    pub repository: Option<String>,
    pub state: PluginState,
    pub current_version: Option<String>,
}

impl Plugin {
    /// Assemble a record from the selected version and the local snapshot.
    ///
    /// When several rows share the install name the last one wins.
    pub fn from_version(
        name: &str,
        category: &str,
        version: &PackageVersion,
        install_name: &str,
        installed: &[InstalledPlugin],
        registry_base_url: &str,
    ) -> Self {
        let local = installed.iter().filter(|p| p.name == install_name).last();
        let state = match local {
            Some(p) if p.active => PluginState::Active,
            Some(_) => PluginState::Installed,
            None => PluginState::NotInstalled,
        };

        Self {
            name: name.to_string(),
            plugin_type: version
                .package_type
                .clone()
                .unwrap_or_else(|| category.to_string()),
            version: version.version.clone(),
            time: version.time.clone(),
            description: version.description.clone(),
            authors: version.authors.clone(),
            homepage: version.homepage.clone(),
            license: version.license.clone(),
            keywords: version.keywords.clone(),
            install_name: install_name.to_string(),
            url: format!("{registry_base_url}/packages/{name}"),
            repository: version.source.as_ref().and_then(|s| s.url.clone()),
            state,
            current_version: local.map(|p| p.version.clone()),
        }
    }
}

/// A package skipped because its details could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageFailure {
    pub package: String,
    pub category: String,
    pub reason: String,
}

/// Result of one catalog build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PluginList {
    pub plugins: Vec<Plugin>,
    pub failures: Vec<PackageFailure>,
}
