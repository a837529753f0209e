//! Latest-version selection over a registry version history.
//!
//! No semantic version comparison is done: the registry's own ordering
//! decides, newest entries last.

use crate::model::PackageVersion;

/// Whether a version string denotes a development build.
pub fn is_dev_version(version: &str) -> bool {
    version.contains("dev")
}

/// Pick the version to advertise from a history in registry order.
///
/// Scans from the newest entry backwards and returns the first one that is
/// not a development build. When every entry is a development build the
/// first entry of the registry ordering is returned. `None` only for an
/// empty history.
pub fn latest_version(versions: &[PackageVersion]) -> Option<&PackageVersion> {
    versions
        .iter()
        .rev()
        .find(|v| !is_dev_version(&v.version))
        .or_else(|| versions.first())
}
