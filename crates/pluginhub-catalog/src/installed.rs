//! Local installation state lookup.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter};

use crate::error::CatalogError;
use crate::model::InstalledPlugin;
use pluginhub_db::entities::installed_plugin;

/// Read-only source of locally installed plugins.
#[async_trait]
pub trait InstalledPluginRepository: Send + Sync + 'static {
    /// Snapshot of plugins that are active or otherwise installed.
    async fn list_installed_or_active(&self) -> Result<Vec<InstalledPlugin>, CatalogError>;
}

/// Repository backed by the shop's `s_core_plugins` table.
///
/// By default only active rows are read. The shop's own listing query
/// compared `installation_date != NULL`, which never matches, so inactive
/// installed plugins were never reported; `include_installed_inactive`
/// switches to `installation_date IS NOT NULL`.
pub struct DbInstalledPluginRepository {
    db: DatabaseConnection,
    include_installed_inactive: bool,
}

impl DbInstalledPluginRepository {
    pub fn new(db: DatabaseConnection, include_installed_inactive: bool) -> Self {
        Self {
            db,
            include_installed_inactive,
        }
    }

    fn condition(&self) -> Condition {
        let condition = Condition::any().add(installed_plugin::Column::Active.eq(true));
        if self.include_installed_inactive {
            condition.add(installed_plugin::Column::InstallationDate.is_not_null())
        } else {
            condition
        }
    }
}

#[async_trait]
impl InstalledPluginRepository for DbInstalledPluginRepository {
    async fn list_installed_or_active(&self) -> Result<Vec<InstalledPlugin>, CatalogError> {
        let rows = installed_plugin::Entity::find()
            .filter(self.condition())
            .all(&self.db)
            .await?;

        tracing::debug!(count = rows.len(), "loaded installed plugins");
        Ok(rows.into_iter().map(InstalledPlugin::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait};

    fn row(id: i32, name: &str, active: bool, version: &str) -> installed_plugin::Model {
        installed_plugin::Model {
            id,
            name: name.into(),
            active,
            installation_date: None,
            version: version.into(),
        }
    }

    fn sql_for(include_installed_inactive: bool) -> String {
        let repo = DbInstalledPluginRepository::new(
            sea_orm::DatabaseConnection::Disconnected,
            include_installed_inactive,
        );
        installed_plugin::Entity::find()
            .filter(repo.condition())
            .build(DatabaseBackend::MySql)
            .sql
    }

    #[test]
    fn test_condition_active_only_by_default() {
        let sql = sql_for(false);
        let (_, filter) = sql.split_once(" WHERE ").unwrap();
        assert!(filter.contains("`active` = ?"), "{sql}");
        assert!(!filter.contains("installation_date"), "{sql}");
        assert!(!filter.contains(" OR "), "{sql}");
    }

    #[test]
    fn test_condition_includes_installed_inactive() {
        let sql = sql_for(true);
        let (_, filter) = sql.split_once(" WHERE ").unwrap();
        assert!(filter.contains("`active` = ?"), "{sql}");
        assert!(filter.contains("`installation_date` IS NOT NULL"), "{sql}");
        assert!(filter.contains(" OR "), "{sql}");
    }

    #[tokio::test]
    async fn test_list_installed_or_active_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![
                row(1, "demoinstaller", true, "1.2.0"),
                row(2, "SwagPaypal", true, "3.0.1"),
            ]])
            .into_connection();

        let repo = DbInstalledPluginRepository::new(db, false);
        let plugins = repo.list_installed_or_active().await.unwrap();

        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins[0].name, "demoinstaller");
        assert!(plugins[0].active);
        assert_eq!(plugins[0].version, "1.2.0");
        assert_eq!(plugins[1].name, "SwagPaypal");
    }

    #[tokio::test]
    async fn test_list_installed_or_active_db_error() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_errors([sea_orm::DbErr::Custom("table missing".into())])
            .into_connection();

        let repo = DbInstalledPluginRepository::new(db, false);
        let err = repo.list_installed_or_active().await.unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
    }
}
