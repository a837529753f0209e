//! Schema for standalone deployments.
//!
//! In production the shop owns `s_core_plugins`; these migrations only
//! create it when absent so a development database can be seeded.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_core_plugins;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_core_plugins::Migration)]
    }
}
