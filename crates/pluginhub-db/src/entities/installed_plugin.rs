use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A row of the shop's core plugin table.
///
/// Only the columns the catalog reads are mapped; the shop owns the table
/// and the catalog never writes to it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "s_core_plugins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub installation_date: Option<DateTime>,
    pub version: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
