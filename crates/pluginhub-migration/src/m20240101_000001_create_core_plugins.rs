use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CorePlugins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CorePlugins::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CorePlugins::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(CorePlugins::Active)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CorePlugins::InstallationDate).date_time().null())
                    .col(ColumnDef::new(CorePlugins::Version).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_s_core_plugins_name")
                    .table(CorePlugins::Table)
                    .col(CorePlugins::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CorePlugins::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CorePlugins {
    #[sea_orm(iden = "s_core_plugins")]
    Table,
    Id,
    Name,
    Active,
    InstallationDate,
    Version,
}
