//! Create `magazines` table.
//!
//! Catalog root; plans hang off it. Title is unique so duplicate creation
//! surfaces as a storage conflict.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Magazines::Table)
                    .if_not_exists()
                    .col(pk_auto(Magazines::Id))
                    .col(string_len(Magazines::Title, 255).unique_key().not_null())
                    .col(text(Magazines::Description).not_null())
                    .col(timestamp_with_time_zone(Magazines::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Magazines::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Magazines { Table, Id, Title, Description, CreatedAt }
