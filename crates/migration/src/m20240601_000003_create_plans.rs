//! Create `plans` table with FK to `magazines`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(pk_auto(Plans::Id))
                    .col(integer(Plans::MagazineId).not_null())
                    .col(string_len(Plans::Name, 128).not_null())
                    .col(double(Plans::Price).not_null())
                    .col(double(Plans::Discount).not_null().default(0.0))
                    .col(timestamp_with_time_zone(Plans::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plan_magazine")
                            .from(Plans::Table, Plans::MagazineId)
                            .to(Magazines::Table, Magazines::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Plans::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Plans { Table, Id, MagazineId, Name, Price, Discount, CreatedAt }

#[derive(DeriveIden)]
enum Magazines { Table, Id }
