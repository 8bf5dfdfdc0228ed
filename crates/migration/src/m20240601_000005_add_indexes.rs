use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Plans: index on magazine_id
        manager
            .create_index(
                Index::create()
                    .name("idx_plan_magazine")
                    .table(Plans::Table)
                    .col(Plans::MagazineId)
                    .to_owned(),
            )
            .await?;

        // Subscriptions: index on user_id for the per-user listing
        manager
            .create_index(
                Index::create()
                    .name("idx_subscription_user")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .to_owned(),
            )
            .await?;

        // Subscriptions: index on plan_id
        manager
            .create_index(
                Index::create()
                    .name("idx_subscription_plan")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::PlanId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_plan_magazine").table(Plans::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_subscription_user").table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_subscription_plan").table(Subscriptions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Plans { Table, MagazineId }

#[derive(DeriveIden)]
enum Subscriptions { Table, UserId, PlanId }
