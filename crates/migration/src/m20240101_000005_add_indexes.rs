use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Orders: "my orders" lookups filter by contact
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_contact")
                    .table(Orders::Table)
                    .col(Orders::Contact)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_orders_contact").table(Orders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Orders { Table, Contact }
