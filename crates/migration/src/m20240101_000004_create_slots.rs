//! Create `slots` table: named layout rectangles with an active flag.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Slots::Table)
                    .if_not_exists()
                    .col(string(Slots::SlotId).primary_key())
                    .col(integer(Slots::X))
                    .col(integer(Slots::Y))
                    .col(integer(Slots::W))
                    .col(integer(Slots::H))
                    .col(boolean(Slots::IsActive).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Slots::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Slots { Table, SlotId, X, Y, W, H, IsActive }
