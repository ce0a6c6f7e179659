//! Create `orders` table.
//!
//! Dates are stored as local-time text; status is free text defaulting to `pending`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(string(Orders::Company))
                    .col(string(Orders::ItemName))
                    .col(integer(Orders::Quantity))
                    .col(string(Orders::OrderDate).default(""))
                    .col(string(Orders::DueDate).default(""))
                    .col(string(Orders::Status).default("pending"))
                    .col(string(Orders::Contact).default(""))
                    .col(big_integer(Orders::Price).default(0))
                    .col(string(Orders::Note).default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Orders::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    Company,
    ItemName,
    Quantity,
    OrderDate,
    DueDate,
    Status,
    Contact,
    Price,
    Note,
}
