//! Create `products` table keyed by item code.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(string(Products::ItemCode).primary_key())
                    .col(string(Products::ProductName))
                    .col(string(Products::Brand))
                    .col(string(Products::Category))
                    .col(string(Products::Color))
                    .col(string(Products::Size))
                    // no CHECK (stock >= 0): stock writes are unconditional
                    .col(integer(Products::Stock).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Products { Table, ItemCode, ProductName, Brand, Category, Color, Size, Stock }
