//! Create `users` table.
//!
//! The login identifier is the primary key; passwords are stored as PHC hash strings.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string(Users::Id).primary_key())
                    .col(string(Users::Password))
                    .col(string(Users::Name).default(""))
                    .col(string(Users::Nickname).default(""))
                    .col(string_len(Users::Role, 16).default("STAFF"))
                    .col(string(Users::Email).default(""))
                    .col(string(Users::Phone).default(""))
                    .col(string(Users::Birthdate).default(""))
                    .col(string_null(Users::ProfileImage))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Id, Password, Name, Nickname, Role, Email, Phone, Birthdate, ProfileImage }
