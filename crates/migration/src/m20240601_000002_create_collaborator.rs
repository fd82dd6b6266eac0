//! Create `collaborator` table.
//! Email and registration are unique; the index is the authority for conflicts.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Collaborator::Table)
                    .if_not_exists()
                    .col(pk_auto(Collaborator::Id))
                    .col(string_len(Collaborator::Name, 128).not_null())
                    .col(string_len(Collaborator::Registration, 9).unique_key().not_null())
                    .col(string_len(Collaborator::Email, 255).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Collaborator::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Collaborator { Table, Id, Name, Registration, Email }
