//! Create `part` table (inventory, no relations).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Part::Table)
                    .if_not_exists()
                    .col(pk_auto(Part::Id))
                    .col(string_len(Part::Name, 128).not_null())
                    .col(string_len(Part::Code, 10).not_null())
                    .col(string_len(Part::Description, 1024).not_null())
                    .col(integer(Part::Stock).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Part::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Part { Table, Id, Name, Code, Description, Stock }
