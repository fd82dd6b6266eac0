//! Create `service_record` table with FKs to `vehicle` and `collaborator`.
//!
//! Deleting either parent removes its service records.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceRecord::Id))
                    .col(string_len(ServiceRecord::Description, 1024).not_null())
                    .col(timestamp_with_time_zone(ServiceRecord::CreatedAt).not_null())
                    .col(string_len(ServiceRecord::Status, 32).not_null())
                    .col(integer(ServiceRecord::VehicleId).not_null())
                    .col(integer(ServiceRecord::CollaboratorId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_record_vehicle")
                            .from(ServiceRecord::Table, ServiceRecord::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_record_collaborator")
                            .from(ServiceRecord::Table, ServiceRecord::CollaboratorId)
                            .to(Collaborator::Table, Collaborator::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceRecord { Table, Id, Description, CreatedAt, Status, VehicleId, CollaboratorId }

#[derive(DeriveIden)]
enum Vehicle { Table, Id }

#[derive(DeriveIden)]
enum Collaborator { Table, Id }
