use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ServiceRecord: lookups by vehicle ordered by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_service_record_vehicle_created")
                    .table(ServiceRecord::Table)
                    .col(ServiceRecord::VehicleId)
                    .col(ServiceRecord::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ServiceRecord: index on collaborator_id
        manager
            .create_index(
                Index::create()
                    .name("idx_service_record_collaborator")
                    .table(ServiceRecord::Table)
                    .col(ServiceRecord::CollaboratorId)
                    .to_owned(),
            )
            .await?;

        // Part: lookups by code
        manager
            .create_index(
                Index::create()
                    .name("idx_part_code")
                    .table(Part::Table)
                    .col(Part::Code)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_record_vehicle_created").table(ServiceRecord::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_record_collaborator").table(ServiceRecord::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_part_code").table(Part::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceRecord { Table, VehicleId, CollaboratorId, CreatedAt }

#[derive(DeriveIden)]
enum Part { Table, Code }
