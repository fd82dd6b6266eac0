//! Vehicle wiring: boundary input, SeaORM repository and service constructor.
//!
//! Reads load each vehicle's service records and the collaborator behind each one.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, LoaderTrait, Set};
use serde::{Deserialize, Serialize};

use models::graph::{ServiceWithCollaborator, VehicleGraph};
use models::vehicle::{self, VehicleModel, VehicleStatus};
use models::{collaborator, service_record};

use crate::crud::{CrudService, EntityLabels, Validate};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageQuery};
use crate::repository::{fetch_window, Fetch, Repository};

pub const LABELS: EntityLabels = EntityLabels { singular: "vehicle", plural: "vehicles" };

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleInput {
    pub plate: String,
    pub chassis: String,
    pub model: VehicleModel,
    pub status: VehicleStatus,
}

impl Validate for VehicleInput {
    fn validate(&self) -> Result<(), ServiceError> {
        vehicle::validate_plate(&self.plate)?;
        vehicle::validate_chassis(&self.chassis)?;
        Ok(())
    }
}

pub struct SeaOrmVehicleRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    async fn with_relations(&self, vehicles: Vec<vehicle::Model>) -> Result<Vec<VehicleGraph>, ServiceError> {
        if vehicles.is_empty() {
            return Ok(Vec::new());
        }
        let per_vehicle = vehicles.load_many(service_record::Entity, &self.db).await?;
        let flat: Vec<service_record::Model> = per_vehicle.iter().flatten().cloned().collect();
        let mut collaborators = if flat.is_empty() {
            Vec::new().into_iter()
        } else {
            flat.load_one(collaborator::Entity, &self.db).await?.into_iter()
        };

        let graphs = vehicles
            .into_iter()
            .zip(per_vehicle)
            .map(|(vehicle, services)| {
                let mut services: Vec<ServiceWithCollaborator> = services
                    .into_iter()
                    .map(|service| ServiceWithCollaborator { service, collaborator: collaborators.next().flatten() })
                    .collect();
                services.sort_by_key(|s| s.service.id);
                VehicleGraph { vehicle, services }
            })
            .collect();
        Ok(graphs)
    }

    async fn shape(&self, vehicles: Vec<vehicle::Model>, fetch: Fetch) -> Result<Vec<VehicleGraph>, ServiceError> {
        match fetch {
            Fetch::WithRelations => self.with_relations(vehicles).await,
            Fetch::Shallow => Ok(vehicles.into_iter().map(VehicleGraph::from).collect()),
        }
    }
}

#[async_trait]
impl Repository for SeaOrmVehicleRepository {
    type Entity = VehicleGraph;
    type Record = VehicleInput;

    async fn get_page(&self, query: PageQuery, fetch: Fetch) -> Result<Page<Vec<VehicleGraph>>, ServiceError> {
        let (rows, total) = fetch_window::<vehicle::Entity>(&self.db, query, vehicle::Column::Id).await?;
        Ok(Page::new(self.shape(rows, fetch).await?, query, total))
    }

    async fn get_by_id(&self, id: i32, fetch: Fetch) -> Result<Option<VehicleGraph>, ServiceError> {
        let Some(found) = vehicle::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.shape(vec![found], fetch).await?.pop())
    }

    async fn add(&self, record: VehicleInput) -> Result<VehicleGraph, ServiceError> {
        let am = vehicle::ActiveModel {
            plate: Set(record.plate),
            chassis: Set(record.chassis),
            model: Set(record.model),
            status: Set(record.status),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?.into())
    }

    async fn update(&self, id: i32, record: VehicleInput) -> Result<Option<VehicleGraph>, ServiceError> {
        let Some(found) = vehicle::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: vehicle::ActiveModel = found.into();
        am.plate = Set(record.plate);
        am.chassis = Set(record.chassis);
        am.model = Set(record.model);
        am.status = Set(record.status);
        let updated = am.update(&self.db).await?;
        Ok(self.shape(vec![updated], Fetch::WithRelations).await?.pop())
    }

    async fn delete(&self, id: i32) -> Result<Option<VehicleGraph>, ServiceError> {
        let Some(existing) = self.get_by_id(id, Fetch::WithRelations).await? else {
            return Ok(None);
        };
        vehicle::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(Some(existing))
    }
}

pub type VehicleService = CrudService<SeaOrmVehicleRepository>;

pub fn vehicle_service(db: DatabaseConnection) -> VehicleService {
    CrudService::new(Arc::new(SeaOrmVehicleRepository { db }), LABELS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(plate: &str) -> VehicleInput {
        VehicleInput {
            plate: plate.into(),
            chassis: "9BWZZZ377VT004251".into(),
            model: VehicleModel::MottuPop,
            status: VehicleStatus::Available,
        }
    }

    #[tokio::test]
    async fn vehicle_crud_service() -> Result<(), anyhow::Error> {
        let svc = vehicle_service(get_db().await?);

        let created = svc.create(input("ABC1D23")).await.into_value().unwrap();
        assert!(created.vehicle.id > 0);
        assert!(created.services.is_empty());

        let found = svc.get(created.vehicle.id).await.into_value().unwrap();
        assert_eq!(found.vehicle.plate, "ABC1D23");

        let mut replacement = input("XYZ9K88");
        replacement.model = VehicleModel::MottuE;
        replacement.status = VehicleStatus::Maintenance;
        let updated = svc.update(created.vehicle.id, replacement).await.into_value().unwrap();
        assert_eq!(updated.vehicle.id, created.vehicle.id);
        assert_eq!(updated.vehicle.plate, "XYZ9K88");
        assert_eq!(updated.vehicle.model, VehicleModel::MottuE);
        assert_eq!(updated.vehicle.status, VehicleStatus::Maintenance);

        let deleted = svc.delete(created.vehicle.id).await;
        assert!(deleted.is_success());
        assert_eq!(deleted.value(), Some(&None));
        assert_eq!(svc.get(created.vehicle.id).await.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn page_total_counts_whole_table() -> Result<(), anyhow::Error> {
        let svc = vehicle_service(get_db().await?);
        for plate in ["AAA0A01", "AAA0A02", "AAA0A03"] {
            assert!(svc.create(input(plate)).await.is_success());
        }

        let page = svc.list(PageQuery { offset: 1, limit: 1 }).await.into_value().unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].vehicle.plate, "AAA0A02");
        assert_eq!(page.total, 3);

        let past_end = svc.list(PageQuery { offset: 10, limit: 10 }).await;
        assert_eq!(past_end.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_plate_is_rejected() -> Result<(), anyhow::Error> {
        let svc = vehicle_service(get_db().await?);
        let r = svc.create(input("SHORT")).await;
        assert_eq!(r.status_code(), 400);
        assert_eq!(svc.list(PageQuery::default()).await.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn missing_vehicle_is_404_every_time() -> Result<(), anyhow::Error> {
        let svc = vehicle_service(get_db().await?);
        for _ in 0..2 {
            let r = svc.get(999).await;
            assert_eq!(r.status_code(), 404);
            assert_eq!(r.error(), Some("vehicle not found"));
        }
        Ok(())
    }
}
