//! Service record (work order) wiring.
//!
//! Besides the generic CRUD surface this adds the per-vehicle listing, which
//! tells a missing vehicle (404) apart from a vehicle without services (204).

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use models::graph::ServiceRecordGraph;
use models::service_record::{self, ServiceStatus};
use models::{collaborator, vehicle};

use crate::crud::{CrudService, EntityLabels, Validate};
use crate::errors::ServiceError;
use crate::outcome::{status, OperationResult};
use crate::pagination::{Page, PageQuery};
use crate::repository::{fetch_window, Fetch, Repository};
use crate::vehicle::SeaOrmVehicleRepository;

pub const LABELS: EntityLabels = EntityLabels { singular: "service", plural: "services" };

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecordInput {
    pub description: String,
    #[serde(default)]
    pub status: ServiceStatus,
    pub vehicle_id: i32,
    pub collaborator_id: i32,
}

impl Validate for ServiceRecordInput {
    fn validate(&self) -> Result<(), ServiceError> {
        service_record::validate_description(&self.description)?;
        if self.vehicle_id <= 0 || self.collaborator_id <= 0 {
            return Err(ServiceError::Validation("vehicle_id and collaborator_id must be positive".into()));
        }
        Ok(())
    }
}

pub struct SeaOrmServiceRecordRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmServiceRecordRepository {
    /// Services of one vehicle, oldest first.
    pub async fn list_by_vehicle(&self, vehicle_id: i32) -> Result<Vec<ServiceRecordGraph>, ServiceError> {
        let rows = service_record::Entity::find()
            .filter(service_record::Column::VehicleId.eq(vehicle_id))
            .order_by_asc(service_record::Column::CreatedAt)
            .order_by_asc(service_record::Column::Id)
            .all(&self.db)
            .await?;
        self.shape(rows, Fetch::WithRelations).await
    }

    async fn shape(&self, rows: Vec<service_record::Model>, fetch: Fetch) -> Result<Vec<ServiceRecordGraph>, ServiceError> {
        if fetch == Fetch::Shallow || rows.is_empty() {
            return Ok(rows.into_iter().map(ServiceRecordGraph::from).collect());
        }
        let vehicles = rows.load_one(vehicle::Entity, &self.db).await?;
        let collaborators = rows.load_one(collaborator::Entity, &self.db).await?;
        Ok(rows
            .into_iter()
            .zip(vehicles.into_iter().zip(collaborators))
            .map(|(service, (vehicle, collaborator))| ServiceRecordGraph { service, vehicle, collaborator })
            .collect())
    }
}

#[async_trait]
impl Repository for SeaOrmServiceRecordRepository {
    type Entity = ServiceRecordGraph;
    type Record = ServiceRecordInput;

    async fn get_page(&self, query: PageQuery, fetch: Fetch) -> Result<Page<Vec<ServiceRecordGraph>>, ServiceError> {
        let (rows, total) = fetch_window::<service_record::Entity>(&self.db, query, service_record::Column::Id).await?;
        Ok(Page::new(self.shape(rows, fetch).await?, query, total))
    }

    async fn get_by_id(&self, id: i32, fetch: Fetch) -> Result<Option<ServiceRecordGraph>, ServiceError> {
        let Some(found) = service_record::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.shape(vec![found], fetch).await?.pop())
    }

    async fn add(&self, record: ServiceRecordInput) -> Result<ServiceRecordGraph, ServiceError> {
        let am = service_record::ActiveModel {
            description: Set(record.description),
            created_at: Set(Utc::now().into()),
            status: Set(record.status),
            vehicle_id: Set(record.vehicle_id),
            collaborator_id: Set(record.collaborator_id),
            ..Default::default()
        };
        let inserted = am.insert(&self.db).await?;
        self.shape(vec![inserted], Fetch::WithRelations)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::Internal("inserted service record was not returned".into()))
    }

    async fn update(&self, id: i32, record: ServiceRecordInput) -> Result<Option<ServiceRecordGraph>, ServiceError> {
        let Some(found) = service_record::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        // created_at is not a mutable field
        let mut am: service_record::ActiveModel = found.into();
        am.description = Set(record.description);
        am.status = Set(record.status);
        am.vehicle_id = Set(record.vehicle_id);
        am.collaborator_id = Set(record.collaborator_id);
        let updated = am.update(&self.db).await?;
        Ok(self.shape(vec![updated], Fetch::WithRelations).await?.pop())
    }

    async fn delete(&self, id: i32) -> Result<Option<ServiceRecordGraph>, ServiceError> {
        let Some(existing) = self.get_by_id(id, Fetch::WithRelations).await? else {
            return Ok(None);
        };
        service_record::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(Some(existing))
    }
}

/// Generic CRUD plus the per-vehicle listing.
#[derive(Clone)]
pub struct ServiceRecordService {
    crud: CrudService<SeaOrmServiceRecordRepository>,
    vehicles: Arc<SeaOrmVehicleRepository>,
}

impl Deref for ServiceRecordService {
    type Target = CrudService<SeaOrmServiceRecordRepository>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

impl ServiceRecordService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            crud: CrudService::new(Arc::new(SeaOrmServiceRecordRepository { db: db.clone() }), LABELS),
            vehicles: Arc::new(SeaOrmVehicleRepository { db }),
        }
    }

    /// 404 when the vehicle is missing, 204 when it has no services.
    #[instrument(skip(self))]
    pub async fn list_by_vehicle(&self, vehicle_id: i32) -> OperationResult<Vec<ServiceRecordGraph>> {
        match self.vehicles.get_by_id(vehicle_id, Fetch::Shallow).await {
            Ok(Some(_)) => {}
            Ok(None) => return OperationResult::failure_with("vehicle not found", status::NOT_FOUND),
            Err(e) => {
                warn!(error = %e, "vehicle lookup failed");
                return OperationResult::failure("error while fetching services");
            }
        }
        match self.crud.repository().list_by_vehicle(vehicle_id).await {
            Ok(services) if services.is_empty() => {
                OperationResult::failure_with("no services for this vehicle", status::NO_CONTENT)
            }
            Ok(services) => OperationResult::success(services),
            Err(e) => {
                warn!(error = %e, "service listing failed");
                OperationResult::failure("error while fetching services")
            }
        }
    }
}
