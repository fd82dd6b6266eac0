//! Collaborator wiring: boundary input, SeaORM repository and service constructor.
//!
//! Email and registration are unique. The service checks both before writing;
//! the unique indexes still decide when two writers race.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};

use models::graph::CollaboratorGraph;
use models::{collaborator, service_record, user};

use crate::crud::{CrudService, EntityLabels, Validate};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageQuery};
use crate::repository::{fetch_window, Fetch, Repository};

pub const LABELS: EntityLabels = EntityLabels { singular: "collaborator", plural: "collaborators" };

pub const EMAIL_TAKEN: &str = "another collaborator already uses this email";
pub const REGISTRATION_TAKEN: &str = "another collaborator already uses this registration";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorInput {
    pub name: String,
    pub registration: String,
    pub email: String,
}

impl Validate for CollaboratorInput {
    fn validate(&self) -> Result<(), ServiceError> {
        user::validate_name(&self.name)?;
        user::validate_email(&self.email)?;
        collaborator::validate_registration(&self.registration)?;
        Ok(())
    }
}

pub struct SeaOrmCollaboratorRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCollaboratorRepository {
    /// True when a row other than `id` already holds `email`.
    pub async fn exists_with_same_email(&self, id: Option<i32>, email: &str) -> Result<bool, ServiceError> {
        let mut q = collaborator::Entity::find().filter(collaborator::Column::Email.eq(email));
        if let Some(id) = id {
            q = q.filter(collaborator::Column::Id.ne(id));
        }
        Ok(q.count(&self.db).await? > 0)
    }

    /// True when a row other than `id` already holds `registration`.
    pub async fn exists_with_same_registration(&self, id: Option<i32>, registration: &str) -> Result<bool, ServiceError> {
        let mut q = collaborator::Entity::find().filter(collaborator::Column::Registration.eq(registration));
        if let Some(id) = id {
            q = q.filter(collaborator::Column::Id.ne(id));
        }
        Ok(q.count(&self.db).await? > 0)
    }

    async fn shape(&self, rows: Vec<collaborator::Model>, fetch: Fetch) -> Result<Vec<CollaboratorGraph>, ServiceError> {
        if fetch == Fetch::Shallow || rows.is_empty() {
            return Ok(rows.into_iter().map(CollaboratorGraph::from).collect());
        }
        let services = rows.load_many(service_record::Entity, &self.db).await?;
        Ok(rows
            .into_iter()
            .zip(services)
            .map(|(collaborator, mut services)| {
                services.sort_by_key(|s| s.id);
                CollaboratorGraph { collaborator, services }
            })
            .collect())
    }
}

#[async_trait]
impl Repository for SeaOrmCollaboratorRepository {
    type Entity = CollaboratorGraph;
    type Record = CollaboratorInput;

    async fn get_page(&self, query: PageQuery, fetch: Fetch) -> Result<Page<Vec<CollaboratorGraph>>, ServiceError> {
        let (rows, total) = fetch_window::<collaborator::Entity>(&self.db, query, collaborator::Column::Id).await?;
        Ok(Page::new(self.shape(rows, fetch).await?, query, total))
    }

    async fn get_by_id(&self, id: i32, fetch: Fetch) -> Result<Option<CollaboratorGraph>, ServiceError> {
        let Some(found) = collaborator::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.shape(vec![found], fetch).await?.pop())
    }

    async fn add(&self, record: CollaboratorInput) -> Result<CollaboratorGraph, ServiceError> {
        let am = collaborator::ActiveModel {
            name: Set(record.name),
            registration: Set(record.registration),
            email: Set(record.email),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?.into())
    }

    async fn update(&self, id: i32, record: CollaboratorInput) -> Result<Option<CollaboratorGraph>, ServiceError> {
        let Some(found) = collaborator::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: collaborator::ActiveModel = found.into();
        am.name = Set(record.name);
        am.registration = Set(record.registration);
        am.email = Set(record.email);
        let updated = am.update(&self.db).await?;
        Ok(self.shape(vec![updated], Fetch::WithRelations).await?.pop())
    }

    async fn delete(&self, id: i32) -> Result<Option<CollaboratorGraph>, ServiceError> {
        let Some(existing) = self.get_by_id(id, Fetch::WithRelations).await? else {
            return Ok(None);
        };
        collaborator::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(Some(existing))
    }

    async fn find_conflict(&self, id: Option<i32>, record: &CollaboratorInput) -> Result<Option<&'static str>, ServiceError> {
        if self.exists_with_same_email(id, &record.email).await? {
            return Ok(Some(EMAIL_TAKEN));
        }
        if self.exists_with_same_registration(id, &record.registration).await? {
            return Ok(Some(REGISTRATION_TAKEN));
        }
        Ok(None)
    }
}

pub type CollaboratorService = CrudService<SeaOrmCollaboratorRepository>;

pub fn collaborator_service(db: DatabaseConnection) -> CollaboratorService {
    CrudService::new(Arc::new(SeaOrmCollaboratorRepository { db }), LABELS)
}
