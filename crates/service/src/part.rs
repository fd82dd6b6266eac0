//! Part inventory wiring. Parts have no relations and no unique fields.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};

use models::{part, user};

use crate::crud::{CrudService, EntityLabels, Validate};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageQuery};
use crate::repository::{fetch_window, Fetch, Repository};

pub const LABELS: EntityLabels = EntityLabels { singular: "part", plural: "parts" };

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartInput {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub stock: i32,
}

impl Validate for PartInput {
    fn validate(&self) -> Result<(), ServiceError> {
        user::validate_name(&self.name)?;
        part::validate_code(&self.code)?;
        part::validate_description(&self.description)?;
        part::validate_stock(self.stock)?;
        Ok(())
    }
}

pub struct SeaOrmPartRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl Repository for SeaOrmPartRepository {
    type Entity = part::Model;
    type Record = PartInput;

    async fn get_page(&self, query: PageQuery, _fetch: Fetch) -> Result<Page<Vec<part::Model>>, ServiceError> {
        let (rows, total) = fetch_window::<part::Entity>(&self.db, query, part::Column::Id).await?;
        Ok(Page::new(rows, query, total))
    }

    async fn get_by_id(&self, id: i32, _fetch: Fetch) -> Result<Option<part::Model>, ServiceError> {
        Ok(part::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn add(&self, record: PartInput) -> Result<part::Model, ServiceError> {
        let am = part::ActiveModel {
            name: Set(record.name),
            code: Set(record.code),
            description: Set(record.description),
            stock: Set(record.stock),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, id: i32, record: PartInput) -> Result<Option<part::Model>, ServiceError> {
        let Some(found) = part::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: part::ActiveModel = found.into();
        am.name = Set(record.name);
        am.code = Set(record.code);
        am.description = Set(record.description);
        am.stock = Set(record.stock);
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: i32) -> Result<Option<part::Model>, ServiceError> {
        let Some(found) = part::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        part::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(Some(found))
    }
}

pub type PartService = CrudService<SeaOrmPartRepository>;

pub fn part_service(db: DatabaseConnection) -> PartService {
    CrudService::new(Arc::new(SeaOrmPartRepository { db }), LABELS)
}
