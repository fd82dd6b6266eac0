use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

use models::user;

use crate::errors::ServiceError;
use crate::pagination::{Page, PageQuery};
use crate::repository::{fetch_window, Fetch, Repository};

use super::domain::NewUser;

pub const EMAIL_TAKEN: &str = "another user already uses this email";

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    /// True when a row other than `id` already holds `email`.
    pub async fn exists_with_same_email(&self, id: Option<i32>, email: &str) -> Result<bool, ServiceError> {
        let mut q = user::Entity::find().filter(user::Column::Email.eq(email));
        if let Some(id) = id {
            q = q.filter(user::Column::Id.ne(id));
        }
        Ok(q.count(&self.db).await? > 0)
    }
}

#[async_trait]
impl Repository for SeaOrmUserRepository {
    type Entity = user::Model;
    type Record = NewUser;

    async fn get_page(&self, query: PageQuery, _fetch: Fetch) -> Result<Page<Vec<user::Model>>, ServiceError> {
        let (rows, total) = fetch_window::<user::Entity>(&self.db, query, user::Column::Id).await?;
        Ok(Page::new(rows, query, total))
    }

    async fn get_by_id(&self, id: i32, _fetch: Fetch) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn add(&self, record: NewUser) -> Result<user::Model, ServiceError> {
        let am = user::ActiveModel {
            name: Set(record.name),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, id: i32, record: NewUser) -> Result<Option<user::Model>, ServiceError> {
        let Some(found) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: user::ActiveModel = found.into();
        am.name = Set(record.name);
        am.email = Set(record.email);
        am.password_hash = Set(record.password_hash);
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
        let Some(found) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        user::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(Some(found))
    }

    async fn find_conflict(&self, id: Option<i32>, record: &NewUser) -> Result<Option<&'static str>, ServiceError> {
        if self.exists_with_same_email(id, &record.email).await? {
            return Ok(Some(EMAIL_TAKEN));
        }
        Ok(None)
    }
}
