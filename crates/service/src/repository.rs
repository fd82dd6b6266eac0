use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};

use crate::errors::ServiceError;
use crate::pagination::{Page, PageQuery};

/// Whether reads should eagerly load an entity's relation graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fetch {
    #[default]
    WithRelations,
    Shallow,
}

/// Raw persistence for one entity kind.
///
/// Absence is `Ok(None)`, never an error. Store failures propagate as
/// `ServiceError`; turning them into client outcomes is the service's job.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Read shape, possibly carrying eagerly loaded relations.
    type Entity: Send + Sync;
    /// Mutable fields accepted by `add` and `update`.
    type Record: Send + Sync;

    /// Rows ordered by id ascending, windowed; `total` counts the whole table.
    async fn get_page(&self, query: PageQuery, fetch: Fetch) -> Result<Page<Vec<Self::Entity>>, ServiceError>;
    async fn get_by_id(&self, id: i32, fetch: Fetch) -> Result<Option<Self::Entity>, ServiceError>;
    async fn add(&self, record: Self::Record) -> Result<Self::Entity, ServiceError>;
    /// Full replace of every mutable field; the id is preserved.
    async fn update(&self, id: i32, record: Self::Record) -> Result<Option<Self::Entity>, ServiceError>;
    /// Removes the row and returns its last known state.
    async fn delete(&self, id: i32) -> Result<Option<Self::Entity>, ServiceError>;

    /// Message for the first unique field that another row (id != `id`) already holds.
    async fn find_conflict(&self, _id: Option<i32>, _record: &Self::Record) -> Result<Option<&'static str>, ServiceError> {
        Ok(None)
    }
}

/// Ordered window plus an independent count of the whole table.
pub(crate) async fn fetch_window<E>(
    db: &DatabaseConnection,
    query: PageQuery,
    order_by: E::Column,
) -> Result<(Vec<E::Model>, u64), ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    query.validate()?;
    let total = E::find().count(db).await?;
    let rows = E::find()
        .order_by_asc(order_by)
        .offset(query.offset)
        .limit(query.limit)
        .all(db)
        .await?;
    Ok((rows, total))
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use crate::part::PartInput;

    /// Part repository kept in a map; `set_broken(true)` makes every call fail like a lost connection.
    #[derive(Default)]
    pub struct MockPartRepository {
        rows: Mutex<BTreeMap<i32, models::part::Model>>,
        next_id: Mutex<i32>,
        broken: AtomicBool,
    }

    impl MockPartRepository {
        pub fn set_broken(&self, broken: bool) {
            self.broken.store(broken, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("connection refused".into()));
            }
            Ok(())
        }

        fn to_model(id: i32, input: PartInput) -> models::part::Model {
            models::part::Model { id, name: input.name, code: input.code, description: input.description, stock: input.stock }
        }
    }

    #[async_trait]
    impl Repository for MockPartRepository {
        type Entity = models::part::Model;
        type Record = PartInput;

        async fn get_page(&self, query: PageQuery, _fetch: Fetch) -> Result<Page<Vec<Self::Entity>>, ServiceError> {
            self.check()?;
            let rows = self.rows.lock().unwrap();
            let data = rows
                .values()
                .skip(query.offset as usize)
                .take(query.limit as usize)
                .cloned()
                .collect();
            Ok(Page::new(data, query, rows.len() as u64))
        }

        async fn get_by_id(&self, id: i32, _fetch: Fetch) -> Result<Option<Self::Entity>, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn add(&self, record: Self::Record) -> Result<Self::Entity, ServiceError> {
            self.check()?;
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let model = Self::to_model(*next, record);
            self.rows.lock().unwrap().insert(model.id, model.clone());
            Ok(model)
        }

        async fn update(&self, id: i32, record: Self::Record) -> Result<Option<Self::Entity>, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&id) {
                Some(existing) => {
                    *existing = Self::to_model(id, record);
                    Ok(Some(existing.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, id: i32) -> Result<Option<Self::Entity>, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().remove(&id))
        }
    }
}
