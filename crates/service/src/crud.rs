//! Generic CRUD business rules shared by every entity.

use std::sync::Arc;

use tracing::{error, instrument, warn};

use crate::errors::ServiceError;
use crate::outcome::{status, OperationResult};
use crate::pagination::{Page, PageQuery};
use crate::repository::{Fetch, Repository};

/// Boundary check run before a record reaches the repository.
pub trait Validate {
    fn validate(&self) -> Result<(), ServiceError>;
}

/// Names used to build client-facing messages.
#[derive(Clone, Copy, Debug)]
pub struct EntityLabels {
    pub singular: &'static str,
    pub plural: &'static str,
}

/// CRUD service over any repository.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::{CrudService, EntityLabels, PageQuery};
/// use service::part::PartInput;
/// use service::repository::mock::MockPartRepository;
///
/// let svc = CrudService::new(
///     Arc::new(MockPartRepository::default()),
///     EntityLabels { singular: "part", plural: "parts" },
/// );
/// let empty = tokio_test::block_on(svc.list(PageQuery::default()));
/// assert_eq!(empty.status_code(), 404);
///
/// let input = PartInput { name: "Brake pad".into(), code: "BP-01".into(), description: "front".into(), stock: 4 };
/// let created = tokio_test::block_on(svc.create(input)).into_value().unwrap();
/// assert_eq!(created.id, 1);
/// ```
pub struct CrudService<R: Repository> {
    repo: Arc<R>,
    labels: EntityLabels,
}

impl<R: Repository> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        Self { repo: self.repo.clone(), labels: self.labels }
    }
}

impl<R> CrudService<R>
where
    R: Repository,
    R::Record: Validate,
{
    pub fn new(repo: Arc<R>, labels: EntityLabels) -> Self { Self { repo, labels } }

    pub fn repository(&self) -> &Arc<R> { &self.repo }

    pub fn labels(&self) -> EntityLabels { self.labels }

    /// An empty window is reported as 404 rather than an empty success.
    #[instrument(skip(self), fields(entity = self.labels.singular))]
    pub async fn list(&self, query: PageQuery) -> OperationResult<Page<Vec<R::Entity>>> {
        if let Err(e) = query.validate() {
            return self.from_error(e, "fetching", self.labels.plural);
        }
        match self.repo.get_page(query, Fetch::default()).await {
            Ok(page) if page.is_empty() => {
                warn!(offset = query.offset, limit = query.limit, total = page.total, "empty page");
                OperationResult::failure_with(format!("no content for {}", self.labels.singular), status::NOT_FOUND)
            }
            Ok(page) => OperationResult::success(page),
            Err(e) => self.from_error(e, "fetching", self.labels.plural),
        }
    }

    #[instrument(skip(self), fields(entity = self.labels.singular))]
    pub async fn get(&self, id: i32) -> OperationResult<R::Entity> {
        match self.repo.get_by_id(id, Fetch::default()).await {
            Ok(Some(entity)) => OperationResult::success(entity),
            Ok(None) => self.not_found(),
            Err(e) => self.from_error(e, "fetching", self.labels.singular),
        }
    }

    #[instrument(skip(self, record), fields(entity = self.labels.singular))]
    pub async fn create(&self, record: R::Record) -> OperationResult<R::Entity> {
        if let Err(e) = record.validate() {
            return self.from_error(e, "saving", self.labels.singular);
        }
        match self.repo.find_conflict(None, &record).await {
            Ok(Some(message)) => return OperationResult::failure_with(message, status::CONFLICT),
            Ok(None) => {}
            Err(e) => return self.from_error(e, "saving", self.labels.singular),
        }
        match self.repo.add(record).await {
            Ok(entity) => OperationResult::success(entity),
            Err(e) => self.from_error(e, "saving", self.labels.singular),
        }
    }

    #[instrument(skip(self, record), fields(entity = self.labels.singular))]
    pub async fn update(&self, id: i32, record: R::Record) -> OperationResult<R::Entity> {
        if let Err(e) = record.validate() {
            return self.from_error(e, "updating", self.labels.singular);
        }
        match self.repo.get_by_id(id, Fetch::Shallow).await {
            Ok(Some(_)) => {}
            Ok(None) => return self.not_found(),
            Err(e) => return self.from_error(e, "updating", self.labels.singular),
        }
        match self.repo.find_conflict(Some(id), &record).await {
            Ok(Some(message)) => return OperationResult::failure_with(message, status::CONFLICT),
            Ok(None) => {}
            Err(e) => return self.from_error(e, "updating", self.labels.singular),
        }
        match self.repo.update(id, record).await {
            Ok(Some(entity)) => OperationResult::success(entity),
            Ok(None) => self.not_found(),
            Err(e) => self.from_error(e, "updating", self.labels.singular),
        }
    }

    /// Success carries no payload.
    #[instrument(skip(self), fields(entity = self.labels.singular))]
    pub async fn delete(&self, id: i32) -> OperationResult<Option<R::Entity>> {
        match self.repo.get_by_id(id, Fetch::Shallow).await {
            Ok(Some(_)) => {}
            Ok(None) => return self.not_found(),
            Err(e) => return self.from_error(e, "deleting", self.labels.singular),
        }
        match self.repo.delete(id).await {
            Ok(Some(_)) => OperationResult::success(None),
            Ok(None) => self.not_found(),
            Err(e) => self.from_error(e, "deleting", self.labels.singular),
        }
    }

    fn not_found<T>(&self) -> OperationResult<T> {
        OperationResult::failure_with(format!("{} not found", self.labels.singular), status::NOT_FOUND)
    }

    /// Raw error text goes to the log only; clients get a fixed message.
    fn from_error<T>(&self, err: ServiceError, action: &str, noun: &str) -> OperationResult<T> {
        let entity = self.labels.singular;
        match err {
            ServiceError::Conflict(detail) => {
                warn!(entity, %detail, "unique constraint rejected write");
                OperationResult::failure_with(format!("{entity} already exists"), status::CONFLICT)
            }
            ServiceError::NotFound(detail) => {
                warn!(entity, %detail, "write referenced a missing row");
                OperationResult::failure_with(format!("{entity} references a missing record"), status::NOT_FOUND)
            }
            e @ (ServiceError::Validation(_) | ServiceError::Model(_)) => {
                let message = e.client_message().unwrap_or_else(|| e.to_string());
                warn!(entity, %message, "rejected invalid input");
                OperationResult::failure_with(message, status::BAD_REQUEST)
            }
            e => {
                error!(entity, error = %e, "{action} failed");
                OperationResult::failure(format!("error while {action} {noun}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::PartInput;
    use crate::repository::mock::MockPartRepository;

    fn svc() -> CrudService<MockPartRepository> {
        CrudService::new(Arc::new(MockPartRepository::default()), EntityLabels { singular: "part", plural: "parts" })
    }

    fn input(code: &str) -> PartInput {
        PartInput { name: "Chain".into(), code: code.into(), description: "520 chain".into(), stock: 3 }
    }

    #[tokio::test]
    async fn empty_list_is_404() {
        let r = svc().list(PageQuery::default()).await;
        assert_eq!(r.status_code(), 404);
        assert_eq!(r.error(), Some("no content for part"));
    }

    #[tokio::test]
    async fn list_window_and_total() {
        let s = svc();
        for i in 0..5 {
            assert!(s.create(input(&format!("C{i}"))).await.is_success());
        }
        let page = s.list(PageQuery { offset: 1, limit: 2 }).await.into_value().unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, 2);
        assert_eq!(page.total, 5);
        assert_eq!((page.offset, page.limit), (1, 2));
    }

    #[tokio::test]
    async fn out_of_range_window_is_400() {
        let s = svc();
        assert!(s.create(input("A1")).await.is_success());
        let r = s.list(PageQuery { offset: u64::MAX, limit: 10 }).await;
        assert_eq!(r.status_code(), 400);
        assert!(r.error().unwrap().contains("offset and limit"));
        let r = s.list(PageQuery { offset: 0, limit: u64::MAX }).await;
        assert_eq!(r.status_code(), 400);
    }

    #[tokio::test]
    async fn missing_row_is_404_for_get_update_delete() {
        let s = svc();
        assert_eq!(s.get(42).await.status_code(), 404);
        assert_eq!(s.update(42, input("X")).await.status_code(), 404);
        let del = s.delete(42).await;
        assert_eq!(del.status_code(), 404);
        assert_eq!(del.error(), Some("part not found"));
        assert!(s.repository().is_empty());
    }

    #[tokio::test]
    async fn invalid_input_is_400_and_not_stored() {
        let s = svc();
        let mut bad = input("X");
        bad.stock = -1;
        let r = s.create(bad).await;
        assert_eq!(r.status_code(), 400);
        assert!(s.repository().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_and_delete_returns_no_payload() {
        let s = svc();
        let created = s.create(input("A1")).await.into_value().unwrap();
        let updated = s.update(created.id, input("B2")).await.into_value().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.code, "B2");

        let del = s.delete(created.id).await;
        assert_eq!(del, OperationResult::Success { value: None, status: 200 });
        assert_eq!(s.get(created.id).await.status_code(), 404);
    }

    #[tokio::test]
    async fn store_failure_is_500_with_fixed_message() {
        let s = svc();
        s.repository().set_broken(true);
        let r = s.list(PageQuery::default()).await;
        assert_eq!(r.status_code(), 500);
        assert_eq!(r.error(), Some("error while fetching parts"));
        let r = s.create(input("A1")).await;
        assert_eq!(r.error(), Some("error while saving part"));
    }
}
