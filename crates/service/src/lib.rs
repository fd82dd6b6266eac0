//! Service layer providing business-oriented CRUD operations on top of models.
//! - Repositories do raw persistence and surface `ServiceError`.
//! - `CrudService` applies business rules and folds every outcome into an `OperationResult`.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod outcome;
pub mod pagination;
pub mod repository;
pub mod crud;

pub mod vehicle;
pub mod collaborator;
pub mod service_record;
pub mod part;
pub mod user;

#[cfg(test)]
pub mod test_support;

pub use crud::{CrudService, EntityLabels};
pub use errors::ServiceError;
pub use outcome::OperationResult;
pub use pagination::{Page, PageQuery};
pub use repository::{Fetch, Repository};
