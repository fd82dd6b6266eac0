//! Pagination carriers for the service layer
//!
//! `PageQuery` is the requested window, `Page` the answer. Windows are not
//! clamped; one outside the signed 64-bit range the SQL drivers bind is rejected.

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Largest offset or limit a query can carry.
pub const MAX_WINDOW: u64 = i64::MAX as u64;

/// Requested window over an ordered collection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 { 10 }

impl Default for PageQuery {
    fn default() -> Self { Self { offset: 0, limit: default_limit() } }
}

impl PageQuery {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.offset > MAX_WINDOW || self.limit > MAX_WINDOW {
            return Err(ServiceError::Validation(format!("offset and limit must not exceed {MAX_WINDOW}")));
        }
        Ok(())
    }
}

/// One window of data plus the size of the whole backing collection
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: T,
    pub offset: u64,
    pub limit: u64,
    /// Full collection count, independent of the window
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(data: T, query: PageQuery, total: u64) -> Self {
        Self { data, offset: query.offset, limit: query.limit, total }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Page<U> {
        Page { data: f(self.data), offset: self.offset, limit: self.limit, total: self.total }
    }
}

impl<T> Page<Vec<T>> {
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}
