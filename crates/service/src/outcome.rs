//! Tagged success/failure outcome returned by every service operation.
//!
//! A success always carries a value and a failure always carries an error
//! message; the enum makes any other combination unrepresentable.

/// HTTP-style status codes used by service outcomes.
pub mod status {
    pub const OK: u16 = 200;
    pub const NO_CONTENT: u16 = 204;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const INTERNAL: u16 = 500;
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult<T> {
    Success { value: T, status: u16 },
    Failure { error: String, status: u16 },
}

impl<T> OperationResult<T> {
    pub fn success(value: T) -> Self {
        Self::success_with(value, status::OK)
    }

    pub fn success_with(value: T, status: u16) -> Self {
        Self::Success { value, status }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::failure_with(error, status::INTERNAL)
    }

    pub fn failure_with(error: impl Into<String>, status: u16) -> Self {
        Self::Failure { error: error.into(), status }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        match self {
            Self::Success { value, status } => OperationResult::Success { value: f(value), status },
            Self::Failure { error, status } => OperationResult::Failure { error, status },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_defaults_to_200() {
        let r = OperationResult::success(7);
        assert!(r.is_success());
        assert_eq!(r.value(), Some(&7));
        assert_eq!(r.error(), None);
        assert_eq!(r.status_code(), 200);
    }

    #[test]
    fn failure_defaults_to_500() {
        let r: OperationResult<i32> = OperationResult::failure("boom");
        assert!(!r.is_success());
        assert_eq!(r.value(), None);
        assert_eq!(r.error(), Some("boom"));
        assert_eq!(r.status_code(), 500);
    }

    #[test]
    fn explicit_status_is_kept() {
        let r: OperationResult<()> = OperationResult::failure_with("none", status::NO_CONTENT);
        assert_eq!(r.status_code(), 204);
        let created = OperationResult::success_with("x", status::OK);
        assert_eq!(created.into_value(), Some("x"));
    }

    #[test]
    fn map_preserves_tag_and_status() {
        let ok = OperationResult::success_with(2, status::OK).map(|v| v * 10);
        assert_eq!(ok, OperationResult::Success { value: 20, status: 200 });
        let err: OperationResult<i32> = OperationResult::failure_with("gone", status::NOT_FOUND);
        assert_eq!(err.map(|v| v + 1).status_code(), 404);
    }
}
