use serde::{Deserialize, Serialize};

use models::user;

use crate::crud::{EntityLabels, Validate};
use crate::errors::ServiceError;

pub const LABELS: EntityLabels = EntityLabels { singular: "user", plural: "users" };

pub const MIN_PASSWORD_LEN: usize = 8;

/// Sign-up and update input (plaintext password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for UserInput {
    fn validate(&self) -> Result<(), ServiceError> {
        user::validate_name(&self.name)?;
        user::validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        Ok(())
    }
}

/// Row as persisted: the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ServiceError> {
        user::validate_name(&self.name)?;
        user::validate_email(&self.email)?;
        if self.password_hash.is_empty() {
            return Err(ServiceError::Validation("password hash missing".into()));
        }
        Ok(())
    }
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// JWT claims; `sub` is the email, `uid` the user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: i32,
    pub iat: usize,
    pub exp: usize,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: user::Model,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_is_rejected() {
        let input = UserInput { name: "Bob".into(), email: "bob@mottu.com".into(), password: "short".into() };
        let err = input.validate().unwrap_err();
        assert_eq!(err.client_message().as_deref(), Some("password too short (>=8)"));
    }

    #[test]
    fn well_formed_input_passes() {
        let input = UserInput { name: "Bob".into(), email: "bob@mottu.com".into(), password: "Passw0rd".into() };
        assert!(input.validate().is_ok());
    }
}
