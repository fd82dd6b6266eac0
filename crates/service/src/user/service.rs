use std::ops::Deref;
use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use rand::rngs::OsRng;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument, warn};

use models::user;

use crate::crud::{CrudService, Validate};
use crate::errors::ServiceError;
use crate::outcome::{status, OperationResult};

use super::domain::{AuthSession, Claims, LoginInput, NewUser, UserInput, LABELS};
use super::repository::SeaOrmUserRepository;

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Token signing configuration
#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub jwt_secret: String,
    pub ttl_hours: i64,
}

impl From<&configs::AuthConfig> for TokenConfig {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self { jwt_secret: cfg.jwt_secret.clone(), ttl_hours: cfg.token_ttl_hours }
    }
}

/// User CRUD with password hashing, plus login.
///
/// `list`, `get` and `delete` come straight from the wrapped `CrudService`.
#[derive(Clone)]
pub struct UserService {
    crud: CrudService<SeaOrmUserRepository>,
    tokens: TokenConfig,
}

impl Deref for UserService {
    type Target = CrudService<SeaOrmUserRepository>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

impl UserService {
    pub fn new(db: DatabaseConnection, tokens: TokenConfig) -> Self {
        Self { crud: CrudService::new(Arc::new(SeaOrmUserRepository { db }), LABELS), tokens }
    }

    /// Register a new user with a hashed password.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: UserInput) -> OperationResult<user::Model> {
        match self.hashed(input) {
            Ok(record) => self.crud.create(record).await,
            Err(failure) => failure,
        }
    }

    /// Full replace; the password is re-hashed.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn update(&self, id: i32, input: UserInput) -> OperationResult<user::Model> {
        match self.hashed(input) {
            Ok(record) => self.crud.update(id, record).await,
            Err(failure) => failure,
        }
    }

    /// Unknown email and wrong password are both 401; store failures are 500.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn authenticate(&self, input: LoginInput) -> OperationResult<AuthSession> {
        let found = match self.crud.repository().find_by_email(&input.email).await {
            Ok(found) => found,
            Err(e) => {
                error!(error = %e, "user lookup failed");
                return OperationResult::failure("error while fetching user");
            }
        };
        let Some(user) = found else {
            warn!("login for unknown email");
            return OperationResult::failure_with(INVALID_CREDENTIALS, status::UNAUTHORIZED);
        };

        match verify_password(&input.password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                warn!(user_id = user.id, "wrong password");
                return OperationResult::failure_with(INVALID_CREDENTIALS, status::UNAUTHORIZED);
            }
            Err(e) => {
                error!(user_id = user.id, error = %e, "stored hash unreadable");
                return OperationResult::failure("error while fetching user");
            }
        }

        match issue_token(&user, &self.tokens) {
            Ok(token) => {
                info!(user_id = user.id, "user_authenticated");
                OperationResult::success(AuthSession { user, token })
            }
            Err(e) => {
                error!(error = %e, "token signing failed");
                OperationResult::failure("error while issuing token")
            }
        }
    }

    fn hashed(&self, input: UserInput) -> Result<NewUser, OperationResult<user::Model>> {
        if let Err(e) = input.validate() {
            let message = e.client_message().unwrap_or_else(|| e.to_string());
            return Err(OperationResult::failure_with(message, status::BAD_REQUEST));
        }
        let password_hash = hash_password(&input.password).map_err(|e| {
            error!(error = %e, "password hashing failed");
            OperationResult::failure("error while saving user")
        })?;
        Ok(NewUser { name: input.name, email: input.email, password_hash })
    }
}

/// Argon2id hash with a random salt, as a PHC string.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Internal(e.to_string()))
}

/// Constant-time check of `password` against a stored PHC string.
pub fn verify_password(password: &str, phc: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(phc).map_err(|e| ServiceError::Internal(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

pub fn issue_token(user: &user::Model, cfg: &TokenConfig) -> Result<String, ServiceError> {
    let now = chrono::Utc::now();
    let expires = chrono::Duration::try_hours(cfg.ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| ServiceError::Internal(format!("token ttl of {} hours is out of range", cfg.ttl_hours)))?;
    let claims = Claims {
        sub: user.email.clone(),
        uid: user.id,
        iat: now.timestamp() as usize,
        exp: expires.timestamp() as usize,
    };
    encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()))
        .map_err(|e| ServiceError::Internal(e.to_string()))
}
