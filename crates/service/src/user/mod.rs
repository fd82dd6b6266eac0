//! User module: three-layer layout (domain, repository, service).
//!
//! Users are ordinary CRUD rows whose password is stored as an argon2 hash,
//! plus a login operation that issues an HS256 token.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{AuthSession, Claims, LoginInput, NewUser, UserInput};
pub use repository::SeaOrmUserRepository;
pub use service::{TokenConfig, UserService};
