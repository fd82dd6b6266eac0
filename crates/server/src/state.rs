use sea_orm::DatabaseConnection;

use service::collaborator::{collaborator_service, CollaboratorService};
use service::part::{part_service, PartService};
use service::service_record::ServiceRecordService;
use service::user::{TokenConfig, UserService};
use service::vehicle::{vehicle_service, VehicleService};

use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    /// Require a bearer token on `/api` routes.
    pub protect_api: bool,
}

/// Everything a handler needs; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub vehicles: VehicleService,
    pub collaborators: CollaboratorService,
    pub services: ServiceRecordService,
    pub parts: PartService,
    pub users: UserService,
    pub limiter: RateLimiter,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &configs::AppConfig) -> Self {
        Self {
            vehicles: vehicle_service(db.clone()),
            collaborators: collaborator_service(db.clone()),
            services: ServiceRecordService::new(db.clone()),
            parts: part_service(db.clone()),
            users: UserService::new(db.clone(), TokenConfig::from(&cfg.auth)),
            limiter: RateLimiter::from_config(&cfg.rate_limit),
            auth: ServerAuthConfig { jwt_secret: cfg.auth.jwt_secret.clone(), protect_api: cfg.auth.protect_api },
            db,
        }
    }
}
