pub mod auth;
pub mod errors;
pub mod openapi;
pub mod rate_limit;
pub mod routes;
pub mod startup;
pub mod state;

pub use routes::build_router;
pub use startup::{build_app, load_config, run};
pub use state::ServerState;
