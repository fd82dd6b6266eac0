use serde::Deserialize;
use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub checks: Vec<String>,
}

#[derive(ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// `offset`/`limit` query string accepted by every list endpoint.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Rows to skip (default 0)
    pub offset: Option<u64>,
    /// Page size (default 10)
    pub limit: Option<u64>,
}

#[derive(ToSchema)]
pub struct VehicleInputDoc {
    #[schema(example = "ABC1D23")]
    pub plate: String,
    #[schema(example = "9BWZZZ377VT004251")]
    pub chassis: String,
    #[schema(example = "MOTTU_SPORT")]
    pub model: String,
    #[schema(example = "DISPONIVEL")]
    pub status: String,
}

#[derive(ToSchema)]
pub struct CollaboratorInputDoc {
    pub name: String,
    #[schema(example = "RM123456")]
    pub registration: String,
    pub email: String,
}

#[derive(ToSchema)]
pub struct ServiceRecordInputDoc {
    pub description: String,
    /// Pendente, EmAndamento or Concluido; Pendente when omitted
    #[schema(example = "Pendente")]
    pub status: Option<String>,
    pub vehicle_id: i32,
    pub collaborator_id: i32,
}

#[derive(ToSchema)]
pub struct PartInputDoc {
    pub name: String,
    #[schema(example = "PN-001")]
    pub code: String,
    pub description: Option<String>,
    pub stock: i32,
}

#[derive(ToSchema)]
pub struct UserInputDoc {
    pub name: String,
    pub email: String,
    /// At least 8 characters
    pub password: String,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::live,
        crate::routes::health::ready,
        crate::routes::vehicles::list,
        crate::routes::vehicles::get,
        crate::routes::vehicles::create,
        crate::routes::vehicles::update,
        crate::routes::vehicles::delete,
        crate::routes::collaborators::list,
        crate::routes::collaborators::get,
        crate::routes::collaborators::create,
        crate::routes::collaborators::update,
        crate::routes::collaborators::delete,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::list_by_vehicle,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::parts::list,
        crate::routes::parts::get,
        crate::routes::parts::create,
        crate::routes::parts::update,
        crate::routes::parts::delete,
        crate::routes::users::list,
        crate::routes::users::get,
        crate::routes::users::create,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::users::login,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            VehicleInputDoc,
            CollaboratorInputDoc,
            ServiceRecordInputDoc,
            PartInputDoc,
            UserInputDoc,
            LoginRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "vehicle"),
        (name = "collaborator"),
        (name = "service", description = "Workshop service records"),
        (name = "part"),
        (name = "user")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/vehicle",
            "/api/vehicle/{id}",
            "/api/collaborator",
            "/api/service/vehicle/{vehicle_id}",
            "/api/part/{id}",
            "/api/user/auth",
            "/health/ready",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }
}
