use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ServiceInfoResponse { pub name: String, pub version: String }

/// Request body for create and update. Any further scalar keys are stored as attributes.
#[derive(ToSchema)]
pub struct AccountInputDoc {
    #[schema(max_length = 64, example = "Alice")]
    pub name: String,
}

/// Serialized account: id, name, plus every stored attribute at top level.
#[derive(ToSchema)]
pub struct AccountDoc {
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Account REST API Service", version = "1.0"),
    paths(
        crate::routes::meta::health,
        crate::routes::meta::index,
        crate::routes::accounts::create,
        crate::routes::accounts::read,
        crate::routes::accounts::update,
        crate::routes::accounts::delete,
        crate::routes::accounts::list,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceInfoResponse,
            AccountInputDoc,
            AccountDoc,
        )
    ),
    tags(
        (name = "meta"),
        (name = "accounts")
    )
)]
pub struct ApiDoc;
