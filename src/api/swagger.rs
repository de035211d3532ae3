use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Company Directory API",
        version = "1.0.0",
        description = "REST API for the internal company directory: list, add, edit and remove employee records (name, email, role).",
    ),
    paths(
        crate::api::health::health_check,
        crate::api::users::get_users,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::users::ErrorBody,
            crate::api::users::DeleteResponse,
            crate::models::user::Role,
            crate::models::user::UserPayload,
            crate::models::user::UserRecord,
        )
    ),
    tags(
        (name = "Health", description = "Liveness check for monitoring."),
        (name = "Users", description = "Directory records: list, create, update and delete employees.")
    )
)]
pub struct ApiDoc;
