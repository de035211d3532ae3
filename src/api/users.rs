use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Serialize;

use crate::{
    database::MongoDB,
    models::{UserPayload, UserRecord},
    services::user_service,
    utils::error::UserError,
};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

fn error_response(err: &UserError) -> HttpResponse {
    let body = ErrorBody {
        error: err.to_string(),
    };
    match err {
        UserError::Invalid(_) => HttpResponse::BadRequest().json(body),
        UserError::Duplicate(_) => HttpResponse::Conflict().json(body),
        UserError::NotFound(_) => HttpResponse::NotFound().json(body),
        UserError::Unavailable(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// GET /api/users - Lists every directory record
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All directory records", body = [UserRecord]),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
#[get("")]
pub async fn get_users(db: web::Data<MongoDB>) -> impl Responder {
    match user_service::list_users(&db).await {
        Ok(users) => {
            let records: Vec<UserRecord> = users.into_iter().map(UserRecord::from).collect();
            log::info!("📋 GET /users - {} records", records.len());
            HttpResponse::Ok().json(records)
        }
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            error_response(&e)
        }
    }
}

/// POST /api/users - Creates a record; role defaults to `employee`
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Created record", body = UserRecord),
        (status = 400, description = "Missing field or unknown role", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
#[post("")]
pub async fn create_user(
    db: web::Data<MongoDB>,
    payload: web::Json<UserPayload>,
) -> impl Responder {
    log::info!("📝 POST /users - Adding {}", payload.email);

    match user_service::create_user(&db, payload.into_inner()).await {
        Ok(user) => HttpResponse::Created().json(UserRecord::from(user)),
        Err(e) => {
            log::warn!("⚠️ Failed to create user: {}", e);
            error_response(&e)
        }
    }
}

/// PUT /api/users/{id} - Replaces name, email and role
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Record id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated record", body = UserRecord),
        (status = 400, description = "Missing field or unknown role", body = ErrorBody),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
#[put("/{id}")]
pub async fn update_user(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> impl Responder {
    log::info!("🔧 PUT /users/{}", id);

    match user_service::update_user(&db, &id, payload.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserRecord::from(user)),
        Err(e) => {
            log::warn!("⚠️ Failed to update user {}: {}", id, e);
            error_response(&e)
        }
    }
}

/// DELETE /api/users/{id} - Removes a record. Idempotent: deleting an
/// already-missing record still reports success.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record removed (or was already gone)", body = DeleteResponse),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
#[delete("/{id}")]
pub async fn delete_user(db: web::Data<MongoDB>, id: web::Path<String>) -> impl Responder {
    log::info!("🗑️  DELETE /users/{}", id);

    match user_service::delete_user(&db, &id).await {
        Ok(()) | Err(UserError::NotFound(_)) => HttpResponse::Ok().json(DeleteResponse {
            message: "User deleted".to_string(),
        }),
        Err(e) => {
            log::error!("❌ Error deleting user {}: {}", id, e);
            error_response(&e)
        }
    }
}
