use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::auth::{CreateUserPayload, SessionUser, UpdateUserPayload, UserListing},
};

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Usuários",
    responses(
        (status = 200, description = "Usuários da organização", body = [UserListing]),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Vec<UserListing>>, AppError> {
    let users = app_state.registry_service.list_users(&admin).await?;
    Ok(Json(users))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Usuários",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = SessionUser),
        (status = 409, description = "E-mail já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state.registry_service.create_user(&admin, &payload).await?;
    Ok((StatusCode::CREATED, Json(SessionUser::from(&user))))
}

// PUT /api/users/{id}
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Usuários",
    request_body = UpdateUserPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário atualizado", body = SessionUser),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<SessionUser>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .registry_service
        .update_user(&admin, id, &payload)
        .await?;
    Ok(Json(SessionUser::from(&user)))
}

// POST /api/users/{id}/deactivate — usuários nunca são removidos
#[utoipa::path(
    post,
    path = "/api/users/{id}/deactivate",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário desativado", body = SessionUser)
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_user(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionUser>, AppError> {
    let user = app_state
        .registry_service
        .set_user_active(&admin, id, false)
        .await?;
    Ok(Json(SessionUser::from(&user)))
}

// POST /api/users/{id}/activate
#[utoipa::path(
    post,
    path = "/api/users/{id}/activate",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário reativado", body = SessionUser)
    ),
    security(("api_jwt" = []))
)]
pub async fn activate_user(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionUser>, AppError> {
    let user = app_state
        .registry_service
        .set_user_active(&admin, id, true)
        .await?;
    Ok(Json(SessionUser::from(&user)))
}
