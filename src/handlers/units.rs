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
    middleware::{auth::AuthenticatedUser, rbac::RequireAdmin},
    models::registry::{Unit, UnitListing, UnitPayload},
};

// GET /api/units
#[utoipa::path(
    get,
    path = "/api/units",
    tag = "Cadastros",
    responses(
        (status = 200, description = "Unidades visíveis para o usuário", body = [UnitListing])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_units(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<UnitListing>>, AppError> {
    let units = app_state.registry_service.list_units(&user).await?;
    Ok(Json(units))
}

// POST /api/units
#[utoipa::path(
    post,
    path = "/api/units",
    tag = "Cadastros",
    request_body = UnitPayload,
    responses(
        (status = 201, description = "Unidade criada", body = Unit),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_unit(
    State(app_state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(payload): Json<UnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let unit = app_state.registry_service.create_unit(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

// PUT /api/units/{id}
#[utoipa::path(
    put,
    path = "/api/units/{id}",
    tag = "Cadastros",
    request_body = UnitPayload,
    params(("id" = Uuid, Path, description = "ID da unidade")),
    responses(
        (status = 200, description = "Unidade atualizada", body = Unit),
        (status = 404, description = "Unidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_unit(
    State(app_state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UnitPayload>,
) -> Result<Json<Unit>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let unit = app_state
        .registry_service
        .update_unit(&user, id, &payload)
        .await?;
    Ok(Json(unit))
}
