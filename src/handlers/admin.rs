// Rotas de bootstrap, sem autenticação: existem para levantar um banco
// vazio que ainda não tem usuário algum.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::{common::error::AppError, config::AppState};

// GET /api/admin/database-status
#[utoipa::path(
    get,
    path = "/api/admin/database-status",
    tag = "Bootstrap",
    responses(
        (status = 200, description = "Situação do esquema do banco")
    )
)]
pub async fn database_status(
    State(app_state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let initialized = app_state.seed_service.database_initialized().await?;
    Ok(Json(json!({
        "success": true,
        "initialized": initialized,
    })))
}

// POST /api/admin/seed — carga de demonstração; recusa rodar duas vezes
#[utoipa::path(
    post,
    path = "/api/admin/seed",
    tag = "Bootstrap",
    responses(
        (status = 200, description = "Carga de demonstração concluída"),
        (status = 409, description = "O banco já foi populado")
    )
)]
pub async fn seed(State(app_state): State<AppState>) -> Result<Json<Value>, AppError> {
    app_state.seed_service.seed_demo_data().await?;
    Ok(Json(json!({
        "success": true,
        "message": "Seed concluído com sucesso",
    })))
}

// POST /api/admin/test-user — garante a organização e o admin de teste
#[utoipa::path(
    post,
    path = "/api/admin/test-user",
    tag = "Bootstrap",
    responses(
        (status = 201, description = "Usuário de teste criado"),
        (status = 200, description = "Usuário de teste já existia")
    )
)]
pub async fn test_user(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let created = app_state.seed_service.ensure_test_admin().await?;

    let (status, message) = if created {
        (StatusCode::CREATED, "Usuário de teste criado com sucesso")
    } else {
        (StatusCode::OK, "Usuário de teste já existia")
    };

    Ok((status, Json(json!({ "message": message, "created": created }))))
}
