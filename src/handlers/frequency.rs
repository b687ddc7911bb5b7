// Handlers do fluxo da folha de frequência mensal.

use axum::{
    extract::{Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::frequency::{FrequencySheet, SheetPayload, SheetQuery, SheetView},
};

// GET /api/frequency/sheet?unitId&month&year
#[utoipa::path(
    get,
    path = "/api/frequency/sheet",
    tag = "Frequência",
    params(
        ("unitId" = Uuid, Query, description = "ID da unidade"),
        ("month" = i32, Query, description = "Mês (1 a 12)"),
        ("year" = i32, Query, description = "Ano")
    ),
    responses(
        (status = 200, description = "Folha do período (sheet nulo = ainda não iniciada)", body = SheetView),
        (status = 403, description = "Unidade fora do escopo do usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn load_sheet(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<SheetQuery>,
) -> Result<Json<SheetView>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let view = app_state
        .frequency_service
        .load_sheet(&user, query.unit_id, query.month, query.year)
        .await?;
    Ok(Json(view))
}

// GET /api/frequency/sheet/previous?unitId&month&year — nada é persistido;
// o cliente usa a resposta para sobrescrever o rascunho em memória.
#[utoipa::path(
    get,
    path = "/api/frequency/sheet/previous",
    tag = "Frequência",
    params(
        ("unitId" = Uuid, Query, description = "ID da unidade"),
        ("month" = i32, Query, description = "Mês de referência (1 a 12)"),
        ("year" = i32, Query, description = "Ano de referência")
    ),
    responses(
        (status = 200, description = "Folha do período anterior", body = SheetView),
        (status = 404, description = "Não há folha no mês anterior")
    ),
    security(("api_jwt" = []))
)]
pub async fn load_previous_sheet(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<SheetQuery>,
) -> Result<Json<SheetView>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let view = app_state
        .frequency_service
        .load_previous_sheet(&user, query.unit_id, query.month, query.year)
        .await?;
    Ok(Json(view))
}

// POST /api/frequency/draft
#[utoipa::path(
    post,
    path = "/api/frequency/draft",
    tag = "Frequência",
    request_body = SheetPayload,
    responses(
        (status = 200, description = "Rascunho salvo", body = FrequencySheet)
    ),
    security(("api_jwt" = []))
)]
pub async fn save_draft(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<SheetPayload>,
) -> Result<Json<FrequencySheet>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sheet = app_state.frequency_service.save_draft(&user, &payload).await?;
    Ok(Json(sheet))
}

// POST /api/frequency/finalize — salva o rascunho e envia, na mesma transação
#[utoipa::path(
    post,
    path = "/api/frequency/finalize",
    tag = "Frequência",
    request_body = SheetPayload,
    responses(
        (status = 200, description = "Folha enviada", body = FrequencySheet)
    ),
    security(("api_jwt" = []))
)]
pub async fn finalize(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<SheetPayload>,
) -> Result<Json<FrequencySheet>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sheet = app_state.frequency_service.finalize(&user, &payload).await?;
    Ok(Json(sheet))
}
