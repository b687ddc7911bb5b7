// Configuração dos códigos de evento por (tipo de evento × vínculo).
// Os códigos são exibidos na folha de pagamento; nada é calculado com eles.

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, rbac::RequireAdmin},
    models::frequency::{EventCodeListing, EventType, UpdateEventCodesPayload},
};

// GET /api/event-codes
#[utoipa::path(
    get,
    path = "/api/event-codes",
    tag = "Códigos de Evento",
    responses(
        (status = 200, description = "Códigos configurados da organização", body = [EventCodeListing])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_event_codes(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<EventCodeListing>>, AppError> {
    let codes = app_state
        .event_code_repo
        .list_for_organization(user.organization_id)
        .await?;
    Ok(Json(codes))
}

// GET /api/event-types — catálogo fixo, populado pelas migrações
#[utoipa::path(
    get,
    path = "/api/event-types",
    tag = "Códigos de Evento",
    responses(
        (status = 200, description = "Catálogo de tipos de evento", body = [EventType])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_event_types(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<Vec<EventType>>, AppError> {
    let types = app_state.event_code_repo.list_event_types().await?;
    Ok(Json(types))
}

// PUT /api/event-codes — upsert em lote da grade de configuração
#[utoipa::path(
    put,
    path = "/api/event-codes",
    tag = "Códigos de Evento",
    request_body = UpdateEventCodesPayload,
    responses(
        (status = 200, description = "Códigos atualizados", body = [EventCodeListing]),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_event_codes(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<UpdateEventCodesPayload>,
) -> Result<Json<Vec<EventCodeListing>>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut tx = app_state.db_pool.begin().await?;
    for input in &payload.codes {
        app_state
            .event_code_repo
            .upsert_code(&mut *tx, admin.organization_id, input)
            .await?;
    }
    tx.commit().await?;

    let codes = app_state
        .event_code_repo
        .list_for_organization(admin.organization_id)
        .await?;
    Ok(Json(codes))
}
