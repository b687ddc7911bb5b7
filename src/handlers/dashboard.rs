use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::dashboard::{DashboardSummary, UnitStatus},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Painel",
    responses(
        (status = 200, description = "Resumo das folhas do período corrente", body = DashboardSummary),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = app_state
        .dashboard_service
        .summary(admin.organization_id)
        .await?;
    Ok(Json(summary))
}

// GET /api/dashboard/units-status
#[utoipa::path(
    get,
    path = "/api/dashboard/units-status",
    tag = "Painel",
    responses(
        (status = 200, description = "Situação de cada unidade no período corrente", body = [UnitStatus])
    ),
    security(("api_jwt" = []))
)]
pub async fn get_units_status(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Vec<UnitStatus>>, AppError> {
    let status = app_state
        .dashboard_service
        .units_status(admin.organization_id)
        .await?;
    Ok(Json(status))
}
