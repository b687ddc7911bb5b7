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
    middleware::auth::AuthenticatedUser,
    models::registry::{Employee, EmployeePayload},
};

// GET /api/units/{id}/employees
#[utoipa::path(
    get,
    path = "/api/units/{id}/employees",
    tag = "Cadastros",
    params(("id" = Uuid, Path, description = "ID da unidade")),
    responses(
        (status = 200, description = "Funcionários da unidade", body = [Employee]),
        (status = 403, description = "Unidade fora do escopo do usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_unit_employees(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(unit_id): Path<Uuid>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = app_state
        .registry_service
        .list_employees(&user, unit_id)
        .await?;
    Ok(Json(employees))
}

// POST /api/employees
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Cadastros",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Funcionário criado", body = Employee)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let employee = app_state
        .registry_service
        .create_employee(&user, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

// PUT /api/employees/{id}
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Cadastros",
    request_body = EmployeePayload,
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário atualizado", body = Employee),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<Employee>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let employee = app_state
        .registry_service
        .update_employee(&user, id, &payload)
        .await?;
    Ok(Json(employee))
}

// DELETE /api/employees/{id} — o único cadastro com remoção de fato
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Cadastros",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 204, description = "Funcionário removido"),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.registry_service.delete_employee(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
