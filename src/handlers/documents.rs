// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    services::export_service::SheetDocument,
};

// GET /api/documents/frequency-sheet/{unit_id}/{month}/{year}
//
// Devolve o PDF da folha; sem a família de fontes no servidor, devolve a
// visão imprimível em HTML no lugar.
#[utoipa::path(
    get,
    path = "/api/documents/frequency-sheet/{unit_id}/{month}/{year}",
    tag = "Documentos",
    params(
        ("unit_id" = Uuid, Path, description = "ID da unidade"),
        ("month" = i32, Path, description = "Mês (1 a 12)"),
        ("year" = i32, Path, description = "Ano")
    ),
    responses(
        (status = 200, description = "PDF (ou HTML imprimível) da folha do período"),
        (status = 404, description = "Não há folha para o período")
    ),
    security(("api_jwt" = []))
)]
pub async fn frequency_sheet_pdf(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((unit_id, month, year)): Path<(Uuid, i32, i32)>,
) -> Result<Response, AppError> {
    let document = app_state
        .export_service
        .sheet_document(&user, unit_id, month, year)
        .await?;

    match document {
        SheetDocument::Pdf(bytes) => {
            // Configura os Headers para o navegador baixar ou mostrar o PDF
            let headers = [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!(
                        "attachment; filename=\"frequencia_{}_{}_{}.pdf\"",
                        unit_id, month, year
                    ),
                ),
            ];
            Ok((headers, bytes).into_response())
        }
        SheetDocument::Html(html) => Ok(Html(html).into_response()),
    }
}

// GET /api/documents/frequency-sheet/{unit_id}/{month}/{year}/html
#[utoipa::path(
    get,
    path = "/api/documents/frequency-sheet/{unit_id}/{month}/{year}/html",
    tag = "Documentos",
    params(
        ("unit_id" = Uuid, Path, description = "ID da unidade"),
        ("month" = i32, Path, description = "Mês (1 a 12)"),
        ("year" = i32, Path, description = "Ano")
    ),
    responses(
        (status = 200, description = "Visão imprimível da folha em HTML"),
        (status = 404, description = "Não há folha para o período")
    ),
    security(("api_jwt" = []))
)]
pub async fn frequency_sheet_html(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((unit_id, month, year)): Path<(Uuid, i32, i32)>,
) -> Result<Html<String>, AppError> {
    let html = app_state
        .export_service
        .sheet_html(&user, unit_id, month, year)
        .await?;
    Ok(Html(html))
}
