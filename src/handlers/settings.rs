// Configurações da organização: dados básicos e logo (upload multipart).

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, rbac::RequireAdmin},
    models::settings::OrganizationSettings,
};

// GET /api/settings/organization
#[utoipa::path(
    get,
    path = "/api/settings/organization",
    tag = "Configurações",
    responses(
        (status = 200, description = "Dados da organização", body = OrganizationSettings)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_organization(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<OrganizationSettings>, AppError> {
    let settings = app_state
        .settings_service
        .organization_settings(user.organization_id)
        .await?;
    Ok(Json(settings))
}

// POST /api/settings/logo — multipart com o campo 'file' (imagem, máx. 2MB)
#[utoipa::path(
    post,
    path = "/api/settings/logo",
    tag = "Configurações",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Logo armazenada"),
        (status = 400, description = "Arquivo ausente, inválido ou grande demais")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_logo(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut file: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let content_type = field.content_type().map(|ct| ct.to_string());
            let bytes = field.bytes().await?.to_vec();
            file = Some((content_type, bytes));
        }
    }

    let (content_type, bytes) = file.ok_or_else(|| {
        AppError::InvalidUpload("Nenhum arquivo enviado".to_string())
    })?;

    let (file_name, url) = app_state
        .settings_service
        .store_logo(admin.organization_id, content_type.as_deref(), &bytes)
        .await?;

    Ok(Json(json!({
        "success": true,
        "url": url,
        "fileName": file_name,
    })))
}

// DELETE /api/settings/logo
#[utoipa::path(
    delete,
    path = "/api/settings/logo",
    tag = "Configurações",
    responses(
        (status = 200, description = "Logo removida")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_logo(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Value>, AppError> {
    app_state
        .settings_service
        .remove_logo(admin.organization_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Logo removida com sucesso",
    })))
}
