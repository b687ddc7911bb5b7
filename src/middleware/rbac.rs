// src/middleware/rbac.rs
//
// Guardião de papel: só dois papéis existem neste domínio, então a
// verificação é direta sobre o usuário já autenticado.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{common::error::AppError, models::auth::User};

// Extractor que exige o papel 'admin' no usuário autenticado.
pub struct RequireAdmin(pub User);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        if !user.is_admin() {
            return Err(AppError::Forbidden);
        }

        Ok(RequireAdmin(user))
    }
}
