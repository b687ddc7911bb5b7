use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Usuário desativado")]
    UserInactive,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Unidade não encontrada")]
    UnitNotFound,

    #[error("Funcionário não encontrado")]
    EmployeeNotFound,

    #[error("Organização não encontrada")]
    OrganizationNotFound,

    #[error("Folha de frequência não encontrada")]
    SheetNotFound,

    #[error("Folha do mês anterior não encontrada")]
    PreviousSheetNotFound,

    #[error("Conflito: {0}")]
    Conflict(String),

    #[error("Upload inválido: {0}")]
    InvalidUpload(String),

    #[error("Arquivo muito grande")]
    UploadTooLarge,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro de multipart: {0}")]
    MultipartError(#[from] axum::extract::multipart::MultipartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::UserInactive => {
                (StatusCode::UNAUTHORIZED, "Este usuário está desativado.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Você não tem permissão para realizar esta ação.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::UnitNotFound => {
                (StatusCode::NOT_FOUND, "Unidade não encontrada.".to_string())
            }
            AppError::EmployeeNotFound => {
                (StatusCode::NOT_FOUND, "Funcionário não encontrado.".to_string())
            }
            AppError::OrganizationNotFound => {
                (StatusCode::NOT_FOUND, "Organização não encontrada.".to_string())
            }
            AppError::SheetNotFound => (
                StatusCode::NOT_FOUND,
                "Folha de frequência não encontrada.".to_string(),
            ),
            AppError::PreviousSheetNotFound => (
                StatusCode::NOT_FOUND,
                "Não foi possível encontrar dados do mês anterior.".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidUpload(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UploadTooLarge => (
                StatusCode::BAD_REQUEST,
                "Arquivo muito grande. O tamanho máximo é 2MB.".to_string(),
            ),
            AppError::MultipartError(_) => (
                StatusCode::BAD_REQUEST,
                "Corpo da requisição multipart inválido.".to_string(),
            ),
            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_de_folha_vira_404() {
        let resp = AppError::SheetNotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn credenciais_invalidas_viram_401() {
        let resp = AppError::InvalidCredentials.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn acesso_negado_vira_403() {
        let resp = AppError::Forbidden.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn erros_de_upload_viram_400() {
        let resp = AppError::UploadTooLarge.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::InvalidUpload("Tipo de arquivo inválido.".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn erro_de_validacao_vira_400_com_detalhes() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(email(message = "O e-mail fornecido é inválido."))]
            email: String,
        }

        let err = Probe { email: "não-é-email".into() }.validate().unwrap_err();
        let resp = AppError::ValidationError(err).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
