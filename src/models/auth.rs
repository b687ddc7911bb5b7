// Modelos de autenticação e de usuários do sistema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_RESPONSIBLE: &str = "responsible";

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(ignore)]
    pub organization_id: Uuid,
    #[schema(example = "Maria Silva")]
    pub name: String,
    #[schema(example = "admin@example.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    #[schema(example = "admin")]
    pub role: String,
    // Nulo = papel de abrangência organizacional (admin)
    pub unit_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

// Identidade de sessão devolvida no login e em /me — os mesmos campos
// que o front serializa para a sessão do navegador.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(example = "responsible")]
    pub role: String,
    pub organization_id: Uuid,
    pub unit_id: Option<Uuid>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            organization_id: user.organization_id,
            unit_id: user.unit_id,
        }
    }
}

// Linha da listagem de usuários (com o nome da unidade resolvido).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListing {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub unit_id: Option<Uuid>,
    #[schema(example = "UBS Central")]
    pub unit_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    #[schema(example = "password")]
    pub password: String,
}

// Dados para criação de um usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "João Santos")]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    // Quando ausente, o usuário recebe a senha de teste padrão.
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
    #[validate(custom(function = validate_role))]
    #[schema(example = "responsible")]
    pub role: String,
    pub unit_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(custom(function = validate_role))]
    pub role: String,
    pub unit_id: Option<Uuid>,
}

pub fn validate_role(role: &str) -> Result<(), validator::ValidationError> {
    if role == ROLE_ADMIN || role == ROLE_RESPONSIBLE {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("role");
        err.message = Some("O papel deve ser 'admin' ou 'responsible'.".into());
        Err(err)
    }
}

// Resposta de autenticação: envelope com token + identidade de sessão
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "Login realizado com sucesso")]
    pub message: String,
    pub token: String,
    pub user: SessionUser,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn papel_desconhecido_reprova_na_validacao() {
        let payload = CreateUserPayload {
            name: "Fulano".into(),
            email: "fulano@example.com".into(),
            password: None,
            role: "coordenador".into(),
            unit_id: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn papeis_conhecidos_passam() {
        assert!(validate_role(ROLE_ADMIN).is_ok());
        assert!(validate_role(ROLE_RESPONSIBLE).is_ok());
    }

    #[test]
    fn session_user_espelha_os_campos_do_usuario() {
        let user = User {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "Maria Silva".into(),
            email: "admin@example.com".into(),
            password_hash: "$2b$12$hash".into(),
            role: ROLE_ADMIN.into(),
            unit_id: None,
            is_active: true,
            created_at: Utc::now(),
        };
        let session = SessionUser::from(&user);
        assert_eq!(session.id, user.id);
        assert_eq!(session.organization_id, user.organization_id);
        assert_eq!(session.role, "admin");
        assert!(session.unit_id.is_none());
    }
}
