// Repositório de usuários, responsável pelas interações com a tabela 'users'.

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{User, UserListing},
};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

const USER_COLUMNS: &str =
    "id, organization_id, name, email, password_hash, role, unit_id, is_active, created_at";

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Listagem com o nome da unidade já resolvido (a tela original fazia
    // uma busca extra por usuário).
    pub async fn list_for_organization(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<UserListing>, AppError> {
        let users = sqlx::query_as::<_, UserListing>(
            r#"
            SELECT u.id, u.name, u.email, u.role, u.unit_id,
                   un.name AS unit_name, u.is_active, u.created_at
            FROM users u
            LEFT JOIN units un ON un.id = u.unit_id
            WHERE u.organization_id = $1
            ORDER BY u.name
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        unit_id: Option<Uuid>,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (organization_id, name, email, password_hash, role, unit_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(organization_id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(unit_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }

    pub async fn update_user(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: &str,
        role: &str,
        unit_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = $3, role = $4, unit_id = $5
            WHERE id = $2 AND organization_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(organization_id)
        .bind(id)
        .bind(name)
        .bind(role)
        .bind(unit_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }

    // Usuários nunca são removidos, apenas desativados.
    pub async fn set_active(
        &self,
        organization_id: Uuid,
        id: Uuid,
        is_active: bool,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET is_active = $3
            WHERE id = $2 AND organization_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(organization_id)
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }
}
