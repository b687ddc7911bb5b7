// Repositório da organização (cadastro único por instalação).

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::settings::Organization};

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, AppError> {
        let org = sqlx::query_as::<_, Organization>(
            "SELECT id, name, slug, logo_url, created_at FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(org)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, AppError> {
        let org = sqlx::query_as::<_, Organization>(
            "SELECT id, name, slug, logo_url, created_at FROM organizations WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(org)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
    ) -> Result<Organization, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug, logo_url, created_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .fetch_one(executor)
        .await?;
        Ok(org)
    }

    pub async fn update_logo(
        &self,
        id: Uuid,
        logo_url: Option<&str>,
    ) -> Result<Organization, AppError> {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            UPDATE organizations
            SET logo_url = $2
            WHERE id = $1
            RETURNING id, name, slug, logo_url, created_at
            "#,
        )
        .bind(id)
        .bind(logo_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::OrganizationNotFound)?;
        Ok(org)
    }
}
