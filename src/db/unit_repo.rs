// Repositório de unidades (postos de saúde).

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::registry::{Unit, UnitListing},
};

#[derive(Clone)]
pub struct UnitRepository {
    pool: PgPool,
}

impl UnitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Unit>, AppError> {
        let unit = sqlx::query_as::<_, Unit>(
            "SELECT id, organization_id, name, location, created_at FROM units WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(unit)
    }

    // Listagem enriquecida com o nome do responsável e a contagem de
    // funcionários; a tela original resolvia isso com N consultas.
    pub async fn list_for_organization(
        &self,
        organization_id: Uuid,
        only_unit: Option<Uuid>,
    ) -> Result<Vec<UnitListing>, AppError> {
        let units = sqlx::query_as::<_, UnitListing>(
            r#"
            SELECT u.id, u.name, u.location,
                   r.name AS responsible_name,
                   COALESCE(e.total, 0) AS employee_count,
                   u.created_at
            FROM units u
            LEFT JOIN LATERAL (
                SELECT name FROM users
                WHERE unit_id = u.id AND role = 'responsible' AND is_active
                ORDER BY created_at
                LIMIT 1
            ) r ON TRUE
            LEFT JOIN LATERAL (
                SELECT COUNT(*) AS total FROM employees WHERE unit_id = u.id
            ) e ON TRUE
            WHERE u.organization_id = $1
              AND ($2::uuid IS NULL OR u.id = $2)
            ORDER BY u.name
            "#,
        )
        .bind(organization_id)
        .bind(only_unit)
        .fetch_all(&self.pool)
        .await?;
        Ok(units)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        name: &str,
        location: &str,
    ) -> Result<Unit, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let unit = sqlx::query_as::<_, Unit>(
            r#"
            INSERT INTO units (organization_id, name, location)
            VALUES ($1, $2, $3)
            RETURNING id, organization_id, name, location, created_at
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(location)
        .fetch_one(executor)
        .await?;
        Ok(unit)
    }

    pub async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: &str,
        location: &str,
    ) -> Result<Unit, AppError> {
        let unit = sqlx::query_as::<_, Unit>(
            r#"
            UPDATE units
            SET name = $3, location = $4
            WHERE id = $2 AND organization_id = $1
            RETURNING id, organization_id, name, location, created_at
            "#,
        )
        .bind(organization_id)
        .bind(id)
        .bind(name)
        .bind(location)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UnitNotFound)?;
        Ok(unit)
    }
}
