// Consultas agregadas do painel administrativo.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::UnitStatusRow};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
pub struct SummaryCounts {
    pub total_units: i64,
    pub submitted_sheets: i64,
    pub draft_sheets: i64,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary_counts(
        &self,
        organization_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<SummaryCounts, AppError> {
        let counts = sqlx::query_as::<_, SummaryCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM units WHERE organization_id = $1) AS total_units,
                COUNT(*) FILTER (WHERE fs.status = 'submitted') AS submitted_sheets,
                COUNT(*) FILTER (WHERE fs.status = 'draft') AS draft_sheets
            FROM frequency_sheets fs
            WHERE fs.organization_id = $1 AND fs.month = $2 AND fs.year = $3
            "#,
        )
        .bind(organization_id)
        .bind(month)
        .bind(year)
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    // Uma linha por unidade com a folha do período (quando houver) e o
    // responsável ativo da unidade.
    pub async fn unit_status_rows(
        &self,
        organization_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Vec<UnitStatusRow>, AppError> {
        let rows = sqlx::query_as::<_, UnitStatusRow>(
            r#"
            SELECT u.id AS unit_id, u.name AS unit_name,
                   fs.status AS sheet_status, fs.submitted_at,
                   r.name AS responsible_name
            FROM units u
            LEFT JOIN frequency_sheets fs
                   ON fs.unit_id = u.id AND fs.month = $2 AND fs.year = $3
            LEFT JOIN LATERAL (
                SELECT name FROM users
                WHERE unit_id = u.id AND role = 'responsible' AND is_active
                ORDER BY created_at
                LIMIT 1
            ) r ON TRUE
            WHERE u.organization_id = $1
            ORDER BY u.name
            "#,
        )
        .bind(organization_id)
        .bind(month)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
