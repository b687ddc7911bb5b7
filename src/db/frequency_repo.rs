// Repositório das folhas de frequência, suas entradas e o log de envios.

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::frequency::{EntryInput, FrequencyEntry, FrequencySheet, LogAction, SheetStatus},
};

#[derive(Clone)]
pub struct FrequencyRepository {
    pool: PgPool,
}

const SHEET_COLUMNS: &str =
    "id, organization_id, unit_id, month, year, status, submitted_by, submitted_at, created_at";

const ENTRY_COLUMNS: &str = "id, sheet_id, employee_id, absence_days, additional_night_hours, \
     overtime_50_hours, overtime_100_hours, on_call_hours, vacation_days, justification, created_at";

impl FrequencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Ausência de folha é um estado normal ("ainda não iniciada"), por isso Option.
    pub async fn find_sheet(
        &self,
        unit_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Option<FrequencySheet>, AppError> {
        let sheet = sqlx::query_as::<_, FrequencySheet>(&format!(
            "SELECT {SHEET_COLUMNS} FROM frequency_sheets \
             WHERE unit_id = $1 AND month = $2 AND year = $3"
        ))
        .bind(unit_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;
        Ok(sheet)
    }

    pub async fn list_entries(&self, sheet_id: Uuid) -> Result<Vec<FrequencyEntry>, AppError> {
        let entries = sqlx::query_as::<_, FrequencyEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM frequency_entries WHERE sheet_id = $1"
        ))
        .bind(sheet_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    // Cria a folha do período se não existir e devolve a linha vigente.
    // O DO UPDATE é um no-op apenas para o RETURNING funcionar no conflito;
    // em particular, ele nunca rebaixa o status de uma folha já enviada.
    pub async fn upsert_sheet<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        unit_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<FrequencySheet, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sheet = sqlx::query_as::<_, FrequencySheet>(&format!(
            r#"
            INSERT INTO frequency_sheets (organization_id, unit_id, month, year, status)
            VALUES ($1, $2, $3, $4, 'draft')
            ON CONFLICT (unit_id, month, year)
            DO UPDATE SET unit_id = frequency_sheets.unit_id
            RETURNING {SHEET_COLUMNS}
            "#
        ))
        .bind(organization_id)
        .bind(unit_id)
        .bind(month)
        .bind(year)
        .fetch_one(executor)
        .await?;
        Ok(sheet)
    }

    pub async fn upsert_entry<'e, E>(
        &self,
        executor: E,
        sheet_id: Uuid,
        entry: &EntryInput,
    ) -> Result<FrequencyEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, FrequencyEntry>(&format!(
            r#"
            INSERT INTO frequency_entries
                (sheet_id, employee_id, absence_days, additional_night_hours,
                 overtime_50_hours, overtime_100_hours, on_call_hours,
                 vacation_days, justification)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (sheet_id, employee_id) DO UPDATE SET
                absence_days = EXCLUDED.absence_days,
                additional_night_hours = EXCLUDED.additional_night_hours,
                overtime_50_hours = EXCLUDED.overtime_50_hours,
                overtime_100_hours = EXCLUDED.overtime_100_hours,
                on_call_hours = EXCLUDED.on_call_hours,
                vacation_days = EXCLUDED.vacation_days,
                justification = EXCLUDED.justification
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(sheet_id)
        .bind(entry.employee_id)
        .bind(entry.absence_days)
        .bind(entry.additional_night_hours)
        .bind(entry.overtime_50_hours)
        .bind(entry.overtime_100_hours)
        .bind(entry.on_call_hours)
        .bind(entry.vacation_days)
        .bind(entry.justification.as_deref())
        .fetch_one(executor)
        .await?;
        Ok(row)
    }

    pub async fn mark_submitted<'e, E>(
        &self,
        executor: E,
        sheet_id: Uuid,
        submitted_by: Uuid,
        submitted_at: DateTime<Utc>,
    ) -> Result<FrequencySheet, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sheet = sqlx::query_as::<_, FrequencySheet>(&format!(
            r#"
            UPDATE frequency_sheets
            SET status = $4, submitted_by = $2, submitted_at = $3
            WHERE id = $1
            RETURNING {SHEET_COLUMNS}
            "#
        ))
        .bind(sheet_id)
        .bind(submitted_by)
        .bind(submitted_at)
        .bind(SheetStatus::Submitted)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::SheetNotFound)?;
        Ok(sheet)
    }

    // Trilha de auditoria, apenas acrescentada; nenhum caminho de leitura.
    pub async fn append_log<'e, E>(
        &self,
        executor: E,
        sheet_id: Uuid,
        user_id: Uuid,
        action: LogAction,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO submissions_log (sheet_id, user_id, action) VALUES ($1, $2, $3)")
            .bind(sheet_id)
            .bind(user_id)
            .bind(action)
            .execute(executor)
            .await?;
        Ok(())
    }
}
