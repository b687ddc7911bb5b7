// Repositório da configuração de códigos de evento por organização.

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::frequency::{EventCodeInput, EventCodeListing, EventType},
};

#[derive(Clone)]
pub struct EventCodeRepository {
    pool: PgPool,
}

impl EventCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_event_types(&self) -> Result<Vec<EventType>, AppError> {
        let types =
            sqlx::query_as::<_, EventType>("SELECT id, name, label FROM event_types ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(types)
    }

    // Listagem já juntada com o catálogo de tipos, pronta para a tela de configuração.
    pub async fn list_for_organization(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<EventCodeListing>, AppError> {
        let codes = sqlx::query_as::<_, EventCodeListing>(
            r#"
            SELECT ec.id, ec.event_type_id, et.name AS event_type_name,
                   et.label AS event_type_label, ec.contract_type, ec.code
            FROM event_codes ec
            JOIN event_types et ON et.id = ec.event_type_id
            WHERE ec.organization_id = $1
            ORDER BY et.name, ec.contract_type
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(codes)
    }

    pub async fn upsert_code<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        input: &EventCodeInput,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO event_codes (organization_id, event_type_id, contract_type, code)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (organization_id, event_type_id, contract_type)
            DO UPDATE SET code = EXCLUDED.code
            "#,
        )
        .bind(organization_id)
        .bind(input.event_type_id)
        .bind(&input.contract_type)
        .bind(input.code)
        .execute(executor)
        .await?;
        Ok(())
    }
}
