// Modelos do painel administrativo.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::frequency::SheetStatus;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[schema(example = 5)]
    pub total_units: i64,
    #[schema(example = 3)]
    pub submitted_sheets: i64,
    // Rascunhos criados mas ainda não enviados
    #[schema(example = 1)]
    pub pending_signature: i64,
    // Unidades sem nenhuma folha no período
    #[schema(example = 1)]
    pub pending_sheets: i64,
    pub month: i32,
    pub year: i32,
}

// Situação de uma unidade no período corrente, como a tabela do painel exibe.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitStatus {
    pub unit_id: Uuid,
    pub unit_name: String,
    #[schema(example = "Aguardando Assinatura")]
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
    pub responsible_name: Option<String>,
}

// Linha crua da consulta do painel, antes de virar rótulo.
#[derive(Debug, Clone, FromRow)]
pub struct UnitStatusRow {
    pub unit_id: Uuid,
    pub unit_name: String,
    pub sheet_status: Option<SheetStatus>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub responsible_name: Option<String>,
}

// Rótulos em português exibidos na tabela do painel.
pub fn status_label(status: Option<SheetStatus>) -> &'static str {
    match status {
        Some(SheetStatus::Submitted) => "Enviada",
        Some(SheetStatus::Draft) => "Aguardando Assinatura",
        None => "Pendente",
    }
}

impl From<UnitStatusRow> for UnitStatus {
    fn from(row: UnitStatusRow) -> Self {
        Self {
            unit_id: row.unit_id,
            unit_name: row.unit_name,
            status: status_label(row.sheet_status).to_string(),
            submitted_at: row.submitted_at,
            responsible_name: row.responsible_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotulos_de_situacao_do_painel() {
        assert_eq!(status_label(Some(SheetStatus::Submitted)), "Enviada");
        assert_eq!(status_label(Some(SheetStatus::Draft)), "Aguardando Assinatura");
        assert_eq!(status_label(None), "Pendente");
    }
}
