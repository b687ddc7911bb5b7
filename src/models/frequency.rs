// Modelos da folha de frequência mensal e da configuração de códigos de evento.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::registry::{validate_contract_type, Employee};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sheet_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SheetStatus {
    Draft,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "log_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    SaveDraft,
    Submit,
}

// --- Linhas do banco ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrequencySheet {
    pub id: Uuid,
    #[schema(ignore)]
    pub organization_id: Uuid,
    pub unit_id: Uuid,
    #[schema(example = 5)]
    pub month: i32,
    #[schema(example = 2025)]
    pub year: i32,
    pub status: SheetStatus,
    pub submitted_by: Option<Uuid>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyEntry {
    pub id: Uuid,
    pub sheet_id: Uuid,
    pub employee_id: Uuid,
    #[schema(example = 2)]
    pub absence_days: i32,
    #[schema(example = "12.00")]
    pub additional_night_hours: Decimal,
    pub overtime_50_hours: Decimal,
    pub overtime_100_hours: Decimal,
    pub on_call_hours: Decimal,
    #[schema(example = 0)]
    pub vacation_days: i32,
    pub justification: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Payloads ---

// Contadores de um funcionário dentro da folha, como chegam do cliente.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    pub employee_id: Uuid,
    #[validate(range(min = 0, max = 31, message = "Faltas devem estar entre 0 e 31."))]
    #[serde(default)]
    pub absence_days: i32,
    #[serde(default)]
    pub additional_night_hours: Decimal,
    #[serde(default)]
    pub overtime_50_hours: Decimal,
    #[serde(default)]
    pub overtime_100_hours: Decimal,
    #[serde(default)]
    pub on_call_hours: Decimal,
    #[validate(range(min = 0, max = 31, message = "Férias devem estar entre 0 e 31 dias."))]
    #[serde(default)]
    pub vacation_days: i32,
    pub justification: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SheetPayload {
    pub unit_id: Uuid,
    #[validate(range(min = 1, max = 12, message = "O mês deve estar entre 1 e 12."))]
    pub month: i32,
    #[validate(range(min = 2000, max = 2100, message = "Ano fora do intervalo aceito."))]
    pub year: i32,
    #[validate(nested)]
    pub entries: Vec<EntryInput>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SheetQuery {
    pub unit_id: Uuid,
    #[validate(range(min = 1, max = 12, message = "O mês deve estar entre 1 e 12."))]
    pub month: i32,
    #[validate(range(min = 2000, max = 2100, message = "Ano fora do intervalo aceito."))]
    pub year: i32,
}

// --- Visões ---

// Uma linha da folha como a tela de preenchimento consome: o funcionário
// com seus contadores (zerados quando a folha ainda não tem entrada dele).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    pub employee: Employee,
    pub absence_days: i32,
    pub additional_night_hours: Decimal,
    pub overtime_50_hours: Decimal,
    pub overtime_100_hours: Decimal,
    pub on_call_hours: Decimal,
    pub vacation_days: i32,
    pub justification: Option<String>,
}

impl SheetRow {
    pub fn blank(employee: Employee) -> Self {
        Self {
            employee,
            absence_days: 0,
            additional_night_hours: Decimal::ZERO,
            overtime_50_hours: Decimal::ZERO,
            overtime_100_hours: Decimal::ZERO,
            on_call_hours: Decimal::ZERO,
            vacation_days: 0,
            justification: None,
        }
    }

    pub fn from_entry(employee: Employee, entry: &FrequencyEntry) -> Self {
        Self {
            employee,
            absence_days: entry.absence_days,
            additional_night_hours: entry.additional_night_hours,
            overtime_50_hours: entry.overtime_50_hours,
            overtime_100_hours: entry.overtime_100_hours,
            on_call_hours: entry.on_call_hours,
            vacation_days: entry.vacation_days,
            justification: entry.justification.clone(),
        }
    }
}

// Resposta do carregamento de um período: folha (se existir) + linhas.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SheetView {
    pub sheet: Option<FrequencySheet>,
    pub rows: Vec<SheetRow>,
}

// --- Códigos de evento ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: Uuid,
    #[schema(example = "overtime_50")]
    pub name: String,
    #[schema(example = "Hora Extra 50%")]
    pub label: String,
}

// Linha da tela de configuração: tipo de evento + vínculo + código.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventCodeListing {
    pub id: Uuid,
    pub event_type_id: Uuid,
    #[schema(example = "vacation")]
    pub event_type_name: String,
    #[schema(example = "Férias")]
    pub event_type_label: String,
    #[schema(example = "EFETIVO")]
    pub contract_type: String,
    #[schema(example = 351)]
    pub code: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventCodeInput {
    pub event_type_id: Uuid,
    #[validate(custom(function = validate_contract_type))]
    pub contract_type: String,
    #[validate(range(min = 0, message = "O código deve ser positivo."))]
    pub code: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventCodesPayload {
    #[validate(nested)]
    pub codes: Vec<EventCodeInput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn employee() -> Employee {
        Employee {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            unit_id: Uuid::new_v4(),
            name: "Funcionário 1".into(),
            cpf: "123.456.789-00".into(),
            pis: None,
            role: "Enfermeiro".into(),
            contract_type: "EFETIVO".into(),
            floor_code: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn linha_em_branco_tem_contadores_zerados() {
        let row = SheetRow::blank(employee());
        assert_eq!(row.absence_days, 0);
        assert_eq!(row.additional_night_hours, Decimal::ZERO);
        assert_eq!(row.vacation_days, 0);
        assert!(row.justification.is_none());
    }

    #[test]
    fn status_serializa_em_minusculas() {
        assert_eq!(
            serde_json::to_string(&SheetStatus::Submitted).unwrap(),
            "\"submitted\""
        );
        assert_eq!(serde_json::to_string(&SheetStatus::Draft).unwrap(), "\"draft\"");
    }

    #[test]
    fn acao_de_log_serializa_em_snake_case() {
        assert_eq!(
            serde_json::to_string(&LogAction::SaveDraft).unwrap(),
            "\"save_draft\""
        );
    }

    #[test]
    fn payload_valida_mes_fora_do_intervalo() {
        use validator::Validate;
        let payload = SheetQuery {
            unit_id: Uuid::new_v4(),
            month: 13,
            year: 2025,
        };
        assert!(payload.validate().is_err());
    }
}
