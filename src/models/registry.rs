// Modelos dos cadastros: unidades e funcionários.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const CONTRACT_TYPES: [&str; 3] = ["EFETIVO", "TEMPORARIO", "COMISSIONADO"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    #[schema(ignore)]
    pub organization_id: Uuid,
    #[schema(example = "UBS Central")]
    pub name: String,
    #[schema(example = "Av. Principal, 500 - Centro")]
    pub location: String,
    pub created_at: DateTime<Utc>,
}

// Linha da listagem de unidades, enriquecida com o responsável e a
// contagem de funcionários (a tela original fazia uma consulta por unidade).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitListing {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    #[schema(example = "João Santos")]
    pub responsible_name: Option<String>,
    #[schema(example = 8)]
    pub employee_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "UBS Vila Nova")]
    pub name: String,
    #[validate(length(min = 1, message = "O endereço é obrigatório."))]
    #[schema(example = "Rua das Flores, 123 - Vila Nova")]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    #[schema(ignore)]
    pub organization_id: Uuid,
    pub unit_id: Uuid,
    #[schema(example = "Carlos Pereira")]
    pub name: String,
    #[schema(example = "123.456.789-00")]
    pub cpf: String,
    pub pis: Option<String>,
    #[schema(example = "Enfermeiro")]
    pub role: String,
    #[schema(example = "EFETIVO")]
    pub contract_type: String,
    pub floor_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub unit_id: Uuid,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(length(min = 11, message = "O CPF é obrigatório."))]
    #[schema(example = "123.456.789-00")]
    pub cpf: String,
    pub pis: Option<String>,
    #[validate(length(min = 1, message = "O cargo é obrigatório."))]
    #[schema(example = "Técnico de Enfermagem")]
    pub role: String,
    #[validate(custom(function = validate_contract_type))]
    #[schema(example = "TEMPORARIO")]
    pub contract_type: String,
    pub floor_code: Option<String>,
}

pub fn validate_contract_type(value: &str) -> Result<(), validator::ValidationError> {
    if CONTRACT_TYPES.contains(&value) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("contract_type");
        err.message = Some("O vínculo deve ser EFETIVO, TEMPORARIO ou COMISSIONADO.".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn vinculos_do_catalogo_passam() {
        for ct in CONTRACT_TYPES {
            assert!(validate_contract_type(ct).is_ok(), "{ct} deveria ser aceito");
        }
    }

    #[test]
    fn vinculo_fora_do_catalogo_reprova() {
        assert!(validate_contract_type("CLT").is_err());
        assert!(validate_contract_type("efetivo").is_err());
    }

    #[test]
    fn payload_de_funcionario_valida_cpf_e_vinculo() {
        let payload = EmployeePayload {
            unit_id: Uuid::new_v4(),
            name: "Carlos".into(),
            cpf: "123".into(),
            pis: None,
            role: "Médico".into(),
            contract_type: "EFETIVO".into(),
            floor_code: None,
        };
        let err = payload.validate().unwrap_err();
        assert!(err.field_errors().contains_key("cpf"));
    }
}
