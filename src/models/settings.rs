// Modelos das configurações da organização (nome, slug e logo).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    #[schema(example = "Secretaria de Saúde")]
    pub name: String,
    #[schema(example = "saude")]
    pub slug: String,
    // Nome do arquivo da logo dentro de UPLOADS_DIR/logos
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSettings {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo_file_name: Option<String>,
    // URL pública servida por /uploads
    #[schema(example = "/uploads/logos/logo_1735689600000.png")]
    pub logo_public_url: Option<String>,
}

impl OrganizationSettings {
    pub fn from_organization(org: Organization) -> Self {
        let logo_public_url = org.logo_url.as_ref().map(|f| public_logo_url(f));
        Self {
            id: org.id,
            name: org.name,
            slug: org.slug,
            logo_file_name: org.logo_url,
            logo_public_url,
        }
    }
}

pub fn public_logo_url(file_name: &str) -> String {
    format!("/uploads/logos/{}", file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_publica_da_logo() {
        assert_eq!(
            public_logo_url("logo_123.png"),
            "/uploads/logos/logo_123.png"
        );
    }

    #[test]
    fn settings_sem_logo_nao_tem_url() {
        let org = Organization {
            id: Uuid::new_v4(),
            name: "Secretaria de Saúde".into(),
            slug: "saude".into(),
            logo_url: None,
            created_at: Utc::now(),
        };
        let settings = OrganizationSettings::from_organization(org);
        assert!(settings.logo_public_url.is_none());
        assert!(settings.logo_file_name.is_none());
    }
}
