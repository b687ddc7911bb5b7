// Configurações da organização: dados básicos e upload/remoção da logo.

use std::path::PathBuf;

use chrono::Utc;
use image::ImageFormat;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrganizationRepository,
    models::settings::{public_logo_url, OrganizationSettings},
};

pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

// Confere o content-type declarado e os magic bytes, e devolve a extensão.
pub fn validate_logo(content_type: Option<&str>, bytes: &[u8]) -> Result<&'static str, AppError> {
    match content_type {
        Some(ct) if ct.starts_with("image/") => {}
        _ => {
            return Err(AppError::InvalidUpload(
                "Tipo de arquivo inválido. Envie apenas imagens.".to_string(),
            ))
        }
    }

    if bytes.len() > MAX_LOGO_BYTES {
        return Err(AppError::UploadTooLarge);
    }

    let format = image::guess_format(bytes).map_err(|_| {
        AppError::InvalidUpload("O arquivo enviado não é uma imagem válida.".to_string())
    })?;

    let ext = match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpg",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        ImageFormat::Bmp => "bmp",
        _ => {
            return Err(AppError::InvalidUpload(
                "Formato de imagem não suportado.".to_string(),
            ))
        }
    };
    Ok(ext)
}

pub fn logo_file_name(ext: &str, millis: i64) -> String {
    format!("logo_{}.{}", millis, ext)
}

#[derive(Clone)]
pub struct SettingsService {
    org_repo: OrganizationRepository,
    uploads_dir: PathBuf,
}

impl SettingsService {
    pub fn new(org_repo: OrganizationRepository, uploads_dir: PathBuf) -> Self {
        Self { org_repo, uploads_dir }
    }

    pub async fn organization_settings(
        &self,
        organization_id: Uuid,
    ) -> Result<OrganizationSettings, AppError> {
        let org = self
            .org_repo
            .find_by_id(organization_id)
            .await?
            .ok_or(AppError::OrganizationNotFound)?;
        Ok(OrganizationSettings::from_organization(org))
    }

    // Grava a imagem em UPLOADS_DIR/logos e atualiza a referência na
    // organização. Devolve (nome do arquivo, URL pública).
    pub async fn store_logo(
        &self,
        organization_id: Uuid,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<(String, String), AppError> {
        let ext = validate_logo(content_type, bytes)?;
        let file_name = logo_file_name(ext, Utc::now().timestamp_millis());

        let logos_dir = self.uploads_dir.join("logos");
        tokio::fs::create_dir_all(&logos_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao criar diretório de logos: {}", e))?;

        let path = logos_dir.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao gravar a logo: {}", e))?;

        self.org_repo
            .update_logo(organization_id, Some(&file_name))
            .await?;

        tracing::info!("🖼️ Logo atualizada: {}", file_name);
        Ok((file_name.clone(), public_logo_url(&file_name)))
    }

    // Remove o arquivo (tolerando já não existir) e limpa a referência.
    pub async fn remove_logo(&self, organization_id: Uuid) -> Result<(), AppError> {
        let org = self
            .org_repo
            .find_by_id(organization_id)
            .await?
            .ok_or(AppError::OrganizationNotFound)?;

        if let Some(file_name) = &org.logo_url {
            let path = self.uploads_dir.join("logos").join(file_name);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(anyhow::anyhow!("Falha ao remover a logo: {}", e).into());
                }
            }
        }

        self.org_repo.update_logo(organization_id, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cabeçalho PNG mínimo, o suficiente para o sniffing de formato.
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn png_valido_recebe_extensao_png() {
        let ext = validate_logo(Some("image/png"), PNG_MAGIC).unwrap();
        assert_eq!(ext, "png");
    }

    #[test]
    fn content_type_nao_imagem_reprova() {
        let err = validate_logo(Some("application/pdf"), PNG_MAGIC).unwrap_err();
        assert!(matches!(err, AppError::InvalidUpload(_)));
    }

    #[test]
    fn content_type_ausente_reprova() {
        assert!(matches!(
            validate_logo(None, PNG_MAGIC),
            Err(AppError::InvalidUpload(_))
        ));
    }

    #[test]
    fn bytes_que_nao_sao_imagem_reprovam_mesmo_com_content_type() {
        let err = validate_logo(Some("image/png"), b"isto nao e uma imagem").unwrap_err();
        assert!(matches!(err, AppError::InvalidUpload(_)));
    }

    #[test]
    fn acima_de_2mb_reprova() {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.resize(MAX_LOGO_BYTES + 1, 0);
        assert!(matches!(
            validate_logo(Some("image/png"), &bytes),
            Err(AppError::UploadTooLarge)
        ));
    }

    #[test]
    fn nome_do_arquivo_carrega_timestamp_e_extensao() {
        assert_eq!(logo_file_name("png", 1735689600000), "logo_1735689600000.png");
    }
}
