// Exportação da folha de frequência: PDF (genpdf) com alternativa em HTML
// imprimível. Nada é calculado aqui, os contadores são apenas ecoados.

use std::path::PathBuf;

use genpdf::{elements, style, Element};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EmployeeRepository, FrequencyRepository, OrganizationRepository, UnitRepository},
    models::{
        auth::User,
        frequency::SheetRow,
        registry::Unit,
        settings::Organization,
    },
    services::frequency_service::merge_rows,
};

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

pub fn month_name(month: i32) -> &'static str {
    MONTH_NAMES
        .get((month - 1).max(0) as usize)
        .copied()
        .unwrap_or("")
}

pub fn vacation_label(vacation_days: i32) -> &'static str {
    if vacation_days > 0 { "Sim" } else { "Não" }
}

fn format_hours(value: Decimal) -> String {
    format!("{}", value.normalize())
}

// Nomes, cargos e justificativas vêm do usuário; tudo que entra no HTML
// passa por aqui antes.
fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Documento devolvido ao handler: PDF quando a fonte carrega, HTML caso contrário.
pub enum SheetDocument {
    Pdf(Vec<u8>),
    Html(String),
}

#[derive(Clone)]
pub struct ExportService {
    frequency_repo: FrequencyRepository,
    employee_repo: EmployeeRepository,
    unit_repo: UnitRepository,
    org_repo: OrganizationRepository,
    uploads_dir: PathBuf,
    pool: PgPool,
}

struct SheetExportData {
    organization: Organization,
    unit: Unit,
    rows: Vec<SheetRow>,
}

impl ExportService {
    pub fn new(
        frequency_repo: FrequencyRepository,
        employee_repo: EmployeeRepository,
        unit_repo: UnitRepository,
        org_repo: OrganizationRepository,
        uploads_dir: PathBuf,
        pool: PgPool,
    ) -> Self {
        Self { frequency_repo, employee_repo, unit_repo, org_repo, uploads_dir, pool }
    }

    async fn load_export_data(
        &self,
        user: &User,
        unit_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<SheetExportData, AppError> {
        let unit = self
            .unit_repo
            .find_by_id(unit_id)
            .await?
            .ok_or(AppError::UnitNotFound)?;

        if unit.organization_id != user.organization_id {
            return Err(AppError::Forbidden);
        }
        if !user.is_admin() && user.unit_id != Some(unit.id) {
            return Err(AppError::Forbidden);
        }

        let organization = self
            .org_repo
            .find_by_id(user.organization_id)
            .await?
            .ok_or(AppError::OrganizationNotFound)?;

        // Exportar só faz sentido para uma folha que existe.
        let sheet = self
            .frequency_repo
            .find_sheet(unit_id, month, year)
            .await?
            .ok_or(AppError::SheetNotFound)?;

        let employees = self.employee_repo.list_for_unit(&self.pool, unit_id).await?;
        let entries = self.frequency_repo.list_entries(sheet.id).await?;

        Ok(SheetExportData { organization, unit, rows: merge_rows(employees, &entries) })
    }

    pub async fn sheet_document(
        &self,
        user: &User,
        unit_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<SheetDocument, AppError> {
        let data = self.load_export_data(user, unit_id, month, year).await?;

        match self.render_pdf(&data, month, year) {
            Ok(bytes) => Ok(SheetDocument::Pdf(bytes)),
            // Sem a família de fontes no disco, cai para a visão imprimível.
            Err(AppError::FontNotFound(msg)) => {
                tracing::warn!("Fonte indisponível ({}), gerando visão HTML.", msg);
                Ok(SheetDocument::Html(render_html(
                    &data.organization,
                    &data.unit,
                    month,
                    year,
                    &data.rows,
                )))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn sheet_html(
        &self,
        user: &User,
        unit_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<String, AppError> {
        let data = self.load_export_data(user, unit_id, month, year).await?;
        Ok(render_html(&data.organization, &data.unit, month, year, &data.rows))
    }

    fn render_pdf(
        &self,
        data: &SheetExportData,
        month: i32,
        year: i32,
    ) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!(
            "Folha de Frequência - {} - {}/{}",
            data.unit.name, month, year
        ));
        // A4 paisagem, a folha tem dez colunas.
        doc.set_paper_size(genpdf::Size::new(297.0, 210.0));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        if let Some(file_name) = &data.organization.logo_url {
            let logo_path = self.uploads_dir.join("logos").join(file_name);
            // Logo ausente ou corrompida não impede a exportação.
            if let Ok(dynamic_image) = image::open(&logo_path) {
                if let Ok(pdf_image) = elements::Image::from_dynamic_image(dynamic_image) {
                    doc.push(
                        pdf_image
                            .with_alignment(genpdf::Alignment::Center)
                            .with_scale(genpdf::Scale::new(0.5, 0.5)),
                    );
                    doc.push(elements::Break::new(1));
                }
            }
        }

        let mut title = elements::Paragraph::new(data.organization.name.clone());
        title.set_alignment(genpdf::Alignment::Center);
        doc.push(title.styled(style::Style::new().bold().with_font_size(16)));

        let mut subtitle = elements::Paragraph::new(format!(
            "FOLHA DE FREQUÊNCIA - {}",
            data.unit.name.to_uppercase()
        ));
        subtitle.set_alignment(genpdf::Alignment::Center);
        doc.push(subtitle.styled(style::Style::new().bold().with_font_size(13)));

        let mut period = elements::Paragraph::new(format!(
            "{} / {}",
            month_name(month).to_uppercase(),
            year
        ));
        period.set_alignment(genpdf::Alignment::Center);
        doc.push(period.styled(style::Style::new().with_font_size(11)));

        doc.push(elements::Break::new(1.5));

        // --- TABELA (10 colunas fixas) ---
        let mut table = elements::TableLayout::new(vec![4, 2, 2, 1, 1, 1, 1, 2, 1, 3]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Nome").styled(style_bold))
            .element(elements::Paragraph::new("Cargo").styled(style_bold))
            .element(elements::Paragraph::new("Vínculo").styled(style_bold))
            .element(elements::Paragraph::new("Faltas").styled(style_bold))
            .element(elements::Paragraph::new("Ad. Not.").styled(style_bold))
            .element(elements::Paragraph::new("HE 50%").styled(style_bold))
            .element(elements::Paragraph::new("HE 100%").styled(style_bold))
            .element(elements::Paragraph::new("Sobreaviso").styled(style_bold))
            .element(elements::Paragraph::new("Férias").styled(style_bold))
            .element(elements::Paragraph::new("Justificativa").styled(style_bold))
            .push()
            .expect("Erro no cabeçalho da tabela");

        for row in &data.rows {
            table
                .row()
                .element(elements::Paragraph::new(row.employee.name.clone()))
                .element(elements::Paragraph::new(row.employee.role.clone()))
                .element(elements::Paragraph::new(row.employee.contract_type.clone()))
                .element(elements::Paragraph::new(row.absence_days.to_string()))
                .element(elements::Paragraph::new(format_hours(row.additional_night_hours)))
                .element(elements::Paragraph::new(format_hours(row.overtime_50_hours)))
                .element(elements::Paragraph::new(format_hours(row.overtime_100_hours)))
                .element(elements::Paragraph::new(format_hours(row.on_call_hours)))
                .element(elements::Paragraph::new(vacation_label(row.vacation_days)))
                .element(elements::Paragraph::new(
                    row.justification.clone().unwrap_or_default(),
                ))
                .push()
                .expect("Erro na linha da tabela");
        }

        doc.push(table);
        doc.push(elements::Break::new(3));

        // --- RODAPÉ DE ASSINATURA ---
        doc.push(elements::Paragraph::new(
            "Assinatura do Coordenador: ___________________________________",
        ));
        doc.push(elements::Break::new(1));
        doc.push(elements::Paragraph::new("Data: ______ / ______ / __________"));

        // Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

// Visão imprimível em HTML, com o mesmo conteúdo do PDF.
pub fn render_html(
    organization: &Organization,
    unit: &Unit,
    month: i32,
    year: i32,
    rows: &[SheetRow],
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Folha de Frequência - {} - {}/{}</title>\n",
        escape_html(&unit.name),
        month,
        year
    ));
    html.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 24px; }\n\
         h1, h2, h3 { text-align: center; margin: 4px 0; }\n\
         table { width: 100%; border-collapse: collapse; margin-top: 16px; }\n\
         th, td { border: 1px solid #333; padding: 4px 6px; font-size: 12px; }\n\
         th { background: #eee; }\n\
         .footer { margin-top: 48px; }\n\
         .signature-line { display: inline-block; width: 280px; border-bottom: 1px solid #333; }\n\
         @media print { body { margin: 8px; } }\n\
         </style>\n</head>\n<body>\n",
    );

    if let Some(file_name) = &organization.logo_url {
        html.push_str(&format!(
            "<p style=\"text-align:center\"><img src=\"/uploads/logos/{}\" alt=\"Logo\" style=\"max-height:80px\"></p>\n",
            escape_html(file_name)
        ));
    }

    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&organization.name)));
    html.push_str(&format!(
        "<h2>FOLHA DE FREQUÊNCIA - {}</h2>\n",
        escape_html(&unit.name.to_uppercase())
    ));
    html.push_str(&format!(
        "<h3>{} / {}</h3>\n",
        month_name(month).to_uppercase(),
        year
    ));

    html.push_str(
        "<table>\n<thead>\n<tr>\
         <th>Nome</th><th>Cargo</th><th>Vínculo</th><th>Faltas</th><th>Ad. Not.</th>\
         <th>HE 50%</th><th>HE 100%</th><th>Sobreaviso</th><th>Férias</th><th>Justificativa</th>\
         </tr>\n</thead>\n<tbody>\n",
    );

    for row in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.employee.name),
            escape_html(&row.employee.role),
            escape_html(&row.employee.contract_type),
            row.absence_days,
            format_hours(row.additional_night_hours),
            format_hours(row.overtime_50_hours),
            format_hours(row.overtime_100_hours),
            format_hours(row.on_call_hours),
            vacation_label(row.vacation_days),
            escape_html(row.justification.as_deref().unwrap_or("")),
        ));
    }

    html.push_str("</tbody>\n</table>\n");
    html.push_str(
        "<div class=\"footer\">\n\
         <p><strong>Assinatura do Coordenador:</strong> <span class=\"signature-line\"></span></p>\n\
         <p><strong>Data:</strong> ______ / ______ / __________</p>\n\
         </div>\n</body>\n</html>\n",
    );

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn nomes_dos_meses_em_portugues() {
        assert_eq!(month_name(1), "Janeiro");
        assert_eq!(month_name(5), "Maio");
        assert_eq!(month_name(12), "Dezembro");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn ferias_viram_sim_ou_nao() {
        assert_eq!(vacation_label(30), "Sim");
        assert_eq!(vacation_label(0), "Não");
    }

    #[test]
    fn horas_normalizadas_sem_zeros_a_direita() {
        assert_eq!(format_hours(Decimal::new(1200, 2)), "12");
        assert_eq!(format_hours(Decimal::new(1250, 2)), "12.5");
        assert_eq!(format_hours(Decimal::ZERO), "0");
    }

    fn org() -> Organization {
        Organization {
            id: Uuid::new_v4(),
            name: "Secretaria de Saúde".into(),
            slug: "saude".into(),
            logo_url: None,
            created_at: Utc::now(),
        }
    }

    fn unit() -> Unit {
        Unit {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "UBS Central".into(),
            location: "Av. Principal, 500 - Centro".into(),
            created_at: Utc::now(),
        }
    }

    fn row(name: &str, absences: i32) -> SheetRow {
        use crate::models::registry::Employee;
        SheetRow {
            employee: Employee {
                id: Uuid::new_v4(),
                organization_id: Uuid::new_v4(),
                unit_id: Uuid::new_v4(),
                name: name.into(),
                cpf: "000.000.000-00".into(),
                pis: None,
                role: "Médico".into(),
                contract_type: "EFETIVO".into(),
                floor_code: None,
                created_at: Utc::now(),
            },
            absence_days: absences,
            additional_night_hours: Decimal::ZERO,
            overtime_50_hours: Decimal::ZERO,
            overtime_100_hours: Decimal::ZERO,
            on_call_hours: Decimal::ZERO,
            vacation_days: 0,
            justification: None,
        }
    }

    #[test]
    fn html_tem_cabecalho_tabela_e_assinatura() {
        let html = render_html(&org(), &unit(), 5, 2025, &[row("Carlos", 2)]);
        assert!(html.contains("FOLHA DE FREQUÊNCIA - UBS CENTRAL"));
        assert!(html.contains("MAIO / 2025"));
        assert!(html.contains("<th>Justificativa</th>"));
        assert!(html.contains("<td>Carlos</td>"));
        assert!(html.contains("Assinatura do Coordenador"));
    }

    #[test]
    fn html_sem_logo_nao_referencia_uploads() {
        let html = render_html(&org(), &unit(), 1, 2025, &[]);
        assert!(!html.contains("/uploads/logos/"));
    }

    #[test]
    fn html_com_logo_aponta_para_a_url_publica() {
        let mut organization = org();
        organization.logo_url = Some("logo_9.png".into());
        let html = render_html(&organization, &unit(), 1, 2025, &[]);
        assert!(html.contains("/uploads/logos/logo_9.png"));
    }

    #[test]
    fn metacaracteres_de_html_sao_escapados() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("\"aspas\" e 'apóstrofo'"), "&quot;aspas&quot; e &#39;apóstrofo&#39;");
        assert_eq!(escape_html("Médico"), "Médico");
    }

    #[test]
    fn campos_do_usuario_nao_injetam_html_na_folha() {
        let mut linha = row("<script>alert(1)</script>", 0);
        linha.employee.role = "Cargo <b>negrito</b>".into();
        linha.justification = Some("\"><img src=x onerror=alert(2)>".into());

        let mut organization = org();
        organization.name = "Secretaria <i>de</i> Saúde".into();
        let mut unidade = unit();
        unidade.name = "UBS <marquee>".into();

        let html = render_html(&organization, &unidade, 5, 2025, &[linha]);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<marquee>"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Cargo &lt;b&gt;negrito&lt;/b&gt;"));
    }
}
