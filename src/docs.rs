// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Cadastros ---
        handlers::units::list_units,
        handlers::units::create_unit,
        handlers::units::update_unit,
        handlers::employees::list_unit_employees,
        handlers::employees::create_employee,
        handlers::employees::update_employee,
        handlers::employees::delete_employee,

        // --- Usuários ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::deactivate_user,
        handlers::users::activate_user,

        // --- Frequência ---
        handlers::frequency::load_sheet,
        handlers::frequency::load_previous_sheet,
        handlers::frequency::save_draft,
        handlers::frequency::finalize,

        // --- Códigos de Evento ---
        handlers::event_codes::list_event_codes,
        handlers::event_codes::list_event_types,
        handlers::event_codes::update_event_codes,

        // --- Documentos ---
        handlers::documents::frequency_sheet_pdf,
        handlers::documents::frequency_sheet_html,

        // --- Configurações ---
        handlers::settings::get_organization,
        handlers::settings::upload_logo,
        handlers::settings::remove_logo,

        // --- Painel ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_units_status,

        // --- Bootstrap ---
        handlers::admin::database_status,
        handlers::admin::seed,
        handlers::admin::test_user,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::SessionUser,
            models::auth::UserListing,
            models::auth::LoginPayload,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,

            // --- Cadastros ---
            models::registry::Unit,
            models::registry::UnitListing,
            models::registry::UnitPayload,
            models::registry::Employee,
            models::registry::EmployeePayload,

            // --- Frequência ---
            models::frequency::SheetStatus,
            models::frequency::LogAction,
            models::frequency::FrequencySheet,
            models::frequency::FrequencyEntry,
            models::frequency::EntryInput,
            models::frequency::SheetPayload,
            models::frequency::SheetRow,
            models::frequency::SheetView,
            models::frequency::EventType,
            models::frequency::EventCodeListing,
            models::frequency::EventCodeInput,
            models::frequency::UpdateEventCodesPayload,

            // --- Configurações ---
            models::settings::Organization,
            models::settings::OrganizationSettings,

            // --- Painel ---
            models::dashboard::DashboardSummary,
            models::dashboard::UnitStatus,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e identidade de sessão"),
        (name = "Cadastros", description = "Unidades e funcionários"),
        (name = "Usuários", description = "Gestão de usuários (admin)"),
        (name = "Frequência", description = "Folha de frequência mensal"),
        (name = "Códigos de Evento", description = "Configuração de códigos da folha de pagamento"),
        (name = "Documentos", description = "Exportação da folha em PDF/HTML"),
        (name = "Configurações", description = "Dados e logo da organização"),
        (name = "Painel", description = "Indicadores do período corrente"),
        (name = "Bootstrap", description = "Inicialização do banco e dados de demonstração")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
