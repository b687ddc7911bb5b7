// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        DashboardRepository, EmployeeRepository, EventCodeRepository, FrequencyRepository,
        OrganizationRepository, UnitRepository, UserRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService, export_service::ExportService,
        frequency_service::FrequencyService, registry_service::RegistryService,
        seed_service::SeedService, settings_service::SettingsService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub uploads_dir: PathBuf,
    pub auth_service: AuthService,
    pub frequency_service: FrequencyService,
    pub registry_service: RegistryService,
    pub export_service: ExportService,
    pub dashboard_service: DashboardService,
    pub settings_service: SettingsService,
    pub seed_service: SeedService,
    pub event_code_repo: EventCodeRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Configuração ausente derruba a inicialização de propósito.
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let uploads_dir =
            PathBuf::from(env::var("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".to_string()));

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let unit_repo = UnitRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        let org_repo = OrganizationRepository::new(db_pool.clone());
        let frequency_repo = FrequencyRepository::new(db_pool.clone());
        let event_code_repo = EventCodeRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let frequency_service = FrequencyService::new(
            frequency_repo.clone(),
            employee_repo.clone(),
            unit_repo.clone(),
            db_pool.clone(),
        );
        let registry_service = RegistryService::new(
            unit_repo.clone(),
            employee_repo.clone(),
            user_repo.clone(),
            auth_service.clone(),
            db_pool.clone(),
        );
        let export_service = ExportService::new(
            frequency_repo.clone(),
            employee_repo.clone(),
            unit_repo.clone(),
            org_repo.clone(),
            uploads_dir.clone(),
            db_pool.clone(),
        );
        let dashboard_service = DashboardService::new(dashboard_repo);
        let settings_service = SettingsService::new(org_repo.clone(), uploads_dir.clone());
        let seed_service = SeedService::new(
            org_repo,
            unit_repo,
            user_repo,
            employee_repo,
            frequency_repo,
            event_code_repo.clone(),
            auth_service.clone(),
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            uploads_dir,
            auth_service,
            frequency_service,
            registry_service,
            export_service,
            dashboard_service,
            settings_service,
            seed_service,
            event_code_repo,
        })
    }
}
