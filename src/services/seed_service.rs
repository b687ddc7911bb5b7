// Rotinas de bootstrap: checagem do esquema, carga de demonstração e
// usuário administrador de teste. A carga é determinística de propósito,
// para as mesmas chamadas produzirem o mesmo banco.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        EmployeeRepository, EventCodeRepository, FrequencyRepository, OrganizationRepository,
        UnitRepository, UserRepository,
    },
    models::{
        auth::{ROLE_ADMIN, ROLE_RESPONSIBLE},
        frequency::{EntryInput, LogAction},
        registry::CONTRACT_TYPES,
    },
    services::auth::{AuthService, TEST_PASSWORD},
};

pub const DEMO_ORG_NAME: &str = "Secretaria de Saúde";
pub const DEMO_ORG_SLUG: &str = "saude";
pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";

const CORE_TABLES: [&str; 9] = [
    "organizations",
    "units",
    "users",
    "employees",
    "frequency_sheets",
    "frequency_entries",
    "event_types",
    "event_codes",
    "submissions_log",
];

const DEMO_UNITS: [(&str, &str); 5] = [
    ("UBS Vila Nova", "Rua das Flores, 123 - Vila Nova"),
    ("UBS Central", "Av. Principal, 500 - Centro"),
    ("UBS Jardim", "Rua das Árvores, 45 - Jardim"),
    ("UPA 24h", "Av. das Nações, 1000 - Centro"),
    ("Hospital Municipal", "Rua da Saúde, 789 - Centro"),
];

const DEMO_ROLES: [&str; 5] = [
    "Enfermeiro",
    "Médico",
    "Técnico de Enfermagem",
    "Recepcionista",
    "Auxiliar Administrativo",
];

// CPF de demonstração no formato XXX.XXX.XXX-XX, derivado de dois índices.
pub fn demo_cpf(unit_index: usize, employee_index: usize) -> String {
    let digits: Vec<u8> = (0..11)
        .map(|i| ((unit_index * 7 + employee_index * 3 + i) % 10) as u8)
        .collect();
    format!(
        "{}{}{}.{}{}{}.{}{}{}-{}{}",
        digits[0], digits[1], digits[2], digits[3], digits[4], digits[5],
        digits[6], digits[7], digits[8], digits[9], digits[10],
    )
}

#[derive(Clone)]
pub struct SeedService {
    org_repo: OrganizationRepository,
    unit_repo: UnitRepository,
    user_repo: UserRepository,
    employee_repo: EmployeeRepository,
    frequency_repo: FrequencyRepository,
    event_code_repo: EventCodeRepository,
    auth_service: AuthService,
    pool: PgPool,
}

impl SeedService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        org_repo: OrganizationRepository,
        unit_repo: UnitRepository,
        user_repo: UserRepository,
        employee_repo: EmployeeRepository,
        frequency_repo: FrequencyRepository,
        event_code_repo: EventCodeRepository,
        auth_service: AuthService,
        pool: PgPool,
    ) -> Self {
        Self {
            org_repo,
            unit_repo,
            user_repo,
            employee_repo,
            frequency_repo,
            event_code_repo,
            auth_service,
            pool,
        }
    }

    // Confere se as tabelas do esquema existem (as migrações rodaram).
    pub async fn database_initialized(&self) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM information_schema.tables
            WHERE table_schema = 'public' AND table_name = ANY($1)
            "#,
        )
        .bind(&CORE_TABLES[..])
        .fetch_one(&self.pool)
        .await?;
        Ok(count as usize == CORE_TABLES.len())
    }

    // Carga de demonstração completa. Recusa rodar duas vezes.
    pub async fn seed_demo_data(&self) -> Result<(), AppError> {
        if self.org_repo.find_by_slug(DEMO_ORG_SLUG).await?.is_some() {
            return Err(AppError::Conflict(
                "O banco de dados já foi populado.".to_string(),
            ));
        }

        let password_hash = self.auth_service.hash_password(TEST_PASSWORD).await?;
        let event_types = self.event_code_repo.list_event_types().await?;

        let mut tx = self.pool.begin().await?;

        let org = self.org_repo.create(&mut *tx, DEMO_ORG_NAME, DEMO_ORG_SLUG).await?;
        tracing::info!("🏥 Organização de demonstração criada: {}", org.id);

        // Um código por (tipo de evento × vínculo), determinístico.
        for (t, event_type) in event_types.iter().enumerate() {
            for (c, contract_type) in CONTRACT_TYPES.iter().enumerate() {
                let input = crate::models::frequency::EventCodeInput {
                    event_type_id: event_type.id,
                    contract_type: (*contract_type).to_string(),
                    code: (100 + t * 10 + c) as i32,
                };
                self.event_code_repo.upsert_code(&mut *tx, org.id, &input).await?;
            }
        }

        let mut units = Vec::with_capacity(DEMO_UNITS.len());
        for (name, location) in DEMO_UNITS {
            units.push(self.unit_repo.create(&mut *tx, org.id, name, location).await?);
        }

        let admin = self
            .user_repo
            .create_user(
                &mut *tx,
                org.id,
                "Maria Silva",
                TEST_ADMIN_EMAIL,
                &password_hash,
                ROLE_ADMIN,
                None,
            )
            .await?;
        self.user_repo
            .create_user(
                &mut *tx,
                org.id,
                "João Santos",
                "joao.santos@example.com",
                &password_hash,
                ROLE_RESPONSIBLE,
                Some(units[1].id),
            )
            .await?;
        self.user_repo
            .create_user(
                &mut *tx,
                org.id,
                "Ana Oliveira",
                "ana.oliveira@example.com",
                &password_hash,
                ROLE_RESPONSIBLE,
                Some(units[2].id),
            )
            .await?;

        let today = Utc::now();
        let (month, year) = (today.month() as i32, today.year());

        for (u, unit) in units.iter().enumerate() {
            // Entre 5 e 8 funcionários por unidade.
            let employee_count = 5 + (u % 4);
            let mut employees = Vec::with_capacity(employee_count);

            for i in 0..employee_count {
                let employee = self
                    .employee_repo
                    .create(
                        &mut *tx,
                        org.id,
                        unit.id,
                        &format!("Funcionário {} - {}", i + 1, unit.name),
                        &demo_cpf(u, i),
                        None,
                        DEMO_ROLES[i % DEMO_ROLES.len()],
                        CONTRACT_TYPES[i % CONTRACT_TYPES.len()],
                        Some(&format!("{}", 100 + u * 10 + i)),
                    )
                    .await?;
                employees.push(employee);
            }

            // Folha do mês corrente, com status variados entre as unidades.
            let sheet = self
                .frequency_repo
                .upsert_sheet(&mut *tx, org.id, unit.id, month, year)
                .await?;

            for (i, employee) in employees.iter().enumerate() {
                let entry = EntryInput {
                    employee_id: employee.id,
                    absence_days: (i % 3) as i32,
                    additional_night_hours: Decimal::from(((u + i) % 20) as i64),
                    overtime_50_hours: Decimal::from((i % 15) as i64),
                    overtime_100_hours: Decimal::from((i % 10) as i64),
                    on_call_hours: Decimal::from(((u * 3 + i) % 24) as i64),
                    vacation_days: if i == 0 && u == 0 { 30 } else { 0 },
                    justification: if i % 5 == 0 {
                        Some("Observação sobre o funcionário".to_string())
                    } else {
                        None
                    },
                };
                self.frequency_repo.upsert_entry(&mut *tx, sheet.id, &entry).await?;
            }

            self.frequency_repo
                .append_log(&mut *tx, sheet.id, admin.id, LogAction::SaveDraft)
                .await?;

            // 3 de 5 unidades já enviaram a folha.
            if u % 2 == 0 {
                self.frequency_repo
                    .mark_submitted(&mut *tx, sheet.id, admin.id, today)
                    .await?;
                self.frequency_repo
                    .append_log(&mut *tx, sheet.id, admin.id, LogAction::Submit)
                    .await?;
            }
        }

        tx.commit().await?;
        tracing::info!("🌱 Seed concluído com sucesso!");
        Ok(())
    }

    // Garante a organização e o admin de teste; devolve true quando criou o usuário.
    pub async fn ensure_test_admin(&self) -> Result<bool, AppError> {
        let org = match self.org_repo.find_by_slug(DEMO_ORG_SLUG).await? {
            Some(org) => org,
            None => self.org_repo.create(&self.pool, DEMO_ORG_NAME, DEMO_ORG_SLUG).await?,
        };

        if self.user_repo.find_by_email(TEST_ADMIN_EMAIL).await?.is_some() {
            return Ok(false);
        }

        let password_hash = self.auth_service.hash_password(TEST_PASSWORD).await?;
        self.user_repo
            .create_user(
                &self.pool,
                org.id,
                "Maria Silva",
                TEST_ADMIN_EMAIL,
                &password_hash,
                ROLE_ADMIN,
                None,
            )
            .await?;
        tracing::info!("👤 Usuário de teste criado: {}", TEST_ADMIN_EMAIL);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_de_demonstracao_tem_o_formato_esperado() {
        let cpf = demo_cpf(0, 0);
        assert_eq!(cpf.len(), 14);
        assert_eq!(&cpf[3..4], ".");
        assert_eq!(&cpf[7..8], ".");
        assert_eq!(&cpf[11..12], "-");
    }

    #[test]
    fn cpf_de_demonstracao_e_deterministico() {
        assert_eq!(demo_cpf(2, 3), demo_cpf(2, 3));
        assert_ne!(demo_cpf(2, 3), demo_cpf(2, 4));
    }
}
