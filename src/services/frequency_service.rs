// Fluxo da folha de frequência mensal: carregar, copiar do mês anterior,
// salvar rascunho e finalizar.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EmployeeRepository, FrequencyRepository, UnitRepository},
    models::{
        auth::User,
        frequency::{
            EntryInput, FrequencyEntry, FrequencySheet, LogAction, SheetPayload, SheetRow,
            SheetView,
        },
        registry::{Employee, Unit},
    },
};

// Período imediatamente anterior; janeiro volta para dezembro do ano anterior.
pub fn previous_period(month: i32, year: i32) -> (i32, i32) {
    if month == 1 {
        (12, year - 1)
    } else {
        (month - 1, year)
    }
}

// Projeta as entradas persistidas sobre a lista de funcionários da unidade.
// Funcionário sem entrada recebe uma linha zerada; entrada de funcionário
// que saiu da unidade é descartada.
pub fn merge_rows(employees: Vec<Employee>, entries: &[FrequencyEntry]) -> Vec<SheetRow> {
    let by_employee: HashMap<Uuid, &FrequencyEntry> =
        entries.iter().map(|e| (e.employee_id, e)).collect();

    employees
        .into_iter()
        .map(|employee| match by_employee.get(&employee.id) {
            Some(entry) => SheetRow::from_entry(employee, entry),
            None => SheetRow::blank(employee),
        })
        .collect()
}

// Entrada apontando para funcionário que não é da unidade é recusada,
// não descartada em silêncio.
pub fn ensure_entries_belong(
    employees: &[Employee],
    entries: &[EntryInput],
) -> Result<(), AppError> {
    let ids: HashSet<Uuid> = employees.iter().map(|e| e.id).collect();
    for entry in entries {
        if !ids.contains(&entry.employee_id) {
            return Err(AppError::EmployeeNotFound);
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct FrequencyService {
    frequency_repo: FrequencyRepository,
    employee_repo: EmployeeRepository,
    unit_repo: UnitRepository,
    pool: PgPool, // Usamos a pool para iniciar transações
}

impl FrequencyService {
    pub fn new(
        frequency_repo: FrequencyRepository,
        employee_repo: EmployeeRepository,
        unit_repo: UnitRepository,
        pool: PgPool,
    ) -> Self {
        Self { frequency_repo, employee_repo, unit_repo, pool }
    }

    // Um admin alcança qualquer unidade da sua organização; um responsável,
    // apenas a própria.
    pub async fn ensure_unit_access(&self, user: &User, unit_id: Uuid) -> Result<Unit, AppError> {
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
        Ok(unit)
    }

    // Carrega o período pedido. Não existir folha não é erro: devolve uma
    // linha zerada por funcionário, pronta para preenchimento.
    pub async fn load_sheet(
        &self,
        user: &User,
        unit_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<SheetView, AppError> {
        self.ensure_unit_access(user, unit_id).await?;

        let employees = self.employee_repo.list_for_unit(&self.pool, unit_id).await?;
        let sheet = self.frequency_repo.find_sheet(unit_id, month, year).await?;

        let rows = match &sheet {
            Some(sheet) => {
                let entries = self.frequency_repo.list_entries(sheet.id).await?;
                merge_rows(employees, &entries)
            }
            None => merge_rows(employees, &[]),
        };

        Ok(SheetView { sheet, rows })
    }

    // Devolve a folha do período anterior projetada na lista ATUAL de
    // funcionários, para o cliente sobrescrever o rascunho em memória.
    // Nada é persistido aqui.
    pub async fn load_previous_sheet(
        &self,
        user: &User,
        unit_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<SheetView, AppError> {
        self.ensure_unit_access(user, unit_id).await?;

        let (prev_month, prev_year) = previous_period(month, year);
        let sheet = self
            .frequency_repo
            .find_sheet(unit_id, prev_month, prev_year)
            .await?
            .ok_or(AppError::PreviousSheetNotFound)?;

        let employees = self.employee_repo.list_for_unit(&self.pool, unit_id).await?;
        let entries = self.frequency_repo.list_entries(sheet.id).await?;

        Ok(SheetView { sheet: Some(sheet), rows: merge_rows(employees, &entries) })
    }

    // Upsert idempotente: repetir a chamada com os mesmos valores deixa as
    // tabelas como estavam; só o log de auditoria cresce.
    pub async fn save_draft(
        &self,
        user: &User,
        payload: &SheetPayload,
    ) -> Result<FrequencySheet, AppError> {
        self.ensure_unit_access(user, payload.unit_id).await?;

        let mut tx = self.pool.begin().await?;

        let employees = self.employee_repo.list_for_unit(&mut *tx, payload.unit_id).await?;
        ensure_entries_belong(&employees, &payload.entries)?;

        let sheet = self
            .frequency_repo
            .upsert_sheet(
                &mut *tx,
                user.organization_id,
                payload.unit_id,
                payload.month,
                payload.year,
            )
            .await?;

        for entry in &payload.entries {
            self.frequency_repo.upsert_entry(&mut *tx, sheet.id, entry).await?;
        }

        self.frequency_repo
            .append_log(&mut *tx, sheet.id, user.id, LogAction::SaveDraft)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "💾 Rascunho salvo: unidade {} período {}/{}",
            payload.unit_id,
            payload.month,
            payload.year
        );
        Ok(sheet)
    }

    // Finalizar sempre executa os efeitos do rascunho antes de virar o
    // status, na mesma transação. Uma folha sem entradas ainda pode ser
    // enviada, e o envio não trava rascunhos posteriores.
    pub async fn finalize(
        &self,
        user: &User,
        payload: &SheetPayload,
    ) -> Result<FrequencySheet, AppError> {
        self.ensure_unit_access(user, payload.unit_id).await?;

        let mut tx = self.pool.begin().await?;

        let employees = self.employee_repo.list_for_unit(&mut *tx, payload.unit_id).await?;
        ensure_entries_belong(&employees, &payload.entries)?;

        let sheet = self
            .frequency_repo
            .upsert_sheet(
                &mut *tx,
                user.organization_id,
                payload.unit_id,
                payload.month,
                payload.year,
            )
            .await?;

        for entry in &payload.entries {
            self.frequency_repo.upsert_entry(&mut *tx, sheet.id, entry).await?;
        }

        self.frequency_repo
            .append_log(&mut *tx, sheet.id, user.id, LogAction::SaveDraft)
            .await?;

        let sheet = self
            .frequency_repo
            .mark_submitted(&mut *tx, sheet.id, user.id, Utc::now())
            .await?;

        self.frequency_repo
            .append_log(&mut *tx, sheet.id, user.id, LogAction::Submit)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "📤 Folha enviada: unidade {} período {}/{}",
            payload.unit_id,
            payload.month,
            payload.year
        );
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn janeiro_volta_para_dezembro_do_ano_anterior() {
        assert_eq!(previous_period(1, 2025), (12, 2024));
    }

    #[test]
    fn meses_comuns_apenas_decrementam() {
        assert_eq!(previous_period(5, 2025), (4, 2025));
        assert_eq!(previous_period(12, 2025), (11, 2025));
        assert_eq!(previous_period(2, 2024), (1, 2024));
    }

    fn employee(name: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            unit_id: Uuid::new_v4(),
            name: name.into(),
            cpf: "000.000.000-00".into(),
            pis: None,
            role: "Enfermeiro".into(),
            contract_type: "EFETIVO".into(),
            floor_code: None,
            created_at: Utc::now(),
        }
    }

    fn entry_for(sheet_id: Uuid, employee_id: Uuid, absence_days: i32) -> FrequencyEntry {
        FrequencyEntry {
            id: Uuid::new_v4(),
            sheet_id,
            employee_id,
            absence_days,
            additional_night_hours: Decimal::ZERO,
            overtime_50_hours: Decimal::ZERO,
            overtime_100_hours: Decimal::ZERO,
            on_call_hours: Decimal::ZERO,
            vacation_days: 0,
            justification: Some("Atestado".into()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sem_folha_toda_linha_nasce_zerada() {
        let employees = vec![employee("A"), employee("B"), employee("C")];
        let rows = merge_rows(employees, &[]);
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.absence_days, 0);
            assert_eq!(row.additional_night_hours, Decimal::ZERO);
            assert_eq!(row.vacation_days, 0);
            assert!(row.justification.is_none());
        }
    }

    #[test]
    fn entrada_existente_sobrepoe_o_padrao_e_as_demais_ficam_zeradas() {
        let sheet_id = Uuid::new_v4();
        let employees = vec![employee("A"), employee("B"), employee("C")];
        let alvo = employees[1].id;
        let entries = vec![entry_for(sheet_id, alvo, 2)];

        let rows = merge_rows(employees, &entries);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].absence_days, 2);
        assert_eq!(rows[1].justification.as_deref(), Some("Atestado"));
        assert_eq!(rows[0].absence_days, 0);
        assert_eq!(rows[2].absence_days, 0);
    }

    #[test]
    fn entrada_de_funcionario_removido_e_descartada() {
        let sheet_id = Uuid::new_v4();
        let employees = vec![employee("A")];
        let entries = vec![entry_for(sheet_id, Uuid::new_v4(), 5)];

        let rows = merge_rows(employees, &entries);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].absence_days, 0);
    }

    fn entry_input(employee_id: Uuid, absence_days: i32) -> EntryInput {
        EntryInput {
            employee_id,
            absence_days,
            additional_night_hours: Decimal::ZERO,
            overtime_50_hours: Decimal::ZERO,
            overtime_100_hours: Decimal::ZERO,
            on_call_hours: Decimal::ZERO,
            vacation_days: 0,
            justification: None,
        }
    }

    #[test]
    fn entrada_de_funcionario_de_fora_da_lista_e_recusada() {
        let employees = vec![employee("A")];
        let entries = vec![entry_input(Uuid::new_v4(), 1)];
        assert!(matches!(
            ensure_entries_belong(&employees, &entries),
            Err(AppError::EmployeeNotFound)
        ));
    }

    #[test]
    fn entradas_da_propria_unidade_passam() {
        let employees = vec![employee("A"), employee("B")];
        let entries: Vec<EntryInput> =
            employees.iter().map(|e| entry_input(e.id, 0)).collect();
        assert!(ensure_entries_belong(&employees, &entries).is_ok());
    }

    // --- Testes com banco (sqlx::test aplica as migrações de ./migrations) ---

    use crate::db::{OrganizationRepository, UserRepository};
    use crate::models::auth::ROLE_ADMIN;
    use crate::models::frequency::SheetStatus;

    async fn setup(pool: &PgPool) -> (FrequencyService, User, Unit, Vec<Employee>) {
        let org_repo = OrganizationRepository::new(pool.clone());
        let unit_repo = UnitRepository::new(pool.clone());
        let user_repo = UserRepository::new(pool.clone());
        let employee_repo = EmployeeRepository::new(pool.clone());
        let frequency_repo = FrequencyRepository::new(pool.clone());

        let org = org_repo
            .create(pool, "Secretaria de Saúde", "saude")
            .await
            .unwrap();
        let unit = unit_repo
            .create(pool, org.id, "UBS Central", "Av. Principal, 500 - Centro")
            .await
            .unwrap();
        let user = user_repo
            .create_user(
                pool,
                org.id,
                "Maria Silva",
                "admin@example.com",
                "$2b$12$hash-de-teste",
                ROLE_ADMIN,
                None,
            )
            .await
            .unwrap();

        let mut employees = Vec::new();
        for i in 0..2 {
            let employee = employee_repo
                .create(
                    pool,
                    org.id,
                    unit.id,
                    &format!("Funcionário {}", i + 1),
                    &format!("00{}.000.000-00", i),
                    None,
                    "Enfermeiro",
                    "EFETIVO",
                    None,
                )
                .await
                .unwrap();
            employees.push(employee);
        }

        let service =
            FrequencyService::new(frequency_repo, employee_repo, unit_repo, pool.clone());
        (service, user, unit, employees)
    }

    #[sqlx::test]
    async fn salvar_rascunho_duas_vezes_nao_duplica_linhas(pool: PgPool) {
        let (service, user, unit, employees) = setup(&pool).await;
        let payload = SheetPayload {
            unit_id: unit.id,
            month: 5,
            year: 2025,
            entries: employees.iter().map(|e| entry_input(e.id, 1)).collect(),
        };

        service.save_draft(&user, &payload).await.unwrap();
        let sheet = service.save_draft(&user, &payload).await.unwrap();

        let sheets: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM frequency_sheets WHERE unit_id = $1")
                .bind(unit.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(sheets, 1);

        let entries: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM frequency_entries WHERE sheet_id = $1")
                .bind(sheet.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(entries, employees.len() as i64);
        assert_eq!(sheet.status, SheetStatus::Draft);
    }

    #[sqlx::test]
    async fn finalizar_sem_entradas_envia_a_folha(pool: PgPool) {
        let (service, user, unit, _employees) = setup(&pool).await;
        let payload = SheetPayload {
            unit_id: unit.id,
            month: 1,
            year: 2025,
            entries: Vec::new(),
        };

        let sheet = service.finalize(&user, &payload).await.unwrap();
        assert_eq!(sheet.status, SheetStatus::Submitted);
        assert_eq!(sheet.submitted_by, Some(user.id));
        assert!(sheet.submitted_at.is_some());
    }

    #[sqlx::test]
    async fn finalizar_nao_trava_rascunhos_posteriores(pool: PgPool) {
        let (service, user, unit, employees) = setup(&pool).await;
        let payload = SheetPayload {
            unit_id: unit.id,
            month: 3,
            year: 2025,
            entries: employees.iter().map(|e| entry_input(e.id, 0)).collect(),
        };

        service.finalize(&user, &payload).await.unwrap();
        let sheet = service.save_draft(&user, &payload).await.unwrap();

        // O rascunho posterior não rebaixa o status já enviado.
        assert_eq!(sheet.status, SheetStatus::Submitted);
    }

    #[sqlx::test]
    async fn rascunho_com_funcionario_de_outra_unidade_e_recusado(pool: PgPool) {
        let (service, user, unit, _employees) = setup(&pool).await;

        let outra_unidade = UnitRepository::new(pool.clone())
            .create(&pool, user.organization_id, "UBS Jardim", "Rua das Árvores, 45")
            .await
            .unwrap();
        let intruso = EmployeeRepository::new(pool.clone())
            .create(
                &pool,
                user.organization_id,
                outra_unidade.id,
                "Funcionário Alheio",
                "099.000.000-00",
                None,
                "Médico",
                "EFETIVO",
                None,
            )
            .await
            .unwrap();

        let payload = SheetPayload {
            unit_id: unit.id,
            month: 7,
            year: 2025,
            entries: vec![entry_input(intruso.id, 2)],
        };

        let err = service.save_draft(&user, &payload).await.unwrap_err();
        assert!(matches!(err, AppError::EmployeeNotFound));

        let sheets: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM frequency_sheets WHERE unit_id = $1")
                .bind(unit.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(sheets, 0);
    }
}
