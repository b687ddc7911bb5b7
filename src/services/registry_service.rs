// Cadastros de unidades, funcionários e usuários. CRUD simples, com o
// escopo por organização e por papel aplicado aqui.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EmployeeRepository, UnitRepository, UserRepository},
    models::{
        auth::{CreateUserPayload, UpdateUserPayload, User, UserListing},
        registry::{Employee, EmployeePayload, Unit, UnitListing, UnitPayload},
    },
    services::auth::{AuthService, TEST_PASSWORD},
};

#[derive(Clone)]
pub struct RegistryService {
    unit_repo: UnitRepository,
    employee_repo: EmployeeRepository,
    user_repo: UserRepository,
    auth_service: AuthService,
    pool: PgPool,
}

impl RegistryService {
    pub fn new(
        unit_repo: UnitRepository,
        employee_repo: EmployeeRepository,
        user_repo: UserRepository,
        auth_service: AuthService,
        pool: PgPool,
    ) -> Self {
        Self { unit_repo, employee_repo, user_repo, auth_service, pool }
    }

    // --- Unidades ---

    // Admin enxerga todas as unidades da organização; o responsável, só a sua.
    pub async fn list_units(&self, user: &User) -> Result<Vec<UnitListing>, AppError> {
        let only_unit = if user.is_admin() {
            None
        } else {
            match user.unit_id {
                Some(id) => Some(id),
                // Responsável sem unidade atribuída não enxerga nada.
                None => return Ok(Vec::new()),
            }
        };
        self.unit_repo
            .list_for_organization(user.organization_id, only_unit)
            .await
    }

    pub async fn create_unit(&self, user: &User, payload: &UnitPayload) -> Result<Unit, AppError> {
        self.unit_repo
            .create(&self.pool, user.organization_id, &payload.name, &payload.location)
            .await
    }

    pub async fn update_unit(
        &self,
        user: &User,
        unit_id: Uuid,
        payload: &UnitPayload,
    ) -> Result<Unit, AppError> {
        self.unit_repo
            .update(user.organization_id, unit_id, &payload.name, &payload.location)
            .await
    }

    // --- Funcionários ---

    async fn ensure_unit_access(&self, user: &User, unit_id: Uuid) -> Result<Unit, AppError> {
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

    pub async fn list_employees(&self, user: &User, unit_id: Uuid) -> Result<Vec<Employee>, AppError> {
        self.ensure_unit_access(user, unit_id).await?;
        self.employee_repo.list_for_unit(&self.pool, unit_id).await
    }

    pub async fn create_employee(
        &self,
        user: &User,
        payload: &EmployeePayload,
    ) -> Result<Employee, AppError> {
        self.ensure_unit_access(user, payload.unit_id).await?;
        self.employee_repo
            .create(
                &self.pool,
                user.organization_id,
                payload.unit_id,
                &payload.name,
                &payload.cpf,
                payload.pis.as_deref(),
                &payload.role,
                &payload.contract_type,
                payload.floor_code.as_deref(),
            )
            .await
    }

    pub async fn update_employee(
        &self,
        user: &User,
        employee_id: Uuid,
        payload: &EmployeePayload,
    ) -> Result<Employee, AppError> {
        self.ensure_unit_access(user, payload.unit_id).await?;
        self.employee_repo
            .update(
                user.organization_id,
                employee_id,
                payload.unit_id,
                &payload.name,
                &payload.cpf,
                payload.pis.as_deref(),
                &payload.role,
                &payload.contract_type,
                payload.floor_code.as_deref(),
            )
            .await
    }

    pub async fn delete_employee(&self, user: &User, employee_id: Uuid) -> Result<(), AppError> {
        let employee = self
            .employee_repo
            .find_by_id(employee_id)
            .await?
            .ok_or(AppError::EmployeeNotFound)?;

        self.ensure_unit_access(user, employee.unit_id).await?;
        self.employee_repo.delete(user.organization_id, employee_id).await
    }

    // --- Usuários (somente admin; o guard do handler garante isso) ---

    pub async fn list_users(&self, user: &User) -> Result<Vec<UserListing>, AppError> {
        self.user_repo.list_for_organization(user.organization_id).await
    }

    pub async fn create_user(
        &self,
        admin: &User,
        payload: &CreateUserPayload,
    ) -> Result<User, AppError> {
        // Sem senha no payload, o usuário nasce com a senha de teste.
        let password = payload.password.as_deref().unwrap_or(TEST_PASSWORD);
        let password_hash = self.auth_service.hash_password(password).await?;

        self.user_repo
            .create_user(
                &self.pool,
                admin.organization_id,
                &payload.name,
                &payload.email,
                &password_hash,
                &payload.role,
                payload.unit_id,
            )
            .await
    }

    pub async fn update_user(
        &self,
        admin: &User,
        user_id: Uuid,
        payload: &UpdateUserPayload,
    ) -> Result<User, AppError> {
        self.user_repo
            .update_user(
                admin.organization_id,
                user_id,
                &payload.name,
                &payload.role,
                payload.unit_id,
            )
            .await
    }

    pub async fn set_user_active(
        &self,
        admin: &User,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<User, AppError> {
        self.user_repo
            .set_active(admin.organization_id, user_id, is_active)
            .await
    }
}
