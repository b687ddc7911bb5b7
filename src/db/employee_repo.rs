// Repositório de funcionários.

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::registry::Employee};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

const EMPLOYEE_COLUMNS: &str =
    "id, organization_id, unit_id, name, cpf, pis, role, contract_type, floor_code, created_at";

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    pub async fn list_for_unit<'e, E>(
        &self,
        executor: E,
        unit_id: Uuid,
    ) -> Result<Vec<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE unit_id = $1 ORDER BY name"
        ))
        .bind(unit_id)
        .fetch_all(executor)
        .await?;
        Ok(employees)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        unit_id: Uuid,
        name: &str,
        cpf: &str,
        pis: Option<&str>,
        role: &str,
        contract_type: &str,
        floor_code: Option<&str>,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees
                (organization_id, unit_id, name, cpf, pis, role, contract_type, floor_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(organization_id)
        .bind(unit_id)
        .bind(name)
        .bind(cpf)
        .bind(pis)
        .bind(role)
        .bind(contract_type)
        .bind(floor_code)
        .fetch_one(executor)
        .await?;
        Ok(employee)
    }

    pub async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        unit_id: Uuid,
        name: &str,
        cpf: &str,
        pis: Option<&str>,
        role: &str,
        contract_type: &str,
        floor_code: Option<&str>,
    ) -> Result<Employee, AppError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees
            SET unit_id = $3, name = $4, cpf = $5, pis = $6,
                role = $7, contract_type = $8, floor_code = $9
            WHERE id = $2 AND organization_id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(organization_id)
        .bind(id)
        .bind(unit_id)
        .bind(name)
        .bind(cpf)
        .bind(pis)
        .bind(role)
        .bind(contract_type)
        .bind(floor_code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::EmployeeNotFound)?;
        Ok(employee)
    }

    // Funcionário é o único cadastro com remoção de fato. As entradas de
    // frequência dele caem junto (ON DELETE CASCADE).
    pub async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $2 AND organization_id = $1")
            .bind(organization_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::EmployeeNotFound);
        }
        Ok(())
    }
}
