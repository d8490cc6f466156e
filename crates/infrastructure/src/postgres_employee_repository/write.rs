use staffroll_core::{AppError, AppResult};
use staffroll_domain::{Employee, EmployeeId};
use uuid::Uuid;

use super::PostgresEmployeeRepository;
use crate::postgres_reference_data_repository::FOREIGN_KEY_VIOLATION;

const UNIQUE_VIOLATION: &str = "23505";

fn is_violation(error: &sqlx::Error, code: &str) -> bool {
    matches!(error, sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some(code))
}

impl PostgresEmployeeRepository {
    pub(super) async fn create_employee_impl(&self, employee: Employee) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (
                id, country_id, state_id, city_id, department_id,
                first_name, middle_name, last_name, address, zip_code,
                date_of_birth, date_hired, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(employee.id().as_uuid())
        .bind(employee.country_id().as_uuid())
        .bind(employee.state_id().as_uuid())
        .bind(employee.city_id().as_uuid())
        .bind(employee.department_id().as_uuid())
        .bind(employee.first_name())
        .bind(employee.middle_name())
        .bind(employee.last_name())
        .bind(employee.address())
        .bind(employee.zip_code())
        .bind(employee.date_of_birth())
        .bind(employee.date_hired())
        .bind(employee.created_at())
        .bind(employee.updated_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) if is_violation(&error, UNIQUE_VIOLATION) => Err(AppError::Conflict(
                format!("employee '{}' already exists", employee.id()),
            )),
            Err(error) if is_violation(&error, FOREIGN_KEY_VIOLATION) => {
                Err(AppError::Validation(format!(
                    "employee '{}' references missing location or department rows",
                    employee.id()
                )))
            }
            Err(error) => Err(AppError::Internal(format!(
                "failed to create employee: {error}"
            ))),
        }
    }

    pub(super) async fn update_employee_impl(&self, employee: Employee) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET country_id = $2,
                state_id = $3,
                city_id = $4,
                department_id = $5,
                first_name = $6,
                middle_name = $7,
                last_name = $8,
                address = $9,
                zip_code = $10,
                date_of_birth = $11,
                date_hired = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(employee.id().as_uuid())
        .bind(employee.country_id().as_uuid())
        .bind(employee.state_id().as_uuid())
        .bind(employee.city_id().as_uuid())
        .bind(employee.department_id().as_uuid())
        .bind(employee.first_name())
        .bind(employee.middle_name())
        .bind(employee.last_name())
        .bind(employee.address())
        .bind(employee.zip_code())
        .bind(employee.date_of_birth())
        .bind(employee.date_hired())
        .bind(employee.updated_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(AppError::NotFound(format!(
                "employee '{}' does not exist",
                employee.id()
            ))),
            Ok(_) => Ok(()),
            Err(error) if is_violation(&error, FOREIGN_KEY_VIOLATION) => {
                Err(AppError::Validation(format!(
                    "employee '{}' references missing location or department rows",
                    employee.id()
                )))
            }
            Err(error) => Err(AppError::Internal(format!(
                "failed to update employee: {error}"
            ))),
        }
    }

    pub(super) async fn delete_employee_impl(&self, employee_id: EmployeeId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(employee_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| map_delete_error(error, "employee"))?;

        Ok(result.rows_affected() > 0)
    }

    pub(super) async fn delete_employees_impl(&self, employee_ids: &[EmployeeId]) -> AppResult<u64> {
        if employee_ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<Uuid> = employee_ids.iter().map(EmployeeId::as_uuid).collect();
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start employee delete transaction: {error}"))
        })?;

        let result = sqlx::query("DELETE FROM employees WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *transaction)
            .await
            .map_err(|error| map_delete_error(error, "employees"))?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit employee delete transaction: {error}"))
        })?;

        Ok(result.rows_affected())
    }
}

fn map_delete_error(error: sqlx::Error, what: &str) -> AppError {
    if is_violation(&error, FOREIGN_KEY_VIOLATION) {
        return AppError::Conflict(format!("{what} cannot be deleted while still referenced"));
    }

    AppError::Internal(format!("failed to delete {what}: {error}"))
}
