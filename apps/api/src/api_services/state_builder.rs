use std::sync::Arc;

use sqlx::PgPool;
use staffroll_application::{EmployeeRepository, EmployeeService, ReferenceDataRepository};
use staffroll_core::AppError;
use staffroll_infrastructure::{
    InMemoryEmployeeRepository, InMemoryReferenceDataRepository, PostgresEmployeeRepository,
    PostgresReferenceDataRepository,
};

use crate::state::AppState;

/// Builds state over Postgres when a pool is given, otherwise over process memory.
pub fn build_app_state(pool: Option<PgPool>) -> Result<AppState, AppError> {
    let (employees, reference_data): (
        Arc<dyn EmployeeRepository>,
        Arc<dyn ReferenceDataRepository>,
    ) = match pool {
        Some(pool) => (
            Arc::new(PostgresEmployeeRepository::new(pool.clone())),
            Arc::new(PostgresReferenceDataRepository::new(pool)),
        ),
        None => {
            let reference_data = Arc::new(InMemoryReferenceDataRepository::new());
            (
                Arc::new(InMemoryEmployeeRepository::new(reference_data.clone())),
                reference_data,
            )
        }
    };

    Ok(AppState {
        employee_service: EmployeeService::new(employees, reference_data.clone())?,
        reference_data,
    })
}
