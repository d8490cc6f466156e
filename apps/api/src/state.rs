use std::sync::Arc;

use staffroll_application::{EmployeeService, ReferenceDataRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub employee_service: EmployeeService,
    pub reference_data: Arc<dyn ReferenceDataRepository>,
}
