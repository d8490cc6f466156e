use std::collections::BTreeMap;
use std::sync::Arc;

use staffroll_core::AppResult;
use staffroll_domain::{
    ActiveFilters, EmployeeId, FormState, Indicator, Notification, ResourceDescriptor,
    SelectOption, SortDirection, TableColumn,
};

use crate::employee_resource::{ADMIN_PATH_PREFIX, employee_resource};
use crate::{EmployeeRepository, ReferenceDataRepository};

mod form_state;
mod records;
mod search;


/// Page sizes offered by the employee list.
pub const PER_PAGE_OPTIONS: [usize; 3] = [10, 25, 50];

/// Page size used when none is requested.
pub const DEFAULT_PER_PAGE: usize = 10;

/// List page request as submitted by the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeListRequest {
    /// Free-text search.
    pub search: Option<String>,
    /// Key of the column to sort by.
    pub sort: Option<String>,
    /// Sort direction, ascending unless given.
    pub direction: SortDirection,
    /// One-based page number.
    pub page: Option<usize>,
    /// Page size, one of [`PER_PAGE_OPTIONS`].
    pub per_page: Option<usize>,
    /// Submitted filter values.
    pub filters: ActiveFilters,
    /// Keys of toggleable columns the user switched on.
    pub toggled: Vec<String>,
}

/// Rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    /// Employee id.
    pub id: EmployeeId,
    /// Cell text per visible column; `None` renders as blank.
    pub cells: Vec<Option<String>>,
}

/// One rendered page of the employee list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeListing {
    /// Visible columns in display order.
    pub columns: Vec<TableColumn>,
    /// Rows of the page.
    pub rows: Vec<EmployeeRow>,
    /// Active filter indicators.
    pub indicators: Vec<Indicator>,
    /// One-based page number.
    pub page: usize,
    /// Page size.
    pub per_page: usize,
    /// Total matching employees.
    pub total: u64,
}

/// Result of a bulk delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkDeleteOutcome {
    /// Number of employees removed.
    pub deleted: u64,
    /// Notification to show.
    pub notification: Notification,
}

/// Form state and the options of every select field.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    /// Current field values.
    pub state: FormState,
    /// Options per select field name.
    pub options: BTreeMap<String, Vec<SelectOption>>,
}

/// Form state after a live field change.
#[derive(Debug, Clone, PartialEq)]
pub struct FormUpdate {
    /// Updated field values.
    pub state: FormState,
    /// Fields cleared by the change.
    pub cleared: Vec<String>,
    /// Recomputed options per select field name.
    pub options: BTreeMap<String, Vec<SelectOption>>,
}

/// Application service behind the employee admin resource.
#[derive(Clone)]
pub struct EmployeeService {
    resource: Arc<ResourceDescriptor>,
    employees: Arc<dyn EmployeeRepository>,
    reference_data: Arc<dyn ReferenceDataRepository>,
}

impl EmployeeService {
    /// Creates a service over the given repositories.
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        reference_data: Arc<dyn ReferenceDataRepository>,
    ) -> AppResult<Self> {
        Ok(Self {
            resource: Arc::new(employee_resource()?),
            employees,
            reference_data,
        })
    }

    /// Returns the resource descriptor.
    #[must_use]
    pub fn resource(&self) -> &ResourceDescriptor {
        &self.resource
    }

    /// Returns the path the resource pages are mounted under.
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("{ADMIN_PATH_PREFIX}/{}", self.resource.slug())
    }
}
