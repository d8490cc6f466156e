//! Application services and ports.

#![forbid(unsafe_code)]

mod employee_ports;
mod employee_resource;
mod employee_service;

pub use employee_ports::{
    EmployeeColumn, EmployeeListQuery, EmployeePage, EmployeeRepository, EmployeeSearchQuery,
    EmployeeSort, ReferenceDataRepository,
};
pub use employee_resource::{
    ADMIN_PATH_PREFIX, EMPLOYEE_DELETED_BODY, EMPLOYEE_DELETED_TITLE, employee_resource,
};
pub use employee_service::{
    BulkDeleteOutcome, DEFAULT_PER_PAGE, EmployeeForm, EmployeeListRequest, EmployeeListing,
    EmployeeRow, EmployeeService, FormUpdate, PER_PAGE_OPTIONS,
};
