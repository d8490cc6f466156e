mod common;
mod employees;

pub use common::HealthResponse;
pub use employees::{
    BulkDeleteEmployeesRequest, BulkDeleteEmployeesResponse, DetailSectionResponse,
    EmployeeFormResponse, EmployeeListParams, EmployeeListResponse, EmployeeResponse,
    FormUpdateRequest, FormUpdateResponse, GlobalSearchParams, GlobalSearchResultResponse,
    NavigationBadgeResponse, NavigationResponse, NotificationResponse, ResourceResponse,
    SaveEmployeeRequest, SelectOptionResponse,
};
