mod conversions;
mod types;

pub use types::{
    BulkDeleteEmployeesRequest, BulkDeleteEmployeesResponse, DetailSectionResponse,
    EmployeeFormResponse, EmployeeListParams, EmployeeListResponse, EmployeeResponse,
    FormUpdateRequest, FormUpdateResponse, GlobalSearchParams, GlobalSearchResultResponse,
    NavigationBadgeResponse, NavigationResponse, NotificationResponse, ResourceResponse,
    SaveEmployeeRequest, SelectOptionResponse,
};
