use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use staffroll_domain::{FormSchema, FormState, ResourceDescriptor};
use ts_rs::TS;

/// Query parameters of the employee list page.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-list-params.ts"
)]
pub struct EmployeeListParams {
    pub search: Option<String>,
    /// Column path to sort by, e.g. `department.name`.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub direction: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub department_id: Option<String>,
    pub country_id: Option<String>,
    pub state_id: Option<String>,
    pub city_id: Option<String>,
    /// Inclusive `YYYY-MM-DD` lower bound on the creation date.
    pub created_from: Option<String>,
    /// Inclusive `YYYY-MM-DD` upper bound on the creation date.
    pub created_until: Option<String>,
    /// Comma-separated paths of hidden-by-default columns to show.
    pub toggled: Option<String>,
}

/// How a list column renders its cells.
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/column-format-dto.ts"
)]
pub enum ColumnFormatDto {
    Text,
    Date,
    DateTime,
}

/// Visible list column.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/table-column-response.ts"
)]
pub struct TableColumnResponse {
    pub name: String,
    pub label: String,
    pub format: ColumnFormatDto,
    pub sortable: bool,
    pub searchable: bool,
}

/// One rendered list row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-row-response.ts"
)]
pub struct EmployeeRowResponse {
    pub id: String,
    /// Cell text aligned with the visible columns.
    pub cells: Vec<Option<String>>,
}

/// Removable chip summarizing an active filter.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/filter-indicator-response.ts"
)]
pub struct FilterIndicatorResponse {
    pub label: String,
    pub filter: String,
    /// Input cleared by removing the chip; `null` clears the whole filter.
    pub removes_field: Option<String>,
}

/// API representation of one list page.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-list-response.ts"
)]
pub struct EmployeeListResponse {
    pub columns: Vec<TableColumnResponse>,
    pub rows: Vec<EmployeeRowResponse>,
    pub indicators: Vec<FilterIndicatorResponse>,
    pub page: usize,
    pub per_page: usize,
    #[ts(type = "number")]
    pub total: u64,
}

/// API representation of an employee with its related names.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-response.ts"
)]
pub struct EmployeeResponse {
    pub id: String,
    pub country_id: String,
    pub country_name: Option<String>,
    pub state_id: String,
    pub state_name: Option<String>,
    pub city_id: String,
    pub city_name: Option<String>,
    pub department_id: String,
    pub department_name: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub zip_code: String,
    pub date_of_birth: String,
    pub date_hired: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One selectable option.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/select-option-response.ts"
)]
pub struct SelectOptionResponse {
    pub value: String,
    pub label: String,
}

/// Create or edit form ready to render.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-form-response.ts"
)]
pub struct EmployeeFormResponse {
    /// URL the form submits to.
    pub action: String,
    #[ts(type = "Record<string, unknown>")]
    pub schema: FormSchema,
    #[ts(type = "Record<string, unknown>")]
    pub state: FormState,
    pub options: BTreeMap<String, Vec<SelectOptionResponse>>,
}

/// Incoming payload for create and edit submissions.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-employee-request.ts"
)]
pub struct SaveEmployeeRequest {
    #[ts(type = "Record<string, unknown>")]
    pub state: FormState,
}

/// Incoming payload for one live field change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/form-update-request.ts"
)]
pub struct FormUpdateRequest {
    #[ts(type = "Record<string, unknown>")]
    pub state: FormState,
    pub field: String,
    #[ts(type = "unknown")]
    pub value: Value,
}

/// Form state after a live field change.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/form-update-response.ts"
)]
pub struct FormUpdateResponse {
    #[ts(type = "Record<string, unknown>")]
    pub state: FormState,
    pub cleared: Vec<String>,
    pub options: BTreeMap<String, Vec<SelectOptionResponse>>,
}

/// Incoming payload for bulk deletion.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/bulk-delete-employees-request.ts"
)]
pub struct BulkDeleteEmployeesRequest {
    pub ids: Vec<String>,
}

/// Flash notification status.
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/notification-status-dto.ts"
)]
pub enum NotificationStatusDto {
    Success,
}

/// Flash notification shown after an action.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/notification-response.ts"
)]
pub struct NotificationResponse {
    pub status: NotificationStatusDto,
    pub title: String,
    pub body: Option<String>,
}

/// Result of a bulk deletion.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/bulk-delete-employees-response.ts"
)]
pub struct BulkDeleteEmployeesResponse {
    #[ts(type = "number")]
    pub deleted: u64,
    pub notification: NotificationResponse,
}

/// One label/value line of the read-only view.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/detail-entry-response.ts"
)]
pub struct DetailEntryResponse {
    pub label: String,
    pub value: Option<String>,
}

/// One section of the read-only view.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/detail-section-response.ts"
)]
pub struct DetailSectionResponse {
    pub heading: String,
    pub columns: u8,
    pub entries: Vec<DetailEntryResponse>,
}

/// Query parameters of the global search.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/global-search-params.ts"
)]
pub struct GlobalSearchParams {
    pub q: Option<String>,
}

/// Label/value detail line of a search hit.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/search-detail-response.ts"
)]
pub struct SearchDetailResponse {
    pub label: String,
    pub value: String,
}

/// One global search hit.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/global-search-result-response.ts"
)]
pub struct GlobalSearchResultResponse {
    pub title: String,
    pub details: Vec<SearchDetailResponse>,
    pub url: String,
}

/// Badge color palette.
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/badge-color-dto.ts"
)]
pub enum BadgeColorDto {
    Gray,
    Primary,
    Success,
    Warning,
    Danger,
}

/// Count badge of a navigation entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/navigation-badge-response.ts"
)]
pub struct NavigationBadgeResponse {
    pub value: String,
    pub color: BadgeColorDto,
}

/// Sidebar entry of the employee resource.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/navigation-response.ts"
)]
pub struct NavigationResponse {
    pub label: String,
    pub icon: String,
    pub group: String,
    pub url: String,
    pub badge: NavigationBadgeResponse,
}

/// Full resource descriptor and the path its pages live under.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resource-response.ts"
)]
pub struct ResourceResponse {
    pub base_path: String,
    #[ts(type = "Record<string, unknown>")]
    pub descriptor: ResourceDescriptor,
}
