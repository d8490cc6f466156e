//! Domain entities, invariants, and admin resource schemas.

#![forbid(unsafe_code)]

mod attribute;
mod employee;
mod filter;
mod form;
mod ids;
mod infolist;
mod notification;
mod reference;
mod resource;
mod search;
mod table;

pub use attribute::{
    AttributePath, AttributeSource, AttributeValue, format_date_time, format_long_date,
    format_short_date, humanize,
};
pub use employee::{
    EMPLOYEE_TEXT_MAX_LENGTH, EMPLOYEE_ZIP_CODE_MAX_LENGTH, Employee, EmployeeAttributes,
    EmployeeRecord,
};
pub use filter::{
    ActiveFilters, DateRangeValue, FilterKind, FilterSchema, FiltersLayout, Indicator,
    IndicatorRemoval, TableFilter, date_range_indicators,
};
pub use form::{
    FORM_DATE_FORMAT, FormField, FormFieldKind, FormSchema, FormSection, FormState, OptionSource,
    SelectOption,
};
pub use ids::{CityId, CountryId, DepartmentId, EmployeeId, StateId};
pub use infolist::{DetailEntry, DetailSchema, DetailSection, RenderedDetailSection};
pub use notification::{Notification, NotificationStatus};
pub use reference::{City, Country, Department, State};
pub use resource::{PageKind, ResourceDescriptor, ResourcePage, ResourceSchemas};
pub use search::{
    BadgeColor, GlobalSearchResult, GlobalSearchSchema, NavigationBadge, NavigationItem,
    SearchDetail,
};
pub use table::{
    BulkAction, BulkActionGroup, ColumnFormat, ColumnToggle, RowAction, SortDirection,
    TableColumn, TableSchema,
};
