use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use staffroll_application::{
    BulkDeleteOutcome, EmployeeForm, EmployeeListRequest, EmployeeListing, FormUpdate,
};
use staffroll_core::{AppError, AppResult};
use staffroll_domain::{
    ActiveFilters, BadgeColor, ColumnFormat, DateRangeValue, EmployeeRecord, FormSchema,
    GlobalSearchResult, Indicator, IndicatorRemoval, Notification, NotificationStatus,
    RenderedDetailSection, SelectOption, SortDirection, TableColumn,
};

use super::types::{
    BadgeColorDto, BulkDeleteEmployeesResponse, ColumnFormatDto, DetailEntryResponse,
    DetailSectionResponse, EmployeeFormResponse, EmployeeListParams, EmployeeListResponse,
    EmployeeResponse, EmployeeRowResponse, FilterIndicatorResponse, FormUpdateResponse,
    GlobalSearchResultResponse, NotificationResponse, NotificationStatusDto,
    SearchDetailResponse, SelectOptionResponse, TableColumnResponse,
};

const SELECT_FILTER_PARAMS: [&str; 4] = ["department_id", "country_id", "state_id", "city_id"];
const CREATED_AT_FILTER: &str = "created_at";

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_date(name: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    non_blank(value)
        .map(|value| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|error| {
                AppError::Validation(format!("invalid {name} '{value}': {error}"))
            })
        })
        .transpose()
}

impl EmployeeListParams {
    /// Converts raw query parameters into a list request.
    pub fn into_request(self) -> AppResult<EmployeeListRequest> {
        let direction = non_blank(self.direction)
            .map(|value| SortDirection::from_str(value.trim()))
            .transpose()?
            .unwrap_or_default();

        let mut filters = ActiveFilters::default();
        for (name, value) in SELECT_FILTER_PARAMS.into_iter().zip([
            self.department_id,
            self.country_id,
            self.state_id,
            self.city_id,
        ]) {
            if let Some(value) = non_blank(value) {
                filters.selects.insert(name.to_owned(), value);
            }
        }

        let created_at = DateRangeValue {
            from: parse_date("created_from", self.created_from)?,
            until: parse_date("created_until", self.created_until)?,
        };
        if !created_at.is_empty() {
            filters
                .date_ranges
                .insert(CREATED_AT_FILTER.to_owned(), created_at);
        }

        let toggled = self
            .toggled
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|path| !path.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(EmployeeListRequest {
            search: non_blank(self.search),
            sort: non_blank(self.sort),
            direction,
            page: self.page,
            per_page: self.per_page,
            filters,
            toggled,
        })
    }
}

impl From<ColumnFormat> for ColumnFormatDto {
    fn from(value: ColumnFormat) -> Self {
        match value {
            ColumnFormat::Text => Self::Text,
            ColumnFormat::Date => Self::Date,
            ColumnFormat::DateTime => Self::DateTime,
        }
    }
}

impl From<&TableColumn> for TableColumnResponse {
    fn from(value: &TableColumn) -> Self {
        Self {
            name: value.path().to_string(),
            label: value.label().to_owned(),
            format: value.format().into(),
            sortable: value.is_sortable(),
            searchable: value.is_searchable(),
        }
    }
}

impl From<Indicator> for FilterIndicatorResponse {
    fn from(value: Indicator) -> Self {
        Self {
            label: value.label,
            filter: value.filter,
            removes_field: match value.removal {
                IndicatorRemoval::Filter => None,
                IndicatorRemoval::Field(field) => Some(field),
            },
        }
    }
}

impl From<EmployeeListing> for EmployeeListResponse {
    fn from(value: EmployeeListing) -> Self {
        Self {
            columns: value.columns.iter().map(TableColumnResponse::from).collect(),
            rows: value
                .rows
                .into_iter()
                .map(|row| EmployeeRowResponse {
                    id: row.id.to_string(),
                    cells: row.cells,
                })
                .collect(),
            indicators: value
                .indicators
                .into_iter()
                .map(FilterIndicatorResponse::from)
                .collect(),
            page: value.page,
            per_page: value.per_page,
            total: value.total,
        }
    }
}

impl From<EmployeeRecord> for EmployeeResponse {
    fn from(value: EmployeeRecord) -> Self {
        let employee = value.employee();
        Self {
            id: employee.id().to_string(),
            country_id: employee.country_id().to_string(),
            country_name: value.country_name().map(ToOwned::to_owned),
            state_id: employee.state_id().to_string(),
            state_name: value.state_name().map(ToOwned::to_owned),
            city_id: employee.city_id().to_string(),
            city_name: value.city_name().map(ToOwned::to_owned),
            department_id: employee.department_id().to_string(),
            department_name: value.department_name().map(ToOwned::to_owned),
            first_name: employee.first_name().to_owned(),
            middle_name: employee.middle_name().map(ToOwned::to_owned),
            last_name: employee.last_name().to_owned(),
            address: employee.address().to_owned(),
            zip_code: employee.zip_code().to_owned(),
            date_of_birth: employee.date_of_birth().to_string(),
            date_hired: employee.date_hired().to_string(),
            created_at: employee.created_at().to_rfc3339(),
            updated_at: employee.updated_at().to_rfc3339(),
        }
    }
}

impl From<SelectOption> for SelectOptionResponse {
    fn from(value: SelectOption) -> Self {
        Self {
            value: value.value,
            label: value.label,
        }
    }
}

fn option_responses(
    options: BTreeMap<String, Vec<SelectOption>>,
) -> BTreeMap<String, Vec<SelectOptionResponse>> {
    options
        .into_iter()
        .map(|(field, options)| {
            (
                field,
                options.into_iter().map(SelectOptionResponse::from).collect(),
            )
        })
        .collect()
}

impl EmployeeFormResponse {
    /// Bundles a prepared form with its schema and submit URL.
    pub fn new(action: String, schema: &FormSchema, form: EmployeeForm) -> Self {
        Self {
            action,
            schema: schema.clone(),
            state: form.state,
            options: option_responses(form.options),
        }
    }
}

impl From<FormUpdate> for FormUpdateResponse {
    fn from(value: FormUpdate) -> Self {
        Self {
            state: value.state,
            cleared: value.cleared,
            options: option_responses(value.options),
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        Self {
            status: match value.status() {
                NotificationStatus::Success => NotificationStatusDto::Success,
            },
            title: value.title().to_owned(),
            body: value.body().map(ToOwned::to_owned),
        }
    }
}

impl From<BulkDeleteOutcome> for BulkDeleteEmployeesResponse {
    fn from(value: BulkDeleteOutcome) -> Self {
        Self {
            deleted: value.deleted,
            notification: value.notification.into(),
        }
    }
}

impl From<RenderedDetailSection> for DetailSectionResponse {
    fn from(value: RenderedDetailSection) -> Self {
        Self {
            heading: value.heading,
            columns: value.columns,
            entries: value
                .entries
                .into_iter()
                .map(|(label, value)| DetailEntryResponse { label, value })
                .collect(),
        }
    }
}

impl From<GlobalSearchResult> for GlobalSearchResultResponse {
    fn from(value: GlobalSearchResult) -> Self {
        Self {
            title: value.title,
            details: value
                .details
                .into_iter()
                .map(|(label, value)| SearchDetailResponse { label, value })
                .collect(),
            url: value.url,
        }
    }
}

impl From<BadgeColor> for BadgeColorDto {
    fn from(value: BadgeColor) -> Self {
        match value {
            BadgeColor::Gray => Self::Gray,
            BadgeColor::Primary => Self::Primary,
            BadgeColor::Success => Self::Success,
            BadgeColor::Warning => Self::Warning,
            BadgeColor::Danger => Self::Danger,
        }
    }
}
