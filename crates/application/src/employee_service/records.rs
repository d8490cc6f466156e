use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use staffroll_core::{AppError, AppResult, FieldErrors};
use staffroll_domain::{
    CityId, CountryId, DepartmentId, Employee, EmployeeAttributes, EmployeeId, EmployeeRecord,
    FORM_DATE_FORMAT, FilterKind, FormState, Notification, RenderedDetailSection, StateId, TableColumn,
};
use tracing::info;

use crate::employee_resource::{EMPLOYEE_DELETED_BODY, EMPLOYEE_DELETED_TITLE};
use crate::{EmployeeColumn, EmployeeListQuery, EmployeeSort};

use super::{
    BulkDeleteOutcome, DEFAULT_PER_PAGE, EmployeeListRequest, EmployeeListing, EmployeeRow,
    EmployeeService, PER_PAGE_OPTIONS,
};

impl EmployeeService {
    /// Lists one page of employees with rendered cells and filter indicators.
    pub async fn list_employees(&self, request: EmployeeListRequest) -> AppResult<EmployeeListing> {
        let table = self.resource.table();

        let per_page = request.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if !PER_PAGE_OPTIONS.contains(&per_page) {
            return Err(AppError::Validation(format!(
                "per_page must be one of 10, 25, or 50, got {per_page}"
            )));
        }

        let page = request.page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::Validation(
                "page numbers start at 1".to_owned(),
            ));
        }

        let offset = (page - 1).checked_mul(per_page).ok_or_else(|| {
            AppError::Validation(format!("page {page} is out of range"))
        })?;

        let sort = match request.sort.as_deref() {
            None => None,
            Some(key) => {
                let column = table
                    .column(key)
                    .filter(|column| column.is_sortable())
                    .and_then(|column| EmployeeColumn::from_path(column.path()))
                    .ok_or_else(|| {
                        AppError::Validation(format!("column '{key}' is not sortable"))
                    })?;
                Some(EmployeeSort {
                    column,
                    direction: request.direction,
                })
            }
        };

        let search_columns = table
            .columns()
            .iter()
            .filter(|column| column.is_searchable())
            .filter_map(|column| EmployeeColumn::from_path(column.path()))
            .collect();

        let filters = self.resource.filters().effective(&request.filters);
        let selected = |name: &str| filters.selects.get(name).map(String::as_str);

        let query = EmployeeListQuery {
            search: request
                .search
                .map(|search| search.trim().to_owned())
                .filter(|search| !search.is_empty()),
            search_columns,
            sort,
            country_id: selected("country_id").map(CountryId::from_str).transpose()?,
            state_id: selected("state_id").map(StateId::from_str).transpose()?,
            city_id: selected("city_id").map(CityId::from_str).transpose()?,
            department_id: selected("department_id")
                .map(DepartmentId::from_str)
                .transpose()?,
            created_at: filters
                .date_ranges
                .get("created_at")
                .copied()
                .unwrap_or_default(),
            limit: per_page,
            offset,
        };

        let result = self.employees.list_employees(&query).await?;

        let mut option_labels = BTreeMap::new();
        for filter in self.resource.filters().enabled_filters() {
            if let (Some(value), FilterKind::Select { relation, .. }) =
                (filters.selects.get(filter.name()), filter.kind())
                && let Some(label) = self.relation_option_label(relation, value).await?
            {
                option_labels.insert(filter.name().to_owned(), label);
            }
        }
        let indicators = self
            .resource
            .filters()
            .indicators(&filters, |filter, _| option_labels.get(filter.name()).cloned());

        let columns: Vec<TableColumn> = table
            .visible_columns(&request.toggled)
            .into_iter()
            .cloned()
            .collect();
        let rows = result
            .records
            .iter()
            .map(|record| EmployeeRow {
                id: record.employee().id(),
                cells: columns.iter().map(|column| column.render(record)).collect(),
            })
            .collect();

        Ok(EmployeeListing {
            columns,
            rows,
            indicators,
            page,
            per_page,
            total: result.total,
        })
    }

    /// Finds one employee or fails with `NotFound`.
    pub async fn find_employee(&self, employee_id: EmployeeId) -> AppResult<EmployeeRecord> {
        self.employees
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("employee '{employee_id}' does not exist")))
    }

    /// Renders the read-only detail sections of one employee.
    pub async fn view_employee(
        &self,
        employee_id: EmployeeId,
    ) -> AppResult<Vec<RenderedDetailSection>> {
        let record = self.find_employee(employee_id).await?;
        Ok(self.resource.infolist().render(&record))
    }

    /// Creates an employee from submitted form state.
    pub async fn create_employee(&self, state: &FormState) -> AppResult<EmployeeRecord> {
        let attributes = self.employee_attributes(state).await?;
        let now = Utc::now();
        let employee = Employee::new(EmployeeId::new(), attributes, now, now)?;
        let employee_id = employee.id();

        self.employees.create_employee(employee).await?;
        info!(%employee_id, "employee created");

        self.find_employee(employee_id).await
    }

    /// Replaces an employee's attributes from submitted form state.
    pub async fn update_employee(
        &self,
        employee_id: EmployeeId,
        state: &FormState,
    ) -> AppResult<EmployeeRecord> {
        let existing = self.find_employee(employee_id).await?;
        let attributes = self.employee_attributes(state).await?;
        let updated_at = Utc::now().max(existing.employee().created_at());
        let employee = existing.employee().revise(attributes, updated_at)?;

        self.employees.update_employee(employee).await?;
        info!(%employee_id, "employee updated");

        self.find_employee(employee_id).await
    }

    /// Deletes one employee and returns the success notification.
    pub async fn delete_employee(&self, employee_id: EmployeeId) -> AppResult<Notification> {
        if !self.employees.delete_employee(employee_id).await? {
            return Err(AppError::NotFound(format!(
                "employee '{employee_id}' does not exist"
            )));
        }

        info!(%employee_id, "employee deleted");
        Ok(self
            .resource
            .table()
            .delete_notification()
            .cloned()
            .unwrap_or_else(|| {
                Notification::success(EMPLOYEE_DELETED_TITLE, Some(EMPLOYEE_DELETED_BODY))
            }))
    }

    /// Deletes every listed employee that exists.
    pub async fn delete_employees(
        &self,
        employee_ids: &[EmployeeId],
    ) -> AppResult<BulkDeleteOutcome> {
        if !self.resource.table().allows_bulk_delete() {
            return Err(AppError::Validation(
                "bulk delete is not offered for employees".to_owned(),
            ));
        }

        if employee_ids.is_empty() {
            return Err(AppError::Validation(
                "select at least one employee to delete".to_owned(),
            ));
        }

        let deleted = self.employees.delete_employees(employee_ids).await?;
        info!(requested = employee_ids.len(), deleted, "employees bulk deleted");

        Ok(BulkDeleteOutcome {
            deleted,
            notification: Notification::success("Deleted", None),
        })
    }

    /// Returns the form state of an existing employee.
    pub async fn edit_state(&self, employee_id: EmployeeId) -> AppResult<FormState> {
        let record = self.find_employee(employee_id).await?;
        let attributes = record.employee().attributes();

        let mut state = self.resource.form().blank_state();
        let mut set = |field: &str, value: String| state.set(field, Value::String(value));
        set("country_id", attributes.country_id.to_string());
        set("state_id", attributes.state_id.to_string());
        set("city_id", attributes.city_id.to_string());
        set("department_id", attributes.department_id.to_string());
        set("first_name", attributes.first_name);
        set("last_name", attributes.last_name);
        set("address", attributes.address);
        set("zip_code", attributes.zip_code);
        set(
            "date_of_birth",
            attributes.date_of_birth.format(FORM_DATE_FORMAT).to_string(),
        );
        set(
            "date_hired",
            attributes.date_hired.format(FORM_DATE_FORMAT).to_string(),
        );
        if let Some(middle_name) = attributes.middle_name {
            set("middle_name", middle_name);
        }

        Ok(state)
    }

    /// Validates form state and resolves it into employee attributes.
    ///
    /// Every problem is reported at once as `InvalidFields`, including
    /// states outside the chosen country and cities outside the chosen state.
    async fn employee_attributes(&self, state: &FormState) -> AppResult<EmployeeAttributes> {
        let form = self.resource.form();
        let mut errors = form.validate(state);

        let country_id = parse_id::<CountryId>(self, state, "country_id", &mut errors);
        let state_id = parse_id::<StateId>(self, state, "state_id", &mut errors);
        let city_id = parse_id::<CityId>(self, state, "city_id", &mut errors);
        let department_id = parse_id::<DepartmentId>(self, state, "department_id", &mut errors);

        if let Some(country_id) = country_id
            && self.reference_data.find_country(country_id).await?.is_none()
        {
            self.reject_selection(&mut errors, "country_id");
        }

        if let Some(state_id) = state_id {
            match self.reference_data.find_state(state_id).await? {
                Some(found) if Some(found.country_id()) == country_id => {}
                _ => self.reject_selection(&mut errors, "state_id"),
            }
        }

        if let Some(city_id) = city_id {
            match self.reference_data.find_city(city_id).await? {
                Some(found) if Some(found.state_id()) == state_id => {}
                _ => self.reject_selection(&mut errors, "city_id"),
            }
        }

        if let Some(department_id) = department_id
            && self
                .reference_data
                .find_department(department_id)
                .await?
                .is_none()
        {
            self.reject_selection(&mut errors, "department_id");
        }

        errors.into_result().map_err(AppError::InvalidFields)?;

        let text = |field: &str| state.get_str(field).map(|value| value.trim().to_owned());
        let date = |field: &str| {
            state
                .get_str(field)
                .and_then(|value| NaiveDate::parse_from_str(value.trim(), FORM_DATE_FORMAT).ok())
        };

        let (
            Some(country_id),
            Some(state_id),
            Some(city_id),
            Some(department_id),
            Some(first_name),
            Some(last_name),
            Some(address),
            Some(zip_code),
            Some(date_of_birth),
            Some(date_hired),
        ) = (
            country_id,
            state_id,
            city_id,
            department_id,
            text("first_name"),
            text("last_name"),
            text("address"),
            text("zip_code"),
            date("date_of_birth"),
            date("date_hired"),
        )
        else {
            return Err(AppError::Internal(
                "validated employee form is missing required values".to_owned(),
            ));
        };

        Ok(EmployeeAttributes {
            country_id,
            state_id,
            city_id,
            department_id,
            first_name,
            middle_name: text("middle_name"),
            last_name,
            address,
            zip_code,
            date_of_birth,
            date_hired,
        })
    }

    fn reject_selection(&self, errors: &mut FieldErrors, field: &str) {
        if !errors.messages_for(field).is_empty() {
            return;
        }

        let label = self
            .resource
            .form()
            .field(field)
            .map_or_else(|| field.to_owned(), |field| field.label().to_lowercase());
        errors.push(field, format!("The selected {label} is invalid."));
    }
}

fn parse_id<T: FromStr>(
    service: &EmployeeService,
    state: &FormState,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<T> {
    let value = state.get_str(field)?;
    match T::from_str(value.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            service.reject_selection(errors, field);
            None
        }
    }
}
