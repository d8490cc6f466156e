use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use staffroll_application::{
    EmployeeColumn, EmployeeListQuery, EmployeePage, EmployeeRepository, EmployeeSearchQuery,
};
use staffroll_core::{AppError, AppResult};
use staffroll_domain::{Employee, EmployeeId, EmployeeRecord, SortDirection};
use tokio::sync::RwLock;

use crate::in_memory_reference_data_repository::{
    InMemoryReferenceDataRepository, ReferenceNames,
};

#[cfg(test)]
mod tests;

/// In-memory employee repository joined against in-memory reference data.
#[derive(Debug)]
pub struct InMemoryEmployeeRepository {
    reference_data: Arc<InMemoryReferenceDataRepository>,
    employees: RwLock<HashMap<EmployeeId, Employee>>,
}

impl InMemoryEmployeeRepository {
    /// Creates an empty repository resolving names through `reference_data`.
    #[must_use]
    pub fn new(reference_data: Arc<InMemoryReferenceDataRepository>) -> Self {
        Self {
            reference_data,
            employees: RwLock::new(HashMap::new()),
        }
    }

    async fn records(&self) -> Vec<EmployeeRecord> {
        let names = self.reference_data.names().await;
        self.employees
            .read()
            .await
            .values()
            .map(|employee| record(employee.clone(), &names))
            .collect()
    }

    async fn ensure_references(&self, employee: &Employee) -> AppResult<()> {
        let names = self.reference_data.names().await;
        let missing = !names.countries.contains_key(&employee.country_id())
            || !names.states.contains_key(&employee.state_id())
            || !names.cities.contains_key(&employee.city_id())
            || !names.departments.contains_key(&employee.department_id());

        if missing {
            return Err(AppError::Validation(format!(
                "employee '{}' references missing location or department rows",
                employee.id()
            )));
        }

        Ok(())
    }
}

fn record(employee: Employee, names: &ReferenceNames) -> EmployeeRecord {
    let country_name = names.countries.get(&employee.country_id()).cloned();
    let state_name = names.states.get(&employee.state_id()).cloned();
    let city_name = names.cities.get(&employee.city_id()).cloned();
    let department_name = names.departments.get(&employee.department_id()).cloned();
    EmployeeRecord::new(
        employee,
        country_name,
        state_name,
        city_name,
        department_name,
    )
}

fn column_text(record: &EmployeeRecord, column: EmployeeColumn) -> Option<String> {
    let employee = record.employee();
    match column {
        EmployeeColumn::CountryName => record.country_name().map(str::to_owned),
        EmployeeColumn::StateName => record.state_name().map(str::to_owned),
        EmployeeColumn::CityName => record.city_name().map(str::to_owned),
        EmployeeColumn::DepartmentName => record.department_name().map(str::to_owned),
        EmployeeColumn::FirstName => Some(employee.first_name().to_owned()),
        EmployeeColumn::MiddleName => employee.middle_name().map(str::to_owned),
        EmployeeColumn::LastName => Some(employee.last_name().to_owned()),
        EmployeeColumn::Address => Some(employee.address().to_owned()),
        EmployeeColumn::ZipCode => Some(employee.zip_code().to_owned()),
        EmployeeColumn::DateOfBirth => Some(employee.date_of_birth().to_string()),
        EmployeeColumn::DateHired => Some(employee.date_hired().to_string()),
        EmployeeColumn::CreatedAt => Some(employee.created_at().to_rfc3339()),
        EmployeeColumn::UpdatedAt => Some(employee.updated_at().to_rfc3339()),
    }
}

fn contains_term(record: &EmployeeRecord, columns: &[EmployeeColumn], term: &str) -> bool {
    let term = term.to_lowercase();
    columns.iter().any(|column| {
        column_text(record, *column)
            .is_some_and(|value| value.to_lowercase().contains(term.as_str()))
    })
}

fn compare_column(left: &EmployeeRecord, right: &EmployeeRecord, column: EmployeeColumn) -> Ordering {
    let (left_employee, right_employee) = (left.employee(), right.employee());
    match column {
        EmployeeColumn::DateOfBirth => left_employee
            .date_of_birth()
            .cmp(&right_employee.date_of_birth()),
        EmployeeColumn::DateHired => left_employee.date_hired().cmp(&right_employee.date_hired()),
        EmployeeColumn::CreatedAt => left_employee.created_at().cmp(&right_employee.created_at()),
        EmployeeColumn::UpdatedAt => left_employee.updated_at().cmp(&right_employee.updated_at()),
        text_column => compare_text(
            column_text(left, text_column),
            column_text(right, text_column),
        ),
    }
}

/// Orders text case-insensitively with missing values last, matching Postgres `ASC`.
fn compare_text(left: Option<String>, right: Option<String>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left
            .to_lowercase()
            .cmp(&right.to_lowercase())
            .then_with(|| left.cmp(&right)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn default_order(left: &EmployeeRecord, right: &EmployeeRecord) -> Ordering {
    compare_column(left, right, EmployeeColumn::CreatedAt)
        .then_with(|| left.employee().id().cmp(&right.employee().id()))
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn list_employees(&self, query: &EmployeeListQuery) -> AppResult<EmployeePage> {
        let mut records: Vec<EmployeeRecord> = self
            .records()
            .await
            .into_iter()
            .filter(|record| {
                let employee = record.employee();
                query
                    .search
                    .as_deref()
                    .is_none_or(|search| contains_term(record, &query.search_columns, search))
                    && query.country_id.is_none_or(|id| employee.country_id() == id)
                    && query.state_id.is_none_or(|id| employee.state_id() == id)
                    && query.city_id.is_none_or(|id| employee.city_id() == id)
                    && query
                        .department_id
                        .is_none_or(|id| employee.department_id() == id)
                    && query
                        .created_at
                        .contains(employee.created_at().date_naive())
            })
            .collect();

        records.sort_by(|left, right| match query.sort {
            Some(sort) => {
                let ordering = compare_column(left, right, sort.column);
                let ordering = match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                ordering.then_with(|| default_order(left, right))
            }
            None => default_order(left, right),
        });

        let total = records.len() as u64;
        Ok(EmployeePage {
            records: records
                .into_iter()
                .skip(query.offset)
                .take(query.limit)
                .collect(),
            total,
        })
    }

    async fn find_employee(&self, employee_id: EmployeeId) -> AppResult<Option<EmployeeRecord>> {
        let Some(employee) = self.employees.read().await.get(&employee_id).cloned() else {
            return Ok(None);
        };

        let names = self.reference_data.names().await;
        Ok(Some(record(employee, &names)))
    }

    async fn create_employee(&self, employee: Employee) -> AppResult<()> {
        self.ensure_references(&employee).await?;

        let mut employees = self.employees.write().await;
        if employees.contains_key(&employee.id()) {
            return Err(AppError::Conflict(format!(
                "employee '{}' already exists",
                employee.id()
            )));
        }

        employees.insert(employee.id(), employee);
        Ok(())
    }

    async fn update_employee(&self, employee: Employee) -> AppResult<()> {
        self.ensure_references(&employee).await?;

        let mut employees = self.employees.write().await;
        let Some(slot) = employees.get_mut(&employee.id()) else {
            return Err(AppError::NotFound(format!(
                "employee '{}' does not exist",
                employee.id()
            )));
        };

        *slot = employee;
        Ok(())
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> AppResult<bool> {
        Ok(self.employees.write().await.remove(&employee_id).is_some())
    }

    async fn delete_employees(&self, employee_ids: &[EmployeeId]) -> AppResult<u64> {
        let mut employees = self.employees.write().await;
        let mut deleted = 0;
        for employee_id in employee_ids {
            if employees.remove(employee_id).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn count_employees(&self) -> AppResult<u64> {
        Ok(self.employees.read().await.len() as u64)
    }

    async fn search_employees(
        &self,
        query: &EmployeeSearchQuery,
    ) -> AppResult<Vec<EmployeeRecord>> {
        let mut records: Vec<EmployeeRecord> = self
            .records()
            .await
            .into_iter()
            .filter(|record| {
                !query.terms.is_empty()
                    && query
                        .terms
                        .iter()
                        .all(|term| contains_term(record, &query.columns, term))
            })
            .collect();

        records.sort_by(default_order);
        records.truncate(query.limit);
        Ok(records)
    }
}
