use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use staffroll_application::{
    EmployeeListQuery, EmployeePage, EmployeeRepository, EmployeeSearchQuery,
};
use staffroll_core::AppResult;
use staffroll_domain::{
    CityId, CountryId, DepartmentId, Employee, EmployeeAttributes, EmployeeId, EmployeeRecord,
    StateId,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

mod query;
mod write;


/// PostgreSQL-backed employee repository.
#[derive(Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Employee columns plus the joined relation names, shared by every read.
const SELECT_EMPLOYEE_RECORDS: &str = r#"
    SELECT
        employees.id,
        employees.country_id,
        employees.state_id,
        employees.city_id,
        employees.department_id,
        employees.first_name,
        employees.middle_name,
        employees.last_name,
        employees.address,
        employees.zip_code,
        employees.date_of_birth,
        employees.date_hired,
        employees.created_at,
        employees.updated_at,
        countries.name AS country_name,
        states.name AS state_name,
        cities.name AS city_name,
        departments.name AS department_name
    FROM employees
    LEFT JOIN countries ON countries.id = employees.country_id
    LEFT JOIN states ON states.id = employees.state_id
    LEFT JOIN cities ON cities.id = employees.city_id
    LEFT JOIN departments ON departments.id = employees.department_id
"#;

#[derive(Debug, FromRow)]
struct EmployeeRecordRow {
    id: Uuid,
    country_id: Uuid,
    state_id: Uuid,
    city_id: Uuid,
    department_id: Uuid,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    address: String,
    zip_code: String,
    date_of_birth: NaiveDate,
    date_hired: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    country_name: Option<String>,
    state_name: Option<String>,
    city_name: Option<String>,
    department_name: Option<String>,
}

impl EmployeeRecordRow {
    fn into_record(self) -> AppResult<EmployeeRecord> {
        let attributes = EmployeeAttributes {
            country_id: CountryId::from_uuid(self.country_id),
            state_id: StateId::from_uuid(self.state_id),
            city_id: CityId::from_uuid(self.city_id),
            department_id: DepartmentId::from_uuid(self.department_id),
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            address: self.address,
            zip_code: self.zip_code,
            date_of_birth: self.date_of_birth,
            date_hired: self.date_hired,
        };
        let employee = Employee::new(
            EmployeeId::from_uuid(self.id),
            attributes,
            self.created_at,
            self.updated_at,
        )?;

        Ok(EmployeeRecord::new(
            employee,
            self.country_name,
            self.state_name,
            self.city_name,
            self.department_name,
        ))
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn list_employees(&self, query: &EmployeeListQuery) -> AppResult<EmployeePage> {
        self.list_employees_impl(query).await
    }

    async fn find_employee(&self, employee_id: EmployeeId) -> AppResult<Option<EmployeeRecord>> {
        self.find_employee_impl(employee_id).await
    }

    async fn create_employee(&self, employee: Employee) -> AppResult<()> {
        self.create_employee_impl(employee).await
    }

    async fn update_employee(&self, employee: Employee) -> AppResult<()> {
        self.update_employee_impl(employee).await
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> AppResult<bool> {
        self.delete_employee_impl(employee_id).await
    }

    async fn delete_employees(&self, employee_ids: &[EmployeeId]) -> AppResult<u64> {
        self.delete_employees_impl(employee_ids).await
    }

    async fn count_employees(&self) -> AppResult<u64> {
        self.count_employees_impl().await
    }

    async fn search_employees(
        &self,
        query: &EmployeeSearchQuery,
    ) -> AppResult<Vec<EmployeeRecord>> {
        self.search_employees_impl(query).await
    }
}
