use async_trait::async_trait;
use staffroll_core::AppResult;
use staffroll_domain::{
    AttributePath, City, CityId, Country, CountryId, DateRangeValue, Department, DepartmentId,
    Employee, EmployeeId, EmployeeRecord, SortDirection, State, StateId,
};

/// Employee attributes a repository can search or sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeColumn {
    /// `country.name`
    CountryName,
    /// `state.name`
    StateName,
    /// `city.name`
    CityName,
    /// `department.name`
    DepartmentName,
    /// `first_name`
    FirstName,
    /// `middle_name`
    MiddleName,
    /// `last_name`
    LastName,
    /// `address`
    Address,
    /// `zip_code`
    ZipCode,
    /// `date_of_birth`
    DateOfBirth,
    /// `date_hired`
    DateHired,
    /// `created_at`
    CreatedAt,
    /// `updated_at`
    UpdatedAt,
}

impl EmployeeColumn {
    /// Every column, in table order.
    pub const ALL: [Self; 13] = [
        Self::CountryName,
        Self::StateName,
        Self::CityName,
        Self::DepartmentName,
        Self::FirstName,
        Self::LastName,
        Self::MiddleName,
        Self::Address,
        Self::ZipCode,
        Self::DateOfBirth,
        Self::DateHired,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Returns the dotted attribute path.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CountryName => "country.name",
            Self::StateName => "state.name",
            Self::CityName => "city.name",
            Self::DepartmentName => "department.name",
            Self::FirstName => "first_name",
            Self::MiddleName => "middle_name",
            Self::LastName => "last_name",
            Self::Address => "address",
            Self::ZipCode => "zip_code",
            Self::DateOfBirth => "date_of_birth",
            Self::DateHired => "date_hired",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    /// Maps an attribute path to a column.
    #[must_use]
    pub fn from_path(path: &AttributePath) -> Option<Self> {
        let key = path.to_string();
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == key.as_str())
    }
}

/// Sort applied to a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeSort {
    /// Sorted column.
    pub column: EmployeeColumn,
    /// Direction.
    pub direction: SortDirection,
}

/// Query inputs for the employee list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeListQuery {
    /// Case-insensitive substring matched against `search_columns`.
    pub search: Option<String>,
    /// Columns a search term may match (any of them).
    pub search_columns: Vec<EmployeeColumn>,
    /// Optional sort; `created_at` ascending otherwise.
    pub sort: Option<EmployeeSort>,
    /// Exact country match.
    pub country_id: Option<CountryId>,
    /// Exact state match.
    pub state_id: Option<StateId>,
    /// Exact city match.
    pub city_id: Option<CityId>,
    /// Exact department match.
    pub department_id: Option<DepartmentId>,
    /// Inclusive range over the creation date.
    pub created_at: DateRangeValue,
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
}

/// One page of employees plus the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePage {
    /// Records of the page.
    pub records: Vec<EmployeeRecord>,
    /// Total matching records.
    pub total: u64,
}

/// Query inputs for global search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSearchQuery {
    /// Lower-cased terms; each must match one of `columns`.
    pub terms: Vec<String>,
    /// Searchable columns.
    pub columns: Vec<EmployeeColumn>,
    /// Maximum results.
    pub limit: usize,
}

/// Repository port for employees.
///
/// Returned records carry the names of their country, state, city, and
/// department, resolved in bulk rather than per record.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Lists one page of employees.
    async fn list_employees(&self, query: &EmployeeListQuery) -> AppResult<EmployeePage>;

    /// Finds one employee.
    async fn find_employee(&self, employee_id: EmployeeId) -> AppResult<Option<EmployeeRecord>>;

    /// Inserts a new employee.
    async fn create_employee(&self, employee: Employee) -> AppResult<()>;

    /// Replaces an existing employee.
    async fn update_employee(&self, employee: Employee) -> AppResult<()>;

    /// Deletes one employee, returning whether it existed.
    async fn delete_employee(&self, employee_id: EmployeeId) -> AppResult<bool>;

    /// Deletes several employees, returning how many existed.
    async fn delete_employees(&self, employee_ids: &[EmployeeId]) -> AppResult<u64>;

    /// Counts every employee.
    async fn count_employees(&self) -> AppResult<u64>;

    /// Runs a global search.
    async fn search_employees(&self, query: &EmployeeSearchQuery)
    -> AppResult<Vec<EmployeeRecord>>;
}

/// Repository port for location and department reference data.
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    /// Lists every country ordered by name.
    async fn list_countries(&self) -> AppResult<Vec<Country>>;

    /// Lists the states of one country ordered by name.
    async fn list_states(&self, country_id: CountryId) -> AppResult<Vec<State>>;

    /// Lists the cities of one state ordered by name.
    async fn list_cities(&self, state_id: StateId) -> AppResult<Vec<City>>;

    /// Lists every department ordered by name.
    async fn list_departments(&self) -> AppResult<Vec<Department>>;

    /// Finds one country.
    async fn find_country(&self, country_id: CountryId) -> AppResult<Option<Country>>;

    /// Finds one state.
    async fn find_state(&self, state_id: StateId) -> AppResult<Option<State>>;

    /// Finds one city.
    async fn find_city(&self, city_id: CityId) -> AppResult<Option<City>>;

    /// Finds one department.
    async fn find_department(&self, department_id: DepartmentId)
    -> AppResult<Option<Department>>;

    /// Inserts or renames a country.
    async fn save_country(&self, country: Country) -> AppResult<()>;

    /// Inserts or renames a state.
    async fn save_state(&self, state: State) -> AppResult<()>;

    /// Inserts or renames a city.
    async fn save_city(&self, city: City) -> AppResult<()>;

    /// Inserts or renames a department.
    async fn save_department(&self, department: Department) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use staffroll_domain::AttributePath;

    use super::EmployeeColumn;

    #[test]
    fn columns_round_trip_through_paths() {
        for column in EmployeeColumn::ALL {
            let path = AttributePath::from_str(column.as_str()).unwrap_or_else(|_| unreachable!());
            assert_eq!(EmployeeColumn::from_path(&path), Some(column));
        }
    }
}
