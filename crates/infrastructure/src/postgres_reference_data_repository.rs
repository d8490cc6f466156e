use async_trait::async_trait;
use staffroll_application::ReferenceDataRepository;
use staffroll_core::{AppError, AppResult};
use staffroll_domain::{City, CityId, Country, CountryId, Department, DepartmentId, State, StateId};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// PostgreSQL-backed location and department repository.
#[derive(Clone)]
pub struct PostgresReferenceDataRepository {
    pool: PgPool,
}

impl PostgresReferenceDataRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NamedRow {
    id: Uuid,
    name: String,
}

#[derive(Debug, FromRow)]
struct ChildRow {
    id: Uuid,
    parent_id: Uuid,
    name: String,
}

impl NamedRow {
    fn into_country(self) -> AppResult<Country> {
        Country::new(CountryId::from_uuid(self.id), self.name)
    }

    fn into_department(self) -> AppResult<Department> {
        Department::new(DepartmentId::from_uuid(self.id), self.name)
    }
}

impl ChildRow {
    fn into_state(self) -> AppResult<State> {
        State::new(
            StateId::from_uuid(self.id),
            CountryId::from_uuid(self.parent_id),
            self.name,
        )
    }

    fn into_city(self) -> AppResult<City> {
        City::new(
            CityId::from_uuid(self.id),
            StateId::from_uuid(self.parent_id),
            self.name,
        )
    }
}

pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";

fn map_save_error(error: sqlx::Error, what: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    {
        return AppError::Validation(format!("{what} references a missing parent row"));
    }

    AppError::Internal(format!("failed to save {what}: {error}"))
}

#[async_trait]
impl ReferenceDataRepository for PostgresReferenceDataRepository {
    async fn list_countries(&self) -> AppResult<Vec<Country>> {
        sqlx::query_as::<_, NamedRow>("SELECT id, name FROM countries ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load countries: {error}")))?
            .into_iter()
            .map(NamedRow::into_country)
            .collect()
    }

    async fn list_states(&self, country_id: CountryId) -> AppResult<Vec<State>> {
        sqlx::query_as::<_, ChildRow>(
            r#"
            SELECT id, country_id AS parent_id, name
            FROM states
            WHERE country_id = $1
            ORDER BY name, id
            "#,
        )
        .bind(country_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load states: {error}")))?
        .into_iter()
        .map(ChildRow::into_state)
        .collect()
    }

    async fn list_cities(&self, state_id: StateId) -> AppResult<Vec<City>> {
        sqlx::query_as::<_, ChildRow>(
            r#"
            SELECT id, state_id AS parent_id, name
            FROM cities
            WHERE state_id = $1
            ORDER BY name, id
            "#,
        )
        .bind(state_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load cities: {error}")))?
        .into_iter()
        .map(ChildRow::into_city)
        .collect()
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        sqlx::query_as::<_, NamedRow>("SELECT id, name FROM departments ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load departments: {error}")))?
            .into_iter()
            .map(NamedRow::into_department)
            .collect()
    }

    async fn find_country(&self, country_id: CountryId) -> AppResult<Option<Country>> {
        sqlx::query_as::<_, NamedRow>("SELECT id, name FROM countries WHERE id = $1")
            .bind(country_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load country: {error}")))?
            .map(NamedRow::into_country)
            .transpose()
    }

    async fn find_state(&self, state_id: StateId) -> AppResult<Option<State>> {
        sqlx::query_as::<_, ChildRow>(
            "SELECT id, country_id AS parent_id, name FROM states WHERE id = $1",
        )
        .bind(state_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load state: {error}")))?
        .map(ChildRow::into_state)
        .transpose()
    }

    async fn find_city(&self, city_id: CityId) -> AppResult<Option<City>> {
        sqlx::query_as::<_, ChildRow>(
            "SELECT id, state_id AS parent_id, name FROM cities WHERE id = $1",
        )
        .bind(city_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load city: {error}")))?
        .map(ChildRow::into_city)
        .transpose()
    }

    async fn find_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, NamedRow>("SELECT id, name FROM departments WHERE id = $1")
            .bind(department_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load department: {error}")))?
            .map(NamedRow::into_department)
            .transpose()
    }

    async fn save_country(&self, country: Country) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO countries (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, updated_at = now()
            "#,
        )
        .bind(country.id().as_uuid())
        .bind(country.name().as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| map_save_error(error, "country"))?;

        Ok(())
    }

    async fn save_state(&self, state: State) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO states (id, country_id, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET country_id = EXCLUDED.country_id, name = EXCLUDED.name, updated_at = now()
            "#,
        )
        .bind(state.id().as_uuid())
        .bind(state.country_id().as_uuid())
        .bind(state.name().as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| map_save_error(error, "state"))?;

        Ok(())
    }

    async fn save_city(&self, city: City) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cities (id, state_id, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET state_id = EXCLUDED.state_id, name = EXCLUDED.name, updated_at = now()
            "#,
        )
        .bind(city.id().as_uuid())
        .bind(city.state_id().as_uuid())
        .bind(city.name().as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| map_save_error(error, "city"))?;

        Ok(())
    }

    async fn save_department(&self, department: Department) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO departments (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, updated_at = now()
            "#,
        )
        .bind(department.id().as_uuid())
        .bind(department.name().as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| map_save_error(error, "department"))?;

        Ok(())
    }
}
