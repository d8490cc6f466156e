use sqlx::{Postgres, QueryBuilder};
use staffroll_application::{EmployeeColumn, EmployeeListQuery, EmployeePage, EmployeeSearchQuery};
use staffroll_core::{AppError, AppResult};
use staffroll_domain::{EmployeeId, EmployeeRecord, SortDirection};
use tracing::debug;

use super::{EmployeeRecordRow, PostgresEmployeeRepository, SELECT_EMPLOYEE_RECORDS};

const DEFAULT_ORDER: &str = "employees.created_at ASC, employees.id ASC";

impl PostgresEmployeeRepository {
    pub(super) async fn list_employees_impl(
        &self,
        query: &EmployeeListQuery,
    ) -> AppResult<EmployeePage> {
        let limit = i64::try_from(query.limit).map_err(|error| {
            AppError::Validation(format!("invalid employee list limit: {error}"))
        })?;
        let offset = i64::try_from(query.offset).map_err(|error| {
            AppError::Validation(format!("invalid employee list offset: {error}"))
        })?;

        let mut count_builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            r#"
            SELECT COUNT(*)
            FROM employees
            LEFT JOIN countries ON countries.id = employees.country_id
            LEFT JOIN states ON states.id = employees.state_id
            LEFT JOIN cities ON cities.id = employees.city_id
            LEFT JOIN departments ON departments.id = employees.department_id
            "#,
        );
        push_list_conditions(&mut count_builder, query);
        let total = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count employees: {error}")))?;

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(SELECT_EMPLOYEE_RECORDS);
        push_list_conditions(&mut builder, query);

        builder.push(" ORDER BY ");
        if let Some(sort) = query.sort {
            builder.push(column_expression(sort.column));
            builder.push(match sort.direction {
                SortDirection::Asc => " ASC, ",
                SortDirection::Desc => " DESC, ",
            });
        }
        builder.push(DEFAULT_ORDER);
        builder.push(" LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<EmployeeRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list employees: {error}")))?;

        debug!(rows = rows.len(), total, "listed employees");

        Ok(EmployeePage {
            records: rows
                .into_iter()
                .map(EmployeeRecordRow::into_record)
                .collect::<AppResult<Vec<_>>>()?,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    pub(super) async fn find_employee_impl(
        &self,
        employee_id: EmployeeId,
    ) -> AppResult<Option<EmployeeRecord>> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(SELECT_EMPLOYEE_RECORDS);
        builder.push(" WHERE employees.id = ");
        builder.push_bind(employee_id.as_uuid());

        builder
            .build_query_as::<EmployeeRecordRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to find employee '{employee_id}': {error}"))
            })?
            .map(EmployeeRecordRow::into_record)
            .transpose()
    }

    pub(super) async fn count_employees_impl(&self) -> AppResult<u64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count employees: {error}")))?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    pub(super) async fn search_employees_impl(
        &self,
        query: &EmployeeSearchQuery,
    ) -> AppResult<Vec<EmployeeRecord>> {
        if query.terms.is_empty() || query.columns.is_empty() {
            return Ok(Vec::new());
        }

        let limit = i64::try_from(query.limit).map_err(|error| {
            AppError::Validation(format!("invalid employee search limit: {error}"))
        })?;

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(SELECT_EMPLOYEE_RECORDS);
        builder.push(" WHERE TRUE");
        for term in &query.terms {
            builder.push(" AND ");
            push_any_column_matches(&mut builder, &query.columns, term);
        }
        builder.push(" ORDER BY ");
        builder.push(DEFAULT_ORDER);
        builder.push(" LIMIT ");
        builder.push_bind(limit);

        builder
            .build_query_as::<EmployeeRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to search employees: {error}")))?
            .into_iter()
            .map(EmployeeRecordRow::into_record)
            .collect()
    }
}

fn push_list_conditions(builder: &mut QueryBuilder<'_, Postgres>, query: &EmployeeListQuery) {
    builder.push(" WHERE TRUE");

    if let Some(search) = query.search.as_deref()
        && !query.search_columns.is_empty()
    {
        builder.push(" AND ");
        push_any_column_matches(builder, &query.search_columns, search);
    }

    if let Some(country_id) = query.country_id {
        builder.push(" AND employees.country_id = ");
        builder.push_bind(country_id.as_uuid());
    }
    if let Some(state_id) = query.state_id {
        builder.push(" AND employees.state_id = ");
        builder.push_bind(state_id.as_uuid());
    }
    if let Some(city_id) = query.city_id {
        builder.push(" AND employees.city_id = ");
        builder.push_bind(city_id.as_uuid());
    }
    if let Some(department_id) = query.department_id {
        builder.push(" AND employees.department_id = ");
        builder.push_bind(department_id.as_uuid());
    }

    if let Some(from) = query.created_at.from {
        builder.push(" AND employees.created_at::date >= ");
        builder.push_bind(from);
    }
    if let Some(until) = query.created_at.until {
        builder.push(" AND employees.created_at::date <= ");
        builder.push_bind(until);
    }
}

fn push_any_column_matches(
    builder: &mut QueryBuilder<'_, Postgres>,
    columns: &[EmployeeColumn],
    term: &str,
) {
    let pattern = format!("%{}%", escape_like(term));

    builder.push('(');
    for (index, column) in columns.iter().enumerate() {
        if index > 0 {
            builder.push(" OR ");
        }
        builder.push(column_expression(*column));
        builder.push("::text ILIKE ");
        builder.push_bind(pattern.clone());
    }
    builder.push(')');
}

/// Maps a column to its SQL expression. Only these fixed strings reach the
/// query text; every user value is bound.
fn column_expression(column: EmployeeColumn) -> &'static str {
    match column {
        EmployeeColumn::CountryName => "countries.name",
        EmployeeColumn::StateName => "states.name",
        EmployeeColumn::CityName => "cities.name",
        EmployeeColumn::DepartmentName => "departments.name",
        EmployeeColumn::FirstName => "employees.first_name",
        EmployeeColumn::MiddleName => "employees.middle_name",
        EmployeeColumn::LastName => "employees.last_name",
        EmployeeColumn::Address => "employees.address",
        EmployeeColumn::ZipCode => "employees.zip_code",
        EmployeeColumn::DateOfBirth => "employees.date_of_birth",
        EmployeeColumn::DateHired => "employees.date_hired",
        EmployeeColumn::CreatedAt => "employees.created_at",
        EmployeeColumn::UpdatedAt => "employees.updated_at",
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

#[cfg(test)]
mod unit_tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Grace"), "Grace");
    }
}
