use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use staffroll_application::{
    EmployeeColumn, EmployeeListQuery, EmployeePage, EmployeeRepository, EmployeeSearchQuery,
    EmployeeSort, ReferenceDataRepository,
};
use staffroll_core::AppError;
use staffroll_domain::{
    City, CityId, Country, CountryId, DateRangeValue, Department, DepartmentId, Employee,
    EmployeeAttributes, EmployeeId, SortDirection, State, StateId,
};

use super::InMemoryEmployeeRepository;
use crate::InMemoryReferenceDataRepository;

struct Seeded {
    repository: InMemoryEmployeeRepository,
    country_id: CountryId,
    state_id: StateId,
    city_id: CityId,
    engineering: DepartmentId,
    sales: DepartmentId,
}

async fn seeded() -> Seeded {
    let reference_data = Arc::new(InMemoryReferenceDataRepository::new());
    let country_id = CountryId::new();
    let state_id = StateId::new();
    let city_id = CityId::new();
    let engineering = DepartmentId::new();
    let sales = DepartmentId::new();

    let seed = async {
        reference_data
            .save_country(Country::new(country_id, "Japan")?)
            .await?;
        reference_data
            .save_state(State::new(state_id, country_id, "Tokyo")?)
            .await?;
        reference_data
            .save_city(City::new(city_id, state_id, "Shibuya")?)
            .await?;
        reference_data
            .save_department(Department::new(engineering, "Engineering")?)
            .await?;
        reference_data
            .save_department(Department::new(sales, "Sales")?)
            .await
    };
    assert!(seed.await.is_ok());

    Seeded {
        repository: InMemoryEmployeeRepository::new(reference_data),
        country_id,
        state_id,
        city_id,
        engineering,
        sales,
    }
}

fn created(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

impl Seeded {
    fn employee(&self, first_name: &str, department_id: DepartmentId, day: u32) -> Employee {
        let attributes = EmployeeAttributes {
            country_id: self.country_id,
            state_id: self.state_id,
            city_id: self.city_id,
            department_id,
            first_name: first_name.to_owned(),
            middle_name: None,
            last_name: "Tanaka".to_owned(),
            address: "1-2-3 Jingumae".to_owned(),
            zip_code: "150-0001".to_owned(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, day).unwrap_or_default(),
            date_hired: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap_or_default(),
        };
        Employee::new(EmployeeId::new(), attributes, created(day), created(day))
            .unwrap_or_else(|_| unreachable!())
    }

    async fn insert(&self, first_name: &str, department_id: DepartmentId, day: u32) -> EmployeeId {
        let employee = self.employee(first_name, department_id, day);
        let employee_id = employee.id();
        assert!(self.repository.create_employee(employee).await.is_ok());
        employee_id
    }
}

fn query() -> EmployeeListQuery {
    EmployeeListQuery {
        limit: 10,
        ..EmployeeListQuery::default()
    }
}

fn first_names(page: &EmployeePage) -> Vec<&str> {
    page.records
        .iter()
        .map(|record| record.employee().first_name())
        .collect()
}

#[tokio::test]
async fn find_resolves_related_names() {
    let seeded = seeded().await;
    let employee_id = seeded.insert("Yuki", seeded.engineering, 1).await;

    let record = seeded
        .repository
        .find_employee(employee_id)
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!());

    assert_eq!(record.country_name(), Some("Japan"));
    assert_eq!(record.city_name(), Some("Shibuya"));
    assert_eq!(record.department_name(), Some("Engineering"));
}

#[tokio::test]
async fn create_rejects_missing_references() {
    let seeded = seeded().await;
    let employee = seeded.employee("Yuki", DepartmentId::new(), 1);

    let result = seeded.repository.create_employee(employee).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn list_defaults_to_creation_order_and_paginates() {
    let seeded = seeded().await;
    seeded.insert("Carol", seeded.engineering, 3).await;
    seeded.insert("Alice", seeded.engineering, 1).await;
    seeded.insert("Bob", seeded.sales, 2).await;

    let page = seeded
        .repository
        .list_employees(&EmployeeListQuery {
            limit: 2,
            offset: 1,
            ..query()
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(page.total, 3);
    assert_eq!(first_names(&page), vec!["Bob", "Carol"]);
}

#[tokio::test]
async fn list_filters_search_department_and_created_range() {
    let seeded = seeded().await;
    seeded.insert("Alice", seeded.engineering, 1).await;
    seeded.insert("Alina", seeded.sales, 2).await;
    seeded.insert("Bob", seeded.engineering, 10).await;

    let by_search = seeded
        .repository
        .list_employees(&EmployeeListQuery {
            search: Some("ALI".to_owned()),
            search_columns: vec![EmployeeColumn::FirstName, EmployeeColumn::LastName],
            ..query()
        })
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(first_names(&by_search), vec!["Alice", "Alina"]);

    let by_department = seeded
        .repository
        .list_employees(&EmployeeListQuery {
            department_id: Some(seeded.engineering),
            created_at: DateRangeValue {
                from: NaiveDate::from_ymd_opt(2024, 1, 1),
                until: NaiveDate::from_ymd_opt(2024, 1, 5),
            },
            ..query()
        })
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(first_names(&by_department), vec!["Alice"]);
}

#[tokio::test]
async fn list_sorts_by_related_name_descending() {
    let seeded = seeded().await;
    seeded.insert("Alice", seeded.engineering, 1).await;
    seeded.insert("Bob", seeded.sales, 2).await;

    let page = seeded
        .repository
        .list_employees(&EmployeeListQuery {
            sort: Some(EmployeeSort {
                column: EmployeeColumn::DepartmentName,
                direction: SortDirection::Desc,
            }),
            ..query()
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(first_names(&page), vec!["Bob", "Alice"]);
}

#[tokio::test]
async fn text_sort_ignores_case_and_puts_missing_values_last() {
    let seeded = seeded().await;
    for (first_name, middle_name, day) in [
        ("Alice", Some("beth"), 1),
        ("Bob", None, 2),
        ("Carol", Some("Zoe"), 3),
    ] {
        let employee = seeded.employee(first_name, seeded.engineering, day);
        let mut attributes = employee.attributes();
        attributes.middle_name = middle_name.map(str::to_owned);
        let employee = Employee::new(employee.id(), attributes, created(day), created(day))
            .unwrap_or_else(|_| unreachable!());
        assert!(seeded.repository.create_employee(employee).await.is_ok());
    }

    let sorted = |direction| EmployeeListQuery {
        sort: Some(EmployeeSort {
            column: EmployeeColumn::MiddleName,
            direction,
        }),
        ..query()
    };

    let ascending = seeded
        .repository
        .list_employees(&sorted(SortDirection::Asc))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(first_names(&ascending), vec!["Alice", "Carol", "Bob"]);

    let descending = seeded
        .repository
        .list_employees(&sorted(SortDirection::Desc))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(first_names(&descending), vec!["Bob", "Carol", "Alice"]);
}

#[tokio::test]
async fn deleted_rows_leave_later_listings() {
    let seeded = seeded().await;
    let first = seeded.insert("Alice", seeded.engineering, 1).await;
    let second = seeded.insert("Bob", seeded.sales, 2).await;
    let third = seeded.insert("Carol", seeded.sales, 3).await;

    assert!(seeded.repository.delete_employee(first).await.unwrap_or(false));
    let page = seeded
        .repository
        .list_employees(&query())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(page.total, 2);
    assert_eq!(first_names(&page), vec!["Bob", "Carol"]);

    assert_eq!(
        seeded
            .repository
            .delete_employees(&[second, third])
            .await
            .unwrap_or_default(),
        2
    );
    let page = seeded
        .repository
        .list_employees(&query())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(page.total, 0);
    assert!(page.records.is_empty());
}

#[tokio::test]
async fn update_replaces_and_delete_reports_existence() {
    let seeded = seeded().await;
    let employee_id = seeded.insert("Yuki", seeded.engineering, 1).await;

    let existing = seeded
        .repository
        .find_employee(employee_id)
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!());
    let mut attributes = existing.employee().attributes();
    attributes.department_id = seeded.sales;
    let revised = existing
        .employee()
        .revise(attributes, created(1) + Duration::hours(1))
        .unwrap_or_else(|_| unreachable!());
    assert!(seeded.repository.update_employee(revised).await.is_ok());

    let updated = seeded
        .repository
        .find_employee(employee_id)
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!());
    assert_eq!(updated.department_name(), Some("Sales"));

    assert!(seeded
        .repository
        .delete_employee(employee_id)
        .await
        .unwrap_or(false));
    assert!(!seeded
        .repository
        .delete_employee(employee_id)
        .await
        .unwrap_or(true));
}

#[tokio::test]
async fn bulk_delete_counts_only_existing_rows() {
    let seeded = seeded().await;
    let first = seeded.insert("Alice", seeded.engineering, 1).await;
    let second = seeded.insert("Bob", seeded.sales, 2).await;

    let deleted = seeded
        .repository
        .delete_employees(&[first, second, EmployeeId::new()])
        .await
        .unwrap_or_default();

    assert_eq!(deleted, 2);
    assert_eq!(seeded.repository.count_employees().await.unwrap_or(1), 0);
}

#[tokio::test]
async fn search_requires_every_term_and_honors_limit() {
    let seeded = seeded().await;
    seeded.insert("Alice", seeded.engineering, 1).await;
    seeded.insert("Alina", seeded.sales, 2).await;
    seeded.insert("Bob", seeded.sales, 3).await;

    let columns = vec![EmployeeColumn::FirstName, EmployeeColumn::CountryName];
    let matches = seeded
        .repository
        .search_employees(&EmployeeSearchQuery {
            terms: vec!["ali".to_owned(), "japan".to_owned()],
            columns: columns.clone(),
            limit: 1,
        })
        .await
        .unwrap_or_default();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].employee().first_name(), "Alice");

    let misses = seeded
        .repository
        .search_employees(&EmployeeSearchQuery {
            terms: vec!["ali".to_owned(), "peru".to_owned()],
            columns,
            limit: 50,
        })
        .await
        .unwrap_or_default();
    assert!(misses.is_empty());
}
