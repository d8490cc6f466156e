use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use staffroll_core::{AppError, AppResult, NonEmptyString};

use crate::{AttributePath, AttributeSource, AttributeValue};
use crate::{CityId, CountryId, DepartmentId, EmployeeId, StateId};

/// Maximum length of name and address attributes.
pub const EMPLOYEE_TEXT_MAX_LENGTH: usize = 255;

/// Maximum length of the zip code attribute.
pub const EMPLOYEE_ZIP_CODE_MAX_LENGTH: usize = 10;

/// Editable employee attributes, as submitted through the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAttributes {
    /// Selected country.
    pub country_id: CountryId,
    /// Selected state, expected to belong to `country_id`.
    pub state_id: StateId,
    /// Selected city, expected to belong to `state_id`.
    pub city_id: CityId,
    /// Selected department.
    pub department_id: DepartmentId,
    /// Given name.
    pub first_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Family name.
    pub last_name: String,
    /// Street address.
    pub address: String,
    /// Postal code.
    pub zip_code: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Hiring date.
    pub date_hired: NaiveDate,
}

/// Persisted employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    country_id: CountryId,
    state_id: StateId,
    city_id: CityId,
    department_id: DepartmentId,
    first_name: NonEmptyString,
    middle_name: Option<String>,
    last_name: NonEmptyString,
    address: NonEmptyString,
    zip_code: NonEmptyString,
    date_of_birth: NaiveDate,
    date_hired: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Employee {
    /// Creates a validated employee.
    pub fn new(
        id: EmployeeId,
        attributes: EmployeeAttributes,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let text = |name: &str, value: String, max: usize| -> AppResult<NonEmptyString> {
            check_length(name, value.as_str(), max)?;
            NonEmptyString::new(value)
                .map_err(|_| AppError::Validation(format!("employee {name} must not be empty")))
        };

        let middle_name = attributes.middle_name.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });
        if let Some(middle_name) = middle_name.as_deref() {
            check_length("middle_name", middle_name, EMPLOYEE_TEXT_MAX_LENGTH)?;
        }

        if updated_at < created_at {
            return Err(AppError::Validation(
                "employee updated_at must not precede created_at".to_owned(),
            ));
        }

        Ok(Self {
            id,
            country_id: attributes.country_id,
            state_id: attributes.state_id,
            city_id: attributes.city_id,
            department_id: attributes.department_id,
            first_name: text(
                "first_name",
                attributes.first_name,
                EMPLOYEE_TEXT_MAX_LENGTH,
            )?,
            middle_name,
            last_name: text("last_name", attributes.last_name, EMPLOYEE_TEXT_MAX_LENGTH)?,
            address: text("address", attributes.address, EMPLOYEE_TEXT_MAX_LENGTH)?,
            zip_code: text(
                "zip_code",
                attributes.zip_code,
                EMPLOYEE_ZIP_CODE_MAX_LENGTH,
            )?,
            date_of_birth: attributes.date_of_birth,
            date_hired: attributes.date_hired,
            created_at,
            updated_at,
        })
    }

    /// Returns a copy with replaced attributes and a new modification time.
    pub fn revise(
        &self,
        attributes: EmployeeAttributes,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Self::new(self.id, attributes, self.created_at, updated_at)
    }

    /// Returns the editable attributes.
    #[must_use]
    pub fn attributes(&self) -> EmployeeAttributes {
        EmployeeAttributes {
            country_id: self.country_id,
            state_id: self.state_id,
            city_id: self.city_id,
            department_id: self.department_id,
            first_name: self.first_name.as_str().to_owned(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.as_str().to_owned(),
            address: self.address.as_str().to_owned(),
            zip_code: self.zip_code.as_str().to_owned(),
            date_of_birth: self.date_of_birth,
            date_hired: self.date_hired,
        }
    }

    /// Returns `"{first_name} {last_name}"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.as_str(), self.last_name.as_str())
    }

    /// Returns the employee id.
    #[must_use]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the country id.
    #[must_use]
    pub fn country_id(&self) -> CountryId {
        self.country_id
    }

    /// Returns the state id.
    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.state_id
    }

    /// Returns the city id.
    #[must_use]
    pub fn city_id(&self) -> CityId {
        self.city_id
    }

    /// Returns the department id.
    #[must_use]
    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Returns the middle name.
    #[must_use]
    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Returns the address.
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Returns the zip code.
    #[must_use]
    pub fn zip_code(&self) -> &str {
        self.zip_code.as_str()
    }

    /// Returns the date of birth.
    #[must_use]
    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Returns the hiring date.
    #[must_use]
    pub fn date_hired(&self) -> NaiveDate {
        self.date_hired
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn check_length(name: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "employee {name} must not exceed {max} characters"
        )));
    }

    Ok(())
}

/// Employee with the display names of its belongs-to relations loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    employee: Employee,
    country_name: Option<String>,
    state_name: Option<String>,
    city_name: Option<String>,
    department_name: Option<String>,
}

impl EmployeeRecord {
    /// Creates a read model from an employee and its related names.
    #[must_use]
    pub fn new(
        employee: Employee,
        country_name: Option<String>,
        state_name: Option<String>,
        city_name: Option<String>,
        department_name: Option<String>,
    ) -> Self {
        Self {
            employee,
            country_name,
            state_name,
            city_name,
            department_name,
        }
    }

    /// Returns the employee.
    #[must_use]
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Returns the related country name.
    #[must_use]
    pub fn country_name(&self) -> Option<&str> {
        self.country_name.as_deref()
    }

    /// Returns the related state name.
    #[must_use]
    pub fn state_name(&self) -> Option<&str> {
        self.state_name.as_deref()
    }

    /// Returns the related city name.
    #[must_use]
    pub fn city_name(&self) -> Option<&str> {
        self.city_name.as_deref()
    }

    /// Returns the related department name.
    #[must_use]
    pub fn department_name(&self) -> Option<&str> {
        self.department_name.as_deref()
    }
}

impl AttributeSource for EmployeeRecord {
    fn attribute(&self, path: &AttributePath) -> AttributeValue {
        let employee = &self.employee;
        match (path.relation(), path.attribute()) {
            (Some("country"), "name") => AttributeValue::optional_text(self.country_name()),
            (Some("state"), "name") => AttributeValue::optional_text(self.state_name()),
            (Some("city"), "name") => AttributeValue::optional_text(self.city_name()),
            (Some("department"), "name") => AttributeValue::optional_text(self.department_name()),
            (None, "id") => AttributeValue::Text(employee.id().to_string()),
            (None, "country_id") => AttributeValue::Text(employee.country_id().to_string()),
            (None, "state_id") => AttributeValue::Text(employee.state_id().to_string()),
            (None, "city_id") => AttributeValue::Text(employee.city_id().to_string()),
            (None, "department_id") => AttributeValue::Text(employee.department_id().to_string()),
            (None, "first_name") => AttributeValue::Text(employee.first_name().to_owned()),
            (None, "middle_name") => AttributeValue::optional_text(employee.middle_name()),
            (None, "last_name") => AttributeValue::Text(employee.last_name().to_owned()),
            (None, "address") => AttributeValue::Text(employee.address().to_owned()),
            (None, "zip_code") => AttributeValue::Text(employee.zip_code().to_owned()),
            (None, "date_of_birth") => AttributeValue::Date(employee.date_of_birth()),
            (None, "date_hired") => AttributeValue::Date(employee.date_hired()),
            (None, "created_at") => AttributeValue::DateTime(employee.created_at()),
            (None, "updated_at") => AttributeValue::DateTime(employee.updated_at()),
            _ => AttributeValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{NaiveDate, Utc};
    use proptest::prelude::*;

    use super::{Employee, EmployeeAttributes, EmployeeRecord};
    use crate::{
        AttributePath, AttributeSource, AttributeValue, CityId, CountryId, DepartmentId,
        EmployeeId, StateId,
    };

    fn attributes(first_name: &str, last_name: &str) -> EmployeeAttributes {
        EmployeeAttributes {
            country_id: CountryId::new(),
            state_id: StateId::new(),
            city_id: CityId::new(),
            department_id: DepartmentId::new(),
            first_name: first_name.to_owned(),
            middle_name: None,
            last_name: last_name.to_owned(),
            address: "1 Main Street".to_owned(),
            zip_code: "10115".to_owned(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap_or_default(),
            date_hired: NaiveDate::from_ymd_opt(2020, 9, 1).unwrap_or_default(),
        }
    }

    #[test]
    fn rejects_over_long_zip_code() {
        let mut input = attributes("Ada", "Lovelace");
        input.zip_code = "12345678901".to_owned();
        let now = Utc::now();
        assert!(Employee::new(EmployeeId::new(), input, now, now).is_err());
    }

    #[test]
    fn blank_middle_name_is_stored_as_none() {
        let mut input = attributes("Ada", "Lovelace");
        input.middle_name = Some("   ".to_owned());
        let now = Utc::now();
        let employee =
            Employee::new(EmployeeId::new(), input, now, now).unwrap_or_else(|_| unreachable!());
        assert_eq!(employee.middle_name(), None);
    }

    #[test]
    fn record_resolves_related_names() {
        let now = Utc::now();
        let employee = Employee::new(EmployeeId::new(), attributes("Ada", "Lovelace"), now, now)
            .unwrap_or_else(|_| unreachable!());
        let record = EmployeeRecord::new(employee, Some("Germany".to_owned()), None, None, None);

        let country = AttributePath::from_str("country.name").unwrap_or_else(|_| unreachable!());
        let state = AttributePath::from_str("state.name").unwrap_or_else(|_| unreachable!());
        assert_eq!(
            record.attribute(&country),
            AttributeValue::Text("Germany".to_owned())
        );
        assert_eq!(record.attribute(&state), AttributeValue::Empty);
    }

    proptest! {
        #[test]
        fn full_name_joins_first_and_last_with_one_space(
            first_name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
            last_name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
        ) {
            let now = Utc::now();
            let employee = Employee::new(
                EmployeeId::new(),
                attributes(first_name.as_str(), last_name.as_str()),
                now,
                now,
            );
            prop_assert!(employee.is_ok());
            let employee = employee.unwrap_or_else(|_| unreachable!());
            prop_assert_eq!(employee.full_name(), format!("{first_name} {last_name}"));
        }
    }
}
