use serde::{Deserialize, Serialize};
use staffroll_core::{AppResult, NonEmptyString};

use crate::{CityId, CountryId, DepartmentId, StateId};

/// Top-level location reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    id: CountryId,
    name: NonEmptyString,
}

impl Country {
    /// Creates a validated country.
    pub fn new(id: CountryId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the country id.
    #[must_use]
    pub fn id(&self) -> CountryId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

/// State or province, owned by one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    id: StateId,
    country_id: CountryId,
    name: NonEmptyString,
}

impl State {
    /// Creates a validated state.
    pub fn new(id: StateId, country_id: CountryId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            country_id,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the state id.
    #[must_use]
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Returns the parent country id.
    #[must_use]
    pub fn country_id(&self) -> CountryId {
        self.country_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

/// City, owned by one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    id: CityId,
    state_id: StateId,
    name: NonEmptyString,
}

impl City {
    /// Creates a validated city.
    pub fn new(id: CityId, state_id: StateId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            state_id,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the city id.
    #[must_use]
    pub fn id(&self) -> CityId {
        self.id
    }

    /// Returns the parent state id.
    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.state_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

/// Organizational department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    id: DepartmentId,
    name: NonEmptyString,
}

impl Department {
    /// Creates a validated department.
    pub fn new(id: DepartmentId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the department id.
    #[must_use]
    pub fn id(&self) -> DepartmentId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::{Country, State};
    use crate::{CountryId, StateId};

    #[test]
    fn reference_names_must_not_be_blank() {
        assert!(Country::new(CountryId::new(), "  ").is_err());
    }

    #[test]
    fn state_keeps_parent_country() {
        let country_id = CountryId::new();
        let state = State::new(StateId::new(), country_id, "Bavaria")
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(state.country_id(), country_id);
    }
}
