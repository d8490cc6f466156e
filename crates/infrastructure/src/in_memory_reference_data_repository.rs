use std::collections::HashMap;

use async_trait::async_trait;
use staffroll_application::ReferenceDataRepository;
use staffroll_core::{AppError, AppResult};
use staffroll_domain::{City, CityId, Country, CountryId, Department, DepartmentId, State, StateId};
use tokio::sync::RwLock;

/// In-memory location and department repository.
#[derive(Debug, Default)]
pub struct InMemoryReferenceDataRepository {
    countries: RwLock<HashMap<CountryId, Country>>,
    states: RwLock<HashMap<StateId, State>>,
    cities: RwLock<HashMap<CityId, City>>,
    departments: RwLock<HashMap<DepartmentId, Department>>,
}

/// Snapshot of every reference name, keyed by id.
#[derive(Debug, Default)]
pub(crate) struct ReferenceNames {
    pub(crate) countries: HashMap<CountryId, String>,
    pub(crate) states: HashMap<StateId, String>,
    pub(crate) cities: HashMap<CityId, String>,
    pub(crate) departments: HashMap<DepartmentId, String>,
}

impl InMemoryReferenceDataRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn names(&self) -> ReferenceNames {
        ReferenceNames {
            countries: self
                .countries
                .read()
                .await
                .values()
                .map(|row| (row.id(), row.name().as_str().to_owned()))
                .collect(),
            states: self
                .states
                .read()
                .await
                .values()
                .map(|row| (row.id(), row.name().as_str().to_owned()))
                .collect(),
            cities: self
                .cities
                .read()
                .await
                .values()
                .map(|row| (row.id(), row.name().as_str().to_owned()))
                .collect(),
            departments: self
                .departments
                .read()
                .await
                .values()
                .map(|row| (row.id(), row.name().as_str().to_owned()))
                .collect(),
        }
    }
}

fn sorted_by_name<T: Clone>(
    values: impl Iterator<Item = T>,
    name: impl Fn(&T) -> &str,
) -> Vec<T> {
    let mut values: Vec<T> = values.collect();
    values.sort_by(|left, right| name(left).cmp(name(right)));
    values
}

#[async_trait]
impl ReferenceDataRepository for InMemoryReferenceDataRepository {
    async fn list_countries(&self) -> AppResult<Vec<Country>> {
        let countries = self.countries.read().await;
        Ok(sorted_by_name(countries.values().cloned(), |row| {
            row.name().as_str()
        }))
    }

    async fn list_states(&self, country_id: CountryId) -> AppResult<Vec<State>> {
        let states = self.states.read().await;
        Ok(sorted_by_name(
            states
                .values()
                .filter(|state| state.country_id() == country_id)
                .cloned(),
            |row| row.name().as_str(),
        ))
    }

    async fn list_cities(&self, state_id: StateId) -> AppResult<Vec<City>> {
        let cities = self.cities.read().await;
        Ok(sorted_by_name(
            cities
                .values()
                .filter(|city| city.state_id() == state_id)
                .cloned(),
            |row| row.name().as_str(),
        ))
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let departments = self.departments.read().await;
        Ok(sorted_by_name(departments.values().cloned(), |row| {
            row.name().as_str()
        }))
    }

    async fn find_country(&self, country_id: CountryId) -> AppResult<Option<Country>> {
        Ok(self.countries.read().await.get(&country_id).cloned())
    }

    async fn find_state(&self, state_id: StateId) -> AppResult<Option<State>> {
        Ok(self.states.read().await.get(&state_id).cloned())
    }

    async fn find_city(&self, city_id: CityId) -> AppResult<Option<City>> {
        Ok(self.cities.read().await.get(&city_id).cloned())
    }

    async fn find_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Option<Department>> {
        Ok(self.departments.read().await.get(&department_id).cloned())
    }

    async fn save_country(&self, country: Country) -> AppResult<()> {
        self.countries.write().await.insert(country.id(), country);
        Ok(())
    }

    async fn save_state(&self, state: State) -> AppResult<()> {
        if !self.countries.read().await.contains_key(&state.country_id()) {
            return Err(AppError::Validation(format!(
                "country '{}' does not exist",
                state.country_id()
            )));
        }

        self.states.write().await.insert(state.id(), state);
        Ok(())
    }

    async fn save_city(&self, city: City) -> AppResult<()> {
        if !self.states.read().await.contains_key(&city.state_id()) {
            return Err(AppError::Validation(format!(
                "state '{}' does not exist",
                city.state_id()
            )));
        }

        self.cities.write().await.insert(city.id(), city);
        Ok(())
    }

    async fn save_department(&self, department: Department) -> AppResult<()> {
        self.departments
            .write()
            .await
            .insert(department.id(), department);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use staffroll_application::ReferenceDataRepository;
    use staffroll_domain::{City, CityId, Country, CountryId, State, StateId};

    use super::InMemoryReferenceDataRepository;

    #[tokio::test]
    async fn states_are_scoped_to_country_and_sorted() {
        let repository = InMemoryReferenceDataRepository::new();
        let country_id = CountryId::new();
        let other_country_id = CountryId::new();

        for (id, name) in [(country_id, "Mexico"), (other_country_id, "Peru")] {
            let country = Country::new(id, name).unwrap_or_else(|_| unreachable!());
            assert!(repository.save_country(country).await.is_ok());
        }
        for (country, name) in [
            (country_id, "Yucatan"),
            (country_id, "Jalisco"),
            (other_country_id, "Cusco"),
        ] {
            let state =
                State::new(StateId::new(), country, name).unwrap_or_else(|_| unreachable!());
            assert!(repository.save_state(state).await.is_ok());
        }

        let states = repository.list_states(country_id).await.unwrap_or_default();
        let names: Vec<&str> = states.iter().map(|state| state.name().as_str()).collect();
        assert_eq!(names, vec!["Jalisco", "Yucatan"]);
    }

    #[tokio::test]
    async fn city_requires_existing_state() {
        let repository = InMemoryReferenceDataRepository::new();
        let city = City::new(CityId::new(), StateId::new(), "Lima").unwrap_or_else(|_| unreachable!());

        assert!(repository.save_city(city).await.is_err());
    }
}
