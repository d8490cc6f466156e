use staffroll_application::ReferenceDataRepository;
use staffroll_core::AppResult;
use staffroll_domain::{City, CityId, Country, CountryId, Department, DepartmentId, State, StateId};
use tracing::info;

const DEV_SEED_COUNTRIES: [(&str, &str); 2] = [
    ("fec9139f-40b1-4ac5-8a6f-3ccc3f06ffaa", "United States"),
    ("e4dde384-012e-4bb1-991a-c890e5aa98be", "Canada"),
];

/// `(state id, country id, name)`.
const DEV_SEED_STATES: [(&str, &str, &str); 4] = [
    (
        "a3f6e0bd-9540-4b84-8244-c2f63bf245fc",
        "fec9139f-40b1-4ac5-8a6f-3ccc3f06ffaa",
        "California",
    ),
    (
        "68292e54-f70b-48f8-839c-b54f741afcc2",
        "fec9139f-40b1-4ac5-8a6f-3ccc3f06ffaa",
        "Texas",
    ),
    (
        "add85a29-6aba-4c64-9535-e3a6f81ab82e",
        "e4dde384-012e-4bb1-991a-c890e5aa98be",
        "Ontario",
    ),
    (
        "b3ebaca0-fbbb-4da0-81d1-d76883b57018",
        "e4dde384-012e-4bb1-991a-c890e5aa98be",
        "Quebec",
    ),
];

/// `(city id, state id, name)`.
const DEV_SEED_CITIES: [(&str, &str, &str); 5] = [
    (
        "634a3b9b-1d54-42e5-9395-608bfe82f2ca",
        "a3f6e0bd-9540-4b84-8244-c2f63bf245fc",
        "Los Angeles",
    ),
    (
        "998fc2ef-48f5-4d74-a08f-7c34ac114359",
        "a3f6e0bd-9540-4b84-8244-c2f63bf245fc",
        "San Francisco",
    ),
    (
        "5da95bc3-abef-4454-9f72-67d6fd83ea71",
        "68292e54-f70b-48f8-839c-b54f741afcc2",
        "Austin",
    ),
    (
        "8135122e-1549-4d46-bf29-c8b3fb7e5d20",
        "add85a29-6aba-4c64-9535-e3a6f81ab82e",
        "Toronto",
    ),
    (
        "9de361db-b22e-4020-9670-1d15a26abd16",
        "b3ebaca0-fbbb-4da0-81d1-d76883b57018",
        "Montreal",
    ),
];

const DEV_SEED_DEPARTMENTS: [(&str, &str); 4] = [
    ("88bf95e9-e0d4-4715-8d74-e54ba925cba4", "Engineering"),
    ("ccf09528-377e-42ab-8ceb-bd6a3870372f", "Finance"),
    ("406b03bf-6c9e-4468-8293-5f8714469843", "Human Resources"),
    ("fa30b99b-d6b7-4e9a-a4fe-78883ed735b5", "Sales"),
];

/// Upserts a fixed set of locations and departments so the employee form
/// has something to select. Safe to run on every start.
pub async fn run(reference_data: &dyn ReferenceDataRepository) -> AppResult<()> {
    for (id, name) in DEV_SEED_COUNTRIES {
        reference_data
            .save_country(Country::new(id.parse::<CountryId>()?, name)?)
            .await?;
    }

    for (id, country_id, name) in DEV_SEED_STATES {
        reference_data
            .save_state(State::new(
                id.parse::<StateId>()?,
                country_id.parse::<CountryId>()?,
                name,
            )?)
            .await?;
    }

    for (id, state_id, name) in DEV_SEED_CITIES {
        reference_data
            .save_city(City::new(
                id.parse::<CityId>()?,
                state_id.parse::<StateId>()?,
                name,
            )?)
            .await?;
    }

    for (id, name) in DEV_SEED_DEPARTMENTS {
        reference_data
            .save_department(Department::new(id.parse::<DepartmentId>()?, name)?)
            .await?;
    }

    info!(
        countries = DEV_SEED_COUNTRIES.len(),
        states = DEV_SEED_STATES.len(),
        cities = DEV_SEED_CITIES.len(),
        departments = DEV_SEED_DEPARTMENTS.len(),
        "development reference data seed completed"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use staffroll_application::ReferenceDataRepository;
    use staffroll_infrastructure::InMemoryReferenceDataRepository;

    use super::run;

    #[tokio::test]
    async fn seed_is_idempotent_and_links_hierarchy() {
        let repository = InMemoryReferenceDataRepository::new();
        assert!(run(&repository).await.is_ok());
        assert!(run(&repository).await.is_ok());

        let countries = repository.list_countries().await.unwrap_or_default();
        let names: Vec<&str> = countries
            .iter()
            .map(|country| country.name().as_str())
            .collect();
        assert_eq!(names, vec!["Canada", "United States"]);

        let canada = countries[0].id();
        let states = repository.list_states(canada).await.unwrap_or_default();
        assert_eq!(states.len(), 2);
        assert_eq!(repository.list_departments().await.unwrap_or_default().len(), 4);
    }
}
