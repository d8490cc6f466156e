use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::Value;
use staffroll_core::{AppError, AppResult};
use staffroll_domain::{
    CityId, CountryId, DepartmentId, EmployeeId, FormState, OptionSource, SelectOption, StateId,
};
use tracing::debug;

use super::{EmployeeForm, EmployeeService, FormUpdate};

impl EmployeeService {
    /// Returns a blank create form with its initial options.
    pub async fn create_form(&self) -> AppResult<EmployeeForm> {
        let state = self.resource.form().blank_state();
        let options = self.form_options(&state).await?;
        Ok(EmployeeForm { state, options })
    }

    /// Returns the edit form of an existing employee.
    pub async fn edit_form(&self, employee_id: EmployeeId) -> AppResult<EmployeeForm> {
        let state = self.edit_state(employee_id).await?;
        let options = self.form_options(&state).await?;
        Ok(EmployeeForm { state, options })
    }

    /// Applies one live field change and recomputes every option list.
    pub async fn update_form_state(
        &self,
        mut state: FormState,
        field: &str,
        value: Value,
    ) -> AppResult<FormUpdate> {
        let cleared = self.resource.form().apply_change(&mut state, field, value)?;
        debug!(field, ?cleared, "form state changed");

        let options = self.form_options(&state).await?;
        Ok(FormUpdate {
            state,
            cleared,
            options,
        })
    }

    /// Resolves the options of every select field for the given state.
    pub async fn form_options(
        &self,
        state: &FormState,
    ) -> AppResult<BTreeMap<String, Vec<SelectOption>>> {
        let mut options = BTreeMap::new();
        for field in self.resource.form().fields() {
            if let Some(source) = field.option_source() {
                options.insert(
                    field.name().to_owned(),
                    self.resolve_options(source, state).await?,
                );
            }
        }
        Ok(options)
    }

    /// Resolves the options of one select field for the given state.
    pub async fn field_options(
        &self,
        field: &str,
        state: &FormState,
    ) -> AppResult<Vec<SelectOption>> {
        let source = self
            .resource
            .form()
            .field(field)
            .and_then(|field| field.option_source())
            .ok_or_else(|| AppError::NotFound(format!("form has no select field named '{field}'")))?;

        self.resolve_options(source, state).await
    }

    /// Returns the display name of one related row, if it exists.
    pub(super) async fn relation_option_label(
        &self,
        relation: &str,
        value: &str,
    ) -> AppResult<Option<String>> {
        let reference = &self.reference_data;
        let name = match relation {
            "country" => reference
                .find_country(CountryId::from_str(value)?)
                .await?
                .map(|row| row.name().as_str().to_owned()),
            "state" => reference
                .find_state(StateId::from_str(value)?)
                .await?
                .map(|row| row.name().as_str().to_owned()),
            "city" => reference
                .find_city(CityId::from_str(value)?)
                .await?
                .map(|row| row.name().as_str().to_owned()),
            "department" => reference
                .find_department(DepartmentId::from_str(value)?)
                .await?
                .map(|row| row.name().as_str().to_owned()),
            other => return Err(unknown_relation(other)),
        };
        Ok(name)
    }

    /// Loads the options of one source.
    ///
    /// Dependent sources whose parent is unset or unparsable yield no
    /// options instead of an error.
    async fn resolve_options(
        &self,
        source: &OptionSource,
        state: &FormState,
    ) -> AppResult<Vec<SelectOption>> {
        let reference = &self.reference_data;
        let parent = source.parent_field().map(|field| state.get_str(field));

        let mut options: Vec<SelectOption> = match (source.relation(), parent) {
            ("country", None) => reference
                .list_countries()
                .await?
                .into_iter()
                .map(|row| SelectOption::new(row.id().to_string(), row.name().as_str()))
                .collect(),
            ("department", None) => reference
                .list_departments()
                .await?
                .into_iter()
                .map(|row| SelectOption::new(row.id().to_string(), row.name().as_str()))
                .collect(),
            ("state", Some(parent)) => {
                match parent.and_then(|value| CountryId::from_str(value).ok()) {
                    Some(country_id) => reference
                        .list_states(country_id)
                        .await?
                        .into_iter()
                        .map(|row| SelectOption::new(row.id().to_string(), row.name().as_str()))
                        .collect(),
                    None => Vec::new(),
                }
            }
            ("city", Some(parent)) => {
                match parent.and_then(|value| StateId::from_str(value).ok()) {
                    Some(state_id) => reference
                        .list_cities(state_id)
                        .await?
                        .into_iter()
                        .map(|row| SelectOption::new(row.id().to_string(), row.name().as_str()))
                        .collect(),
                    None => Vec::new(),
                }
            }
            (other, _) => return Err(unknown_relation(other)),
        };

        options.sort_by(|left, right| left.label.cmp(&right.label));
        Ok(options)
    }
}

fn unknown_relation(relation: &str) -> AppError {
    AppError::Internal(format!("no option loader for relation '{relation}'"))
}
