use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use staffroll_core::{AppError, AppResult, FieldErrors, NonEmptyString};

use crate::humanize;

/// Wire format of date values in form state.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Where a select field loads its options from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionSource {
    /// Every row of a belongs-to relation.
    Relationship {
        /// Relation name on the owning record.
        relation: String,
        /// Attribute used as the option label.
        title_attribute: String,
    },
    /// Rows of a relation narrowed by the current value of a parent field.
    Dependent {
        /// Relation name on the owning record.
        relation: String,
        /// Attribute used as the option label.
        title_attribute: String,
        /// Form field whose value filters the rows.
        parent_field: String,
    },
}

impl OptionSource {
    /// Returns the relation the options come from.
    #[must_use]
    pub fn relation(&self) -> &str {
        match self {
            Self::Relationship { relation, .. } | Self::Dependent { relation, .. } => {
                relation.as_str()
            }
        }
    }

    /// Returns the parent field for dependent sources.
    #[must_use]
    pub fn parent_field(&self) -> Option<&str> {
        match self {
            Self::Relationship { .. } => None,
            Self::Dependent { parent_field, .. } => Some(parent_field.as_str()),
        }
    }
}

/// Input widget and its type-specific settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormFieldKind {
    /// Single-line text input.
    TextInput {
        /// Maximum number of characters.
        max_length: Option<usize>,
    },
    /// Dropdown backed by an option source.
    Select {
        /// Option source.
        source: OptionSource,
        /// Whether the dropdown offers type-ahead search.
        searchable: bool,
        /// Whether options load with the form instead of on search.
        preload: bool,
    },
    /// Calendar date picker.
    DatePicker {
        /// Whether the browser's native picker is used.
        native: bool,
        /// Display format in PHP-style tokens, e.g. `d/m/Y`.
        display_format: String,
    },
}

/// Editable field placed in a form section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    name: NonEmptyString,
    label: String,
    kind: FormFieldKind,
    required: bool,
    live: bool,
    resets: Vec<String>,
}

impl FormField {
    /// Creates a field with a label derived from its name.
    pub fn new(name: impl Into<String>, kind: FormFieldKind) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;
        let label = humanize(name.as_str().trim_end_matches("_id"));

        Ok(Self {
            name,
            label,
            kind,
            required: false,
            live: false,
            resets: Vec::new(),
        })
    }

    /// Creates a text input.
    pub fn text_input(name: impl Into<String>, max_length: Option<usize>) -> AppResult<Self> {
        Self::new(name, FormFieldKind::TextInput { max_length })
    }

    /// Creates a searchable select.
    pub fn select(name: impl Into<String>, source: OptionSource, preload: bool) -> AppResult<Self> {
        Self::new(
            name,
            FormFieldKind::Select {
                source,
                searchable: true,
                preload,
            },
        )
    }

    /// Creates a non-native date picker with the given display format.
    pub fn date_picker(name: impl Into<String>, display_format: &str) -> AppResult<Self> {
        Self::new(
            name,
            FormFieldKind::DatePicker {
                native: false,
                display_format: display_format.to_owned(),
            },
        )
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sends changes to the server immediately.
    #[must_use]
    pub fn live(mut self) -> Self {
        self.live = true;
        self
    }

    /// Marks the field as live and clears `fields` whenever it changes.
    #[must_use]
    pub fn live_resetting(mut self, fields: &[&str]) -> Self {
        self.live = true;
        self.resets = fields.iter().map(|field| (*field).to_owned()).collect();
        self
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the widget kind.
    #[must_use]
    pub fn kind(&self) -> &FormFieldKind {
        &self.kind
    }

    /// Returns whether a value must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns whether changes are sent to the server immediately.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Returns the fields cleared when this one changes.
    #[must_use]
    pub fn resets(&self) -> &[String] {
        &self.resets
    }

    /// Returns the option source for select fields.
    #[must_use]
    pub fn option_source(&self) -> Option<&OptionSource> {
        match &self.kind {
            FormFieldKind::Select { source, .. } => Some(source),
            _ => None,
        }
    }

    fn validate_value(&self, value: Option<&Value>, errors: &mut FieldErrors) {
        let label = self.label.to_lowercase();
        let text = match value {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.trim().is_empty() => None,
            Some(Value::String(text)) => Some(text.trim()),
            Some(_) => {
                errors.push(self.name(), format!("The {label} field must be a string."));
                return;
            }
        };

        let Some(text) = text else {
            if self.required {
                errors.push(self.name(), format!("The {label} field is required."));
            }
            return;
        };

        match &self.kind {
            FormFieldKind::TextInput {
                max_length: Some(max_length),
            } if text.chars().count() > *max_length => {
                errors.push(
                    self.name(),
                    format!("The {label} field must not be greater than {max_length} characters."),
                );
            }
            FormFieldKind::DatePicker { .. }
                if NaiveDate::parse_from_str(text, FORM_DATE_FORMAT).is_err() =>
            {
                errors.push(
                    self.name(),
                    format!("The {label} field must be a valid date."),
                );
            }
            _ => {}
        }
    }
}

/// Labeled group of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSection {
    heading: NonEmptyString,
    description: Option<String>,
    columns: u8,
    fields: Vec<FormField>,
}

impl FormSection {
    /// Creates a validated form section.
    pub fn new(
        heading: impl Into<String>,
        description: Option<&str>,
        columns: u8,
        fields: Vec<FormField>,
    ) -> AppResult<Self> {
        if !(1..=3).contains(&columns) {
            return Err(AppError::Validation(
                "form section columns must be one of 1, 2, or 3".to_owned(),
            ));
        }

        if fields.is_empty() {
            return Err(AppError::Validation(
                "form sections must include at least one field".to_owned(),
            ));
        }

        Ok(Self {
            heading: NonEmptyString::new(heading)?,
            description: description.map(str::to_owned),
            columns,
            fields,
        })
    }

    /// Returns the section heading.
    #[must_use]
    pub fn heading(&self) -> &str {
        self.heading.as_str()
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the grid column count.
    #[must_use]
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Returns fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

/// Create/edit form layout and rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    columns: u8,
    sections: Vec<FormSection>,
}

impl FormSchema {
    /// Creates a validated form schema.
    pub fn new(columns: u8, sections: Vec<FormSection>) -> AppResult<Self> {
        if !(1..=3).contains(&columns) {
            return Err(AppError::Validation(
                "form columns must be one of 1, 2, or 3".to_owned(),
            ));
        }

        if sections.is_empty() {
            return Err(AppError::Validation(
                "forms must include at least one section".to_owned(),
            ));
        }

        let mut names = HashSet::new();
        for field in sections.iter().flat_map(|section| section.fields()) {
            if !names.insert(field.name()) {
                return Err(AppError::Validation(format!(
                    "duplicate field '{}' in form",
                    field.name()
                )));
            }
        }

        for field in sections.iter().flat_map(|section| section.fields()) {
            for reset in field.resets() {
                if !names.contains(reset.as_str()) || reset == field.name() {
                    return Err(AppError::Validation(format!(
                        "field '{}' resets unknown field '{}'",
                        field.name(),
                        reset
                    )));
                }
            }

            if let Some(parent) = field.option_source().and_then(OptionSource::parent_field)
                && !names.contains(parent)
            {
                return Err(AppError::Validation(format!(
                    "field '{}' depends on unknown field '{}'",
                    field.name(),
                    parent
                )));
            }
        }

        Ok(Self { columns, sections })
    }

    /// Returns the top-level column count.
    #[must_use]
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Returns sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[FormSection] {
        &self.sections
    }

    /// Iterates every field across sections.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.sections.iter().flat_map(|section| section.fields())
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields().find(|field| field.name() == name)
    }

    /// Returns a state with every field unset.
    #[must_use]
    pub fn blank_state(&self) -> FormState {
        FormState(
            self.fields()
                .map(|field| (field.name().to_owned(), Value::Null))
                .collect(),
        )
    }

    /// Writes a field value and clears the fields it resets.
    ///
    /// Returns the names of the cleared fields.
    pub fn apply_change(
        &self,
        state: &mut FormState,
        field_name: &str,
        value: Value,
    ) -> AppResult<Vec<String>> {
        let field = self.field(field_name).ok_or_else(|| {
            AppError::Validation(format!("form has no field named '{field_name}'"))
        })?;

        state.set(field.name(), value);
        for reset in field.resets() {
            state.clear(reset.as_str());
        }

        Ok(field.resets().to_vec())
    }

    /// Checks required and length rules for every field.
    #[must_use]
    pub fn validate(&self, state: &FormState) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in self.fields() {
            field.validate_value(state.get(field.name()), &mut errors);
        }
        errors
    }
}

/// Current values of a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, Value>);

impl FormState {
    /// Creates state from raw field values.
    #[must_use]
    pub fn from_values(values: BTreeMap<String, Value>) -> Self {
        Self(values)
    }

    /// Returns the raw value for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a non-blank string value for a field.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Sets a field value.
    pub fn set(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_owned(), value);
    }

    /// Unsets a field.
    pub fn clear(&mut self, field: &str) {
        self.0.insert(field.to_owned(), Value::Null);
    }

    /// Returns the underlying map.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.0
    }
}

/// One selectable option: the stored value and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value, typically an id.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl SelectOption {
    /// Creates an option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{FormField, FormSchema, FormSection, OptionSource};

    fn location_form() -> FormSchema {
        let country = FormField::select(
            "country_id",
            OptionSource::Relationship {
                relation: "country".to_owned(),
                title_attribute: "name".to_owned(),
            },
            true,
        )
        .unwrap_or_else(|_| unreachable!())
        .required()
        .live_resetting(&["state_id"]);
        let state = FormField::select(
            "state_id",
            OptionSource::Dependent {
                relation: "state".to_owned(),
                title_attribute: "name".to_owned(),
                parent_field: "country_id".to_owned(),
            },
            true,
        )
        .unwrap_or_else(|_| unreachable!())
        .required();
        let name = FormField::text_input("first_name", Some(5)).unwrap_or_else(|_| unreachable!());
        let section = FormSection::new("Location", None, 2, vec![country, state, name])
            .unwrap_or_else(|_| unreachable!());
        FormSchema::new(3, vec![section]).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn select_labels_drop_the_id_suffix() {
        let form = location_form();
        assert_eq!(form.field("country_id").map(FormField::label), Some("Country"));
    }

    #[test]
    fn rejects_duplicate_fields() {
        let first = FormField::text_input("name", None).unwrap_or_else(|_| unreachable!());
        let second = FormField::text_input("name", None).unwrap_or_else(|_| unreachable!());
        let section = FormSection::new("Main", None, 1, vec![first, second])
            .unwrap_or_else(|_| unreachable!());
        assert!(FormSchema::new(1, vec![section]).is_err());
    }

    #[test]
    fn rejects_resets_of_unknown_fields() {
        let field = FormField::text_input("name", None)
            .unwrap_or_else(|_| unreachable!())
            .live_resetting(&["missing"]);
        let section =
            FormSection::new("Main", None, 1, vec![field]).unwrap_or_else(|_| unreachable!());
        assert!(FormSchema::new(1, vec![section]).is_err());
    }

    #[test]
    fn rejects_four_column_sections() {
        let field = FormField::text_input("name", None).unwrap_or_else(|_| unreachable!());
        assert!(FormSection::new("Main", None, 4, vec![field]).is_err());
    }

    #[test]
    fn change_clears_reset_fields() {
        let form = location_form();
        let mut state = form.blank_state();
        state.set("state_id", json!("some-state"));

        let cleared = form
            .apply_change(&mut state, "country_id", json!("some-country"))
            .unwrap_or_default();

        assert_eq!(cleared, vec!["state_id".to_owned()]);
        assert_eq!(state.get("state_id"), Some(&Value::Null));
        assert_eq!(state.get_str("country_id"), Some("some-country"));
    }

    #[test]
    fn change_of_unknown_field_fails() {
        let form = location_form();
        let mut state = form.blank_state();
        assert!(form.apply_change(&mut state, "nope", json!(1)).is_err());
    }

    #[test]
    fn validation_reports_required_and_length_violations() {
        let form = location_form();
        let mut state = form.blank_state();
        state.set("first_name", json!("Alexander"));

        let errors = form.validate(&state);
        assert_eq!(
            errors.messages_for("country_id"),
            ["The country field is required.".to_owned()]
        );
        assert_eq!(
            errors.messages_for("first_name"),
            ["The first name field must not be greater than 5 characters.".to_owned()]
        );
    }

    #[test]
    fn length_limits_apply_to_trimmed_text() {
        let form = location_form();
        let mut state = form.blank_state();
        state.set("first_name", json!("   Alice   "));

        let errors = form.validate(&state);
        assert!(errors.messages_for("first_name").is_empty());
    }
}
