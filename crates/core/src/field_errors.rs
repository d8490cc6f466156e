use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Records one message for a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns true when no field has a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns messages recorded for one field.
    #[must_use]
    pub fn messages_for(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the fields that have messages, in name order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }

    /// Converts into `Ok(())` when empty, otherwise into `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let fields = self.fields().collect::<Vec<_>>().join(", ");
        write!(formatter, "invalid fields: {fields}")
    }
}

#[cfg(test)]
mod tests {
    use super::FieldErrors;

    #[test]
    fn serializes_as_plain_map() {
        let mut errors = FieldErrors::default();
        errors.push("zip_code", "The zip code field is required.");

        let value = serde_json::to_value(&errors).unwrap_or_default();
        assert_eq!(
            value,
            serde_json::json!({"zip_code": ["The zip code field is required."]})
        );
    }

    #[test]
    fn empty_errors_convert_to_ok() {
        assert!(FieldErrors::default().into_result().is_ok());
    }
}
