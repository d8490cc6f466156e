use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use staffroll_core::{AppError, AppResult};

/// Path to an own attribute (`first_name`) or a related one (`country.name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath {
    relation: Option<String>,
    attribute: String,
}

impl AttributePath {
    /// Creates a path to an attribute of the record itself.
    pub fn own(attribute: impl Into<String>) -> AppResult<Self> {
        Self::from_parts(None, attribute.into())
    }

    /// Creates a path to an attribute of a belongs-to relation.
    pub fn related(relation: impl Into<String>, attribute: impl Into<String>) -> AppResult<Self> {
        Self::from_parts(Some(relation.into()), attribute.into())
    }

    fn from_parts(relation: Option<String>, attribute: String) -> AppResult<Self> {
        let valid = |segment: &str| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|character| character.is_ascii_lowercase() || character == '_')
        };

        if !valid(attribute.as_str()) || relation.as_deref().is_some_and(|value| !valid(value)) {
            let joined = match relation.as_deref() {
                Some(relation) => format!("{relation}.{attribute}"),
                None => attribute,
            };
            return Err(AppError::Validation(format!(
                "invalid attribute path '{joined}'"
            )));
        }

        Ok(Self {
            relation,
            attribute,
        })
    }

    /// Returns the relation segment, if any.
    #[must_use]
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    /// Returns the final attribute segment.
    #[must_use]
    pub fn attribute(&self) -> &str {
        self.attribute.as_str()
    }

    /// Returns a human label derived from the path (`country.name` → `Country name`).
    #[must_use]
    pub fn default_label(&self) -> String {
        let raw = match self.relation.as_deref() {
            Some(relation) => format!("{relation} {}", self.attribute),
            None => self.attribute.clone(),
        };
        humanize(raw.as_str())
    }
}

impl FromStr for AttributePath {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once('.') {
            Some((relation, attribute)) => Self::related(relation, attribute),
            None => Self::own(value),
        }
    }
}

impl Display for AttributePath {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self.relation.as_deref() {
            Some(relation) => write!(formatter, "{relation}.{}", self.attribute),
            None => write!(formatter, "{}", self.attribute),
        }
    }
}

impl Serialize for AttributePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AttributePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_str(raw.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Resolved value of an attribute path on one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Plain text.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// UTC timestamp.
    DateTime(DateTime<Utc>),
    /// Null attribute or missing relation.
    Empty,
}

impl AttributeValue {
    /// Wraps optional text, mapping `None` to [`AttributeValue::Empty`].
    #[must_use]
    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, |text| Self::Text(text.to_owned()))
    }

    /// Returns the plain-text form used by search and infolists.
    #[must_use]
    pub fn as_plain_text(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            Self::Date(value) => Some(format_short_date(*value)),
            Self::DateTime(value) => Some(format_date_time(*value)),
            Self::Empty => None,
        }
    }
}

/// Records that can resolve attribute paths for rendering.
pub trait AttributeSource {
    /// Resolves one path; unknown paths resolve to [`AttributeValue::Empty`].
    fn attribute(&self, path: &AttributePath) -> AttributeValue;
}

/// Formats a date as `January 5, 2024`.
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Formats a date as `Jan 5, 2024`.
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats a timestamp as `Jan 5, 2024 13:04:05`.
#[must_use]
pub fn format_date_time(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y %H:%M:%S").to_string()
}

/// Turns `date_of_birth` into `Date of birth`.
#[must_use]
pub fn humanize(value: &str) -> String {
    let spaced = value.replace('_', " ");
    let mut characters = spaced.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{NaiveDate, TimeZone, Utc};

    use super::{AttributePath, format_date_time, format_long_date, format_short_date, humanize};

    #[test]
    fn parses_related_paths() {
        let path = AttributePath::from_str("country.name").unwrap_or_else(|_| unreachable!());
        assert_eq!(path.relation(), Some("country"));
        assert_eq!(path.attribute(), "name");
        assert_eq!(path.to_string(), "country.name");
        assert_eq!(path.default_label(), "Country name");
    }

    #[test]
    fn rejects_nested_or_malformed_paths() {
        assert!(AttributePath::from_str("country.state.name").is_err());
        assert!(AttributePath::from_str("").is_err());
        assert!(AttributePath::from_str("First Name").is_err());
    }

    #[test]
    fn formats_dates_for_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap_or_default();
        assert_eq!(format_long_date(date), "January 5, 2024");
        assert_eq!(format_short_date(date), "Jan 5, 2024");

        let timestamp = Utc
            .with_ymd_and_hms(2024, 1, 5, 13, 4, 5)
            .single()
            .unwrap_or_default();
        assert_eq!(format_date_time(timestamp), "Jan 5, 2024 13:04:05");
    }

    #[test]
    fn humanizes_snake_case() {
        assert_eq!(humanize("date_of_birth"), "Date of birth");
    }
}
