use std::str::FromStr;

use serde::{Deserialize, Serialize};
use staffroll_core::{AppError, AppResult, NonEmptyString};

use crate::{AttributePath, AttributeSource};

/// Read-only entry of a detail section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailEntry {
    path: AttributePath,
    label: String,
}

impl DetailEntry {
    /// Creates an entry for a dotted attribute path.
    pub fn new(path: &str) -> AppResult<Self> {
        let path = AttributePath::from_str(path)?;
        let label = path.default_label();
        Ok(Self { path, label })
    }

    /// Returns the attribute path.
    #[must_use]
    pub fn path(&self) -> &AttributePath {
        &self.path
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}

/// Labeled group of read-only entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSection {
    heading: NonEmptyString,
    columns: u8,
    entries: Vec<DetailEntry>,
}

impl DetailSection {
    /// Creates a validated detail section.
    pub fn new(heading: impl Into<String>, columns: u8, entries: Vec<DetailEntry>) -> AppResult<Self> {
        if !(1..=3).contains(&columns) {
            return Err(AppError::Validation(
                "detail section columns must be one of 1, 2, or 3".to_owned(),
            ));
        }

        Ok(Self {
            heading: NonEmptyString::new(heading)?,
            columns,
            entries,
        })
    }

    /// Returns the heading.
    #[must_use]
    pub fn heading(&self) -> &str {
        self.heading.as_str()
    }

    /// Returns the column count.
    #[must_use]
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Returns the entries.
    #[must_use]
    pub fn entries(&self) -> &[DetailEntry] {
        &self.entries
    }
}

/// Read-only layout of the view page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSchema {
    sections: Vec<DetailSection>,
}

/// Rendered detail section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDetailSection {
    /// Section heading.
    pub heading: String,
    /// Section column count.
    pub columns: u8,
    /// `(label, value)` pairs; missing values are `None`.
    pub entries: Vec<(String, Option<String>)>,
}

impl DetailSchema {
    /// Creates a validated detail schema.
    pub fn new(sections: Vec<DetailSection>) -> AppResult<Self> {
        if sections.is_empty() {
            return Err(AppError::Validation(
                "detail schemas must include at least one section".to_owned(),
            ));
        }

        Ok(Self { sections })
    }

    /// Returns the sections.
    #[must_use]
    pub fn sections(&self) -> &[DetailSection] {
        &self.sections
    }

    /// Resolves every entry against a record.
    #[must_use]
    pub fn render(&self, record: &impl AttributeSource) -> Vec<RenderedDetailSection> {
        self.sections
            .iter()
            .map(|section| RenderedDetailSection {
                heading: section.heading().to_owned(),
                columns: section.columns(),
                entries: section
                    .entries()
                    .iter()
                    .map(|entry| {
                        (
                            entry.label().to_owned(),
                            record.attribute(entry.path()).as_plain_text(),
                        )
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{DetailEntry, DetailSchema, DetailSection};
    use crate::{AttributePath, AttributeSource, AttributeValue};

    struct Row;

    impl AttributeSource for Row {
        fn attribute(&self, path: &AttributePath) -> AttributeValue {
            match (path.relation(), path.attribute()) {
                (Some("country"), "name") => AttributeValue::Text("Japan".to_owned()),
                _ => AttributeValue::Empty,
            }
        }
    }

    #[test]
    fn renders_labels_and_values() {
        let schema = DetailSchema::new(vec![
            DetailSection::new(
                "Relationship",
                2,
                vec![
                    DetailEntry::new("country.name").unwrap_or_else(|_| unreachable!()),
                    DetailEntry::new("state.name").unwrap_or_else(|_| unreachable!()),
                ],
            )
            .unwrap_or_else(|_| unreachable!()),
        ])
        .unwrap_or_else(|_| unreachable!());

        let rendered = schema.render(&Row);
        assert_eq!(rendered[0].heading, "Relationship");
        assert_eq!(
            rendered[0].entries,
            vec![
                ("Country name".to_owned(), Some("Japan".to_owned())),
                ("State name".to_owned(), None),
            ]
        );
    }
}
