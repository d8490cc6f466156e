use std::str::FromStr;

use serde::{Deserialize, Serialize};
use staffroll_core::{AppError, AppResult};

use crate::{AttributePath, AttributeSource};

/// Labeled detail line shown under a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDetail {
    label: String,
    path: AttributePath,
}

impl SearchDetail {
    /// Creates a detail line.
    pub fn new(label: impl Into<String>, path: &str) -> AppResult<Self> {
        Ok(Self {
            label: label.into(),
            path: AttributePath::from_str(path)?,
        })
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the attribute path.
    #[must_use]
    pub fn path(&self) -> &AttributePath {
        &self.path
    }
}

/// How a resource takes part in cross-resource search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSearchSchema {
    title_attributes: Vec<AttributePath>,
    searchable_attributes: Vec<AttributePath>,
    details: Vec<SearchDetail>,
    eager_relations: Vec<String>,
    limit: usize,
}

/// One global search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSearchResult {
    /// Result title.
    pub title: String,
    /// `(label, value)` detail lines.
    pub details: Vec<(String, String)>,
    /// Page the result links to.
    pub url: String,
}

impl GlobalSearchSchema {
    /// Creates a validated search schema.
    ///
    /// Every relation read by a detail line must be eager-loaded.
    pub fn new(
        title_attributes: &[&str],
        searchable_attributes: &[&str],
        details: Vec<SearchDetail>,
        eager_relations: &[&str],
        limit: usize,
    ) -> AppResult<Self> {
        let parse = |paths: &[&str]| {
            paths
                .iter()
                .map(|path| AttributePath::from_str(path))
                .collect::<AppResult<Vec<_>>>()
        };
        let title_attributes = parse(title_attributes)?;
        let searchable_attributes = parse(searchable_attributes)?;

        if title_attributes.is_empty() || searchable_attributes.is_empty() {
            return Err(AppError::Validation(
                "global search needs title and searchable attributes".to_owned(),
            ));
        }

        if limit == 0 {
            return Err(AppError::Validation(
                "global search limit must be greater than zero".to_owned(),
            ));
        }

        for detail in &details {
            if let Some(relation) = detail.path().relation()
                && !eager_relations.contains(&relation)
            {
                return Err(AppError::Validation(format!(
                    "search detail '{}' reads relation '{relation}' which is not eager-loaded",
                    detail.label()
                )));
            }
        }

        Ok(Self {
            title_attributes,
            searchable_attributes,
            details,
            eager_relations: eager_relations.iter().map(|value| (*value).to_owned()).collect(),
            limit,
        })
    }

    /// Returns the attributes searched by a query.
    #[must_use]
    pub fn searchable_attributes(&self) -> &[AttributePath] {
        &self.searchable_attributes
    }

    /// Returns the detail lines.
    #[must_use]
    pub fn details(&self) -> &[SearchDetail] {
        &self.details
    }

    /// Returns the relations loaded together with results.
    #[must_use]
    pub fn eager_relations(&self) -> &[String] {
        &self.eager_relations
    }

    /// Returns the maximum number of results.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Splits a query into lower-cased terms.
    #[must_use]
    pub fn terms(query: &str) -> Vec<String> {
        query.split_whitespace().map(str::to_lowercase).collect()
    }

    /// Returns whether every query term occurs in some searchable attribute.
    #[must_use]
    pub fn matches(&self, record: &impl AttributeSource, terms: &[String]) -> bool {
        let haystacks: Vec<String> = self
            .searchable_attributes
            .iter()
            .filter_map(|path| record.attribute(path).as_plain_text())
            .map(|value| value.to_lowercase())
            .collect();

        !terms.is_empty()
            && terms.iter().all(|term| {
                haystacks
                    .iter()
                    .any(|haystack| haystack.contains(term.as_str()))
            })
    }

    /// Builds the result entry for one record.
    #[must_use]
    pub fn result_for(&self, record: &impl AttributeSource, url: String) -> GlobalSearchResult {
        let title = self
            .title_attributes
            .iter()
            .map(|path| record.attribute(path).as_plain_text().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ");

        let details = self
            .details
            .iter()
            .map(|detail| {
                (
                    detail.label().to_owned(),
                    record
                        .attribute(detail.path())
                        .as_plain_text()
                        .unwrap_or_default(),
                )
            })
            .collect();

        GlobalSearchResult {
            title,
            details,
            url,
        }
    }
}

/// Badge color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeColor {
    /// Neutral.
    Gray,
    /// Brand color.
    Primary,
    /// Positive.
    Success,
    /// Attention.
    Warning,
    /// Negative.
    Danger,
}

/// Sidebar navigation entry of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    /// Entry label.
    pub label: String,
    /// Icon name.
    pub icon: String,
    /// Sidebar group.
    pub group: String,
    /// Color of the count badge.
    pub badge_color: BadgeColor,
}

/// Count badge rendered next to a navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationBadge {
    /// Badge text.
    pub value: String,
    /// Badge color.
    pub color: BadgeColor,
}

impl NavigationItem {
    /// Builds the badge showing a record count.
    #[must_use]
    pub fn count_badge(&self, count: u64) -> NavigationBadge {
        NavigationBadge {
            value: count.to_string(),
            color: self.badge_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobalSearchSchema, SearchDetail};
    use crate::{AttributePath, AttributeSource, AttributeValue};

    struct Person;

    impl AttributeSource for Person {
        fn attribute(&self, path: &AttributePath) -> AttributeValue {
            match (path.relation(), path.attribute()) {
                (None, "first_name") => AttributeValue::Text("Grace".to_owned()),
                (None, "last_name") => AttributeValue::Text("Hopper".to_owned()),
                (Some("country"), "name") => AttributeValue::Text("United States".to_owned()),
                _ => AttributeValue::Empty,
            }
        }
    }

    fn schema() -> GlobalSearchSchema {
        GlobalSearchSchema::new(
            &["first_name", "last_name"],
            &["first_name", "middle_name", "last_name", "country.name"],
            vec![SearchDetail::new("Country", "country.name").unwrap_or_else(|_| unreachable!())],
            &["country"],
            50,
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn details_must_read_eager_loaded_relations() {
        let result = GlobalSearchSchema::new(
            &["first_name"],
            &["first_name"],
            vec![SearchDetail::new("State", "state.name").unwrap_or_else(|_| unreachable!())],
            &["country"],
            50,
        );
        assert!(result.is_err());
    }

    #[test]
    fn every_term_must_match_some_attribute() {
        let schema = schema();
        assert!(schema.matches(&Person, &GlobalSearchSchema::terms("grace united")));
        assert!(!schema.matches(&Person, &GlobalSearchSchema::terms("grace canada")));
        assert!(!schema.matches(&Person, &GlobalSearchSchema::terms("   ")));
    }

    #[test]
    fn result_title_and_details() {
        let result = schema().result_for(&Person, "/admin/employees/1/edit".to_owned());
        assert_eq!(result.title, "Grace Hopper");
        assert_eq!(
            result.details,
            vec![("Country".to_owned(), "United States".to_owned())]
        );
    }
}
