use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use staffroll_core::{AppError, AppResult, NonEmptyString};

use crate::{format_long_date, humanize};

/// Placement of the filter form relative to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiltersLayout {
    /// Filters render above the table content.
    AboveContent,
    /// Filters render inside a dropdown.
    Dropdown,
}

/// Filter widget and its settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterKind {
    /// Exact match against a relation's id.
    Select {
        /// Relation providing the options.
        relation: String,
        /// Attribute used as option label.
        title_attribute: String,
        /// Whether the dropdown offers type-ahead search.
        searchable: bool,
        /// Whether options load with the form.
        preload: bool,
    },
    /// Inclusive date range over a timestamp column.
    DateRange {
        /// Column compared against the range.
        column: String,
        /// Indicator prefix, e.g. `Created`.
        indicator_prefix: String,
        /// Columns spanned in the filter form.
        column_span: u8,
        /// Internal column count of the range inputs.
        columns: u8,
    },
}

/// One filter of the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFilter {
    name: NonEmptyString,
    label: String,
    enabled: bool,
    kind: FilterKind,
}

impl TableFilter {
    /// Creates an enabled exact-match filter over a relation.
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        relation: impl Into<String>,
        preload: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            label: label.into(),
            enabled: true,
            kind: FilterKind::Select {
                relation: relation.into(),
                title_attribute: "name".to_owned(),
                searchable: true,
                preload,
            },
        })
    }

    /// Creates an enabled `from`/`until` date range filter on `column`.
    pub fn date_range(column: impl Into<String>, indicator_prefix: &str) -> AppResult<Self> {
        let column = column.into();
        Ok(Self {
            name: NonEmptyString::new(column.clone())?,
            label: humanize(column.as_str()),
            enabled: true,
            kind: FilterKind::DateRange {
                column,
                indicator_prefix: indicator_prefix.to_owned(),
                column_span: 2,
                columns: 2,
            },
        })
    }

    /// Keeps the filter in the descriptor but switches it off.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Returns the filter name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns whether the filter is active in the UI and in queries.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the filter kind.
    #[must_use]
    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }
}

/// `from`/`until` input of a date range filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeValue {
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub until: Option<NaiveDate>,
}

impl DateRangeValue {
    /// Returns true when neither bound is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.until.is_none()
    }

    /// Returns whether a date lies inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.until.is_none_or(|until| date <= until)
    }
}

/// Filter values submitted with a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilters {
    /// Selected value per select filter.
    pub selects: BTreeMap<String, String>,
    /// Range per date range filter.
    pub date_ranges: BTreeMap<String, DateRangeValue>,
}

/// What clicking an indicator's remove control clears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "field", rename_all = "snake_case")]
pub enum IndicatorRemoval {
    /// Every input of the filter.
    Filter,
    /// One input of the filter.
    Field(String),
}

/// Removable chip summarizing one active filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// Chip text.
    pub label: String,
    /// Filter the chip belongs to.
    pub filter: String,
    /// What the remove control clears.
    pub removal: IndicatorRemoval,
}

/// Builds the indicators of a date range filter.
#[must_use]
pub fn date_range_indicators(
    filter: &str,
    indicator_prefix: &str,
    value: &DateRangeValue,
) -> Vec<Indicator> {
    let mut indicators = Vec::new();

    if let Some(from) = value.from {
        indicators.push(Indicator {
            label: format!("{indicator_prefix} from {}", format_long_date(from)),
            filter: filter.to_owned(),
            removal: IndicatorRemoval::Filter,
        });
    }

    if let Some(until) = value.until {
        indicators.push(Indicator {
            label: format!("{indicator_prefix} until {}", format_long_date(until)),
            filter: filter.to_owned(),
            removal: IndicatorRemoval::Field("until".to_owned()),
        });
    }

    indicators
}

/// Filter set of the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSchema {
    layout: FiltersLayout,
    form_columns: u8,
    filters: Vec<TableFilter>,
}

impl FilterSchema {
    /// Creates a validated filter schema.
    pub fn new(
        layout: FiltersLayout,
        form_columns: u8,
        filters: Vec<TableFilter>,
    ) -> AppResult<Self> {
        if !(1..=4).contains(&form_columns) {
            return Err(AppError::Validation(
                "filter form columns must be between 1 and 4".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for filter in &filters {
            if !seen.insert(filter.name()) {
                return Err(AppError::Validation(format!(
                    "duplicate filter '{}'",
                    filter.name()
                )));
            }

            if let FilterKind::DateRange { column_span, .. } = filter.kind()
                && *column_span > form_columns
            {
                return Err(AppError::Validation(format!(
                    "filter '{}' spans {} columns but the form has {}",
                    filter.name(),
                    column_span,
                    form_columns
                )));
            }
        }

        Ok(Self {
            layout,
            form_columns,
            filters,
        })
    }

    /// Returns the layout.
    #[must_use]
    pub fn layout(&self) -> FiltersLayout {
        self.layout
    }

    /// Returns the filter form column count.
    #[must_use]
    pub fn form_columns(&self) -> u8 {
        self.form_columns
    }

    /// Returns every filter, disabled ones included.
    #[must_use]
    pub fn filters(&self) -> &[TableFilter] {
        &self.filters
    }

    /// Returns only enabled filters.
    pub fn enabled_filters(&self) -> impl Iterator<Item = &TableFilter> {
        self.filters.iter().filter(|filter| filter.is_enabled())
    }

    /// Drops values of unknown, disabled, or mismatched filters and empty ranges.
    #[must_use]
    pub fn effective(&self, active: &ActiveFilters) -> ActiveFilters {
        let mut effective = ActiveFilters::default();
        for filter in self.enabled_filters() {
            match filter.kind() {
                FilterKind::Select { .. } => {
                    if let Some(value) = active
                        .selects
                        .get(filter.name())
                        .filter(|value| !value.trim().is_empty())
                    {
                        effective
                            .selects
                            .insert(filter.name().to_owned(), value.clone());
                    }
                }
                FilterKind::DateRange { .. } => {
                    if let Some(range) = active
                        .date_ranges
                        .get(filter.name())
                        .filter(|range| !range.is_empty())
                    {
                        effective
                            .date_ranges
                            .insert(filter.name().to_owned(), *range);
                    }
                }
            }
        }
        effective
    }

    /// Builds indicators for the effective filters.
    ///
    /// `option_label` resolves a select filter value to its display label;
    /// unresolved values fall back to the raw value.
    pub fn indicators(
        &self,
        active: &ActiveFilters,
        option_label: impl Fn(&TableFilter, &str) -> Option<String>,
    ) -> Vec<Indicator> {
        let effective = self.effective(active);
        let mut indicators = Vec::new();

        for filter in self.enabled_filters() {
            match filter.kind() {
                FilterKind::Select { .. } => {
                    if let Some(value) = effective.selects.get(filter.name()) {
                        let label = option_label(filter, value).unwrap_or_else(|| value.clone());
                        indicators.push(Indicator {
                            label: format!("{}: {label}", filter.label()),
                            filter: filter.name().to_owned(),
                            removal: IndicatorRemoval::Filter,
                        });
                    }
                }
                FilterKind::DateRange {
                    indicator_prefix, ..
                } => {
                    if let Some(range) = effective.date_ranges.get(filter.name()) {
                        indicators.extend(date_range_indicators(
                            filter.name(),
                            indicator_prefix,
                            range,
                        ));
                    }
                }
            }
        }

        indicators
    }
}
