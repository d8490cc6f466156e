use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use staffroll_core::{AppError, AppResult};

use crate::{
    AttributePath, AttributeSource, AttributeValue, Notification, format_date_time,
    format_short_date,
};

/// How a column renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnFormat {
    /// Value as-is.
    Text,
    /// Date only.
    Date,
    /// Date and time.
    DateTime,
}

/// Whether a column can be hidden by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnToggle {
    /// Always shown.
    Fixed,
    /// User-toggleable.
    Toggleable {
        /// Whether the column starts hidden.
        hidden_by_default: bool,
    },
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::Validation(format!(
                "unknown sort direction '{value}'"
            ))),
        }
    }
}

/// List view column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    path: AttributePath,
    label: String,
    format: ColumnFormat,
    sortable: bool,
    searchable: bool,
    toggle: ColumnToggle,
}

impl TableColumn {
    /// Creates a fixed, plain-text column for a dotted attribute path.
    pub fn new(path: &str) -> AppResult<Self> {
        let path = AttributePath::from_str(path)?;
        let label = path.default_label();

        Ok(Self {
            path,
            label,
            format: ColumnFormat::Text,
            sortable: false,
            searchable: false,
            toggle: ColumnToggle::Fixed,
        })
    }

    /// Renders the value as a date.
    #[must_use]
    pub fn date(mut self) -> Self {
        self.format = ColumnFormat::Date;
        self
    }

    /// Renders the value as a date-time.
    #[must_use]
    pub fn date_time(mut self) -> Self {
        self.format = ColumnFormat::DateTime;
        self
    }

    /// Allows sorting on this column.
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Includes this column in free-text search.
    #[must_use]
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Makes the column user-toggleable.
    #[must_use]
    pub fn toggleable(mut self, hidden_by_default: bool) -> Self {
        self.toggle = ColumnToggle::Toggleable { hidden_by_default };
        self
    }

    /// Returns the attribute path.
    #[must_use]
    pub fn path(&self) -> &AttributePath {
        &self.path
    }

    /// Returns the stable column key (the dotted path).
    #[must_use]
    pub fn key(&self) -> String {
        self.path.to_string()
    }

    /// Returns the header label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the render format.
    #[must_use]
    pub fn format(&self) -> ColumnFormat {
        self.format
    }

    /// Returns whether the column can be sorted.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Returns whether the column participates in search.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Returns the toggle behavior.
    #[must_use]
    pub fn toggle(&self) -> ColumnToggle {
        self.toggle
    }

    /// Returns whether the column shows when nothing is toggled explicitly.
    #[must_use]
    pub fn is_visible_by_default(&self) -> bool {
        !matches!(
            self.toggle,
            ColumnToggle::Toggleable {
                hidden_by_default: true
            }
        )
    }

    /// Renders one cell.
    #[must_use]
    pub fn render(&self, record: &impl AttributeSource) -> Option<String> {
        match (record.attribute(&self.path), self.format) {
            (AttributeValue::Empty, _) => None,
            (AttributeValue::Date(date), _) => Some(format_short_date(date)),
            (AttributeValue::DateTime(value), ColumnFormat::Date) => {
                Some(format_short_date(value.date_naive()))
            }
            (AttributeValue::DateTime(value), _) => Some(format_date_time(value)),
            (AttributeValue::Text(text), _) => Some(text),
        }
    }
}

/// Action offered on each table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowAction {
    /// Open the read-only view.
    View,
    /// Open the edit form.
    Edit,
    /// Delete the record.
    Delete {
        /// Notification shown after a successful delete.
        success_notification: Notification,
    },
}

/// Action applied to selected rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BulkAction {
    /// Delete every selected record.
    Delete,
}

/// Named menu of bulk actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkActionGroup {
    actions: Vec<BulkAction>,
}

impl BulkActionGroup {
    /// Creates a validated group.
    pub fn new(actions: Vec<BulkAction>) -> AppResult<Self> {
        if actions.is_empty() {
            return Err(AppError::Validation(
                "bulk action groups must include at least one action".to_owned(),
            ));
        }

        Ok(Self { actions })
    }

    /// Returns the grouped actions.
    #[must_use]
    pub fn actions(&self) -> &[BulkAction] {
        &self.actions
    }
}

/// List view definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    columns: Vec<TableColumn>,
    actions: Vec<RowAction>,
    bulk_actions: Vec<BulkActionGroup>,
}

impl TableSchema {
    /// Creates a validated table schema.
    pub fn new(
        columns: Vec<TableColumn>,
        actions: Vec<RowAction>,
        bulk_actions: Vec<BulkActionGroup>,
    ) -> AppResult<Self> {
        if columns.is_empty() {
            return Err(AppError::Validation(
                "tables must include at least one column".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key()) {
                return Err(AppError::Validation(format!(
                    "duplicate column '{}' in table",
                    column.key()
                )));
            }
        }

        Ok(Self {
            columns,
            actions,
            bulk_actions,
        })
    }

    /// Returns every column in display order.
    #[must_use]
    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Returns row actions.
    #[must_use]
    pub fn actions(&self) -> &[RowAction] {
        &self.actions
    }

    /// Returns bulk action groups.
    #[must_use]
    pub fn bulk_actions(&self) -> &[BulkActionGroup] {
        &self.bulk_actions
    }

    /// Looks up a column by key.
    #[must_use]
    pub fn column(&self, key: &str) -> Option<&TableColumn> {
        self.columns.iter().find(|column| column.key() == key)
    }

    /// Returns the columns to render given the keys the user toggled on.
    ///
    /// Unknown keys and keys of fixed columns are ignored.
    #[must_use]
    pub fn visible_columns(&self, toggled_on: &[String]) -> Vec<&TableColumn> {
        self.columns
            .iter()
            .filter(|column| {
                column.is_visible_by_default()
                    || toggled_on.iter().any(|key| *key == column.key())
            })
            .collect()
    }

    /// Returns the success notification configured on the delete action.
    #[must_use]
    pub fn delete_notification(&self) -> Option<&Notification> {
        self.actions.iter().find_map(|action| match action {
            RowAction::Delete {
                success_notification,
            } => Some(success_notification),
            _ => None,
        })
    }

    /// Returns whether bulk delete is offered.
    #[must_use]
    pub fn allows_bulk_delete(&self) -> bool {
        self.bulk_actions
            .iter()
            .flat_map(BulkActionGroup::actions)
            .any(|action| *action == BulkAction::Delete)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::{RowAction, TableColumn, TableSchema};
    use crate::{AttributePath, AttributeSource, AttributeValue, Notification};

    struct Row;

    impl AttributeSource for Row {
        fn attribute(&self, path: &AttributePath) -> AttributeValue {
            match path.attribute() {
                "born" => AttributeValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap_or_default()),
                "created_at" => AttributeValue::DateTime(
                    Utc.with_ymd_and_hms(2024, 1, 5, 8, 30, 0)
                        .single()
                        .unwrap_or_default(),
                ),
                "name" => AttributeValue::Text("Ada".to_owned()),
                _ => AttributeValue::Empty,
            }
        }
    }

    fn column(path: &str) -> TableColumn {
        TableColumn::new(path).unwrap_or_else(|_| unreachable!())
    }

    fn table() -> TableSchema {
        TableSchema::new(
            vec![
                column("name").searchable(),
                column("born").date().toggleable(true),
                column("created_at").date_time().toggleable(false),
            ],
            vec![RowAction::Delete {
                success_notification: Notification::success("Deleted", None),
            }],
            Vec::new(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn hidden_columns_appear_only_when_toggled() {
        let table = table();
        let default_keys: Vec<String> = table
            .visible_columns(&[])
            .into_iter()
            .map(TableColumn::key)
            .collect();
        assert_eq!(default_keys, vec!["name", "created_at"]);

        let toggled = table.visible_columns(&["born".to_owned()]);
        assert_eq!(toggled.len(), 3);
    }

    #[test]
    fn renders_cells_by_format() {
        let table = table();
        let rendered: Vec<Option<String>> = table
            .columns()
            .iter()
            .map(|column| column.render(&Row))
            .collect();
        assert_eq!(
            rendered,
            vec![
                Some("Ada".to_owned()),
                Some("Jan 5, 2024".to_owned()),
                Some("Jan 5, 2024 08:30:00".to_owned()),
            ]
        );
    }

    #[test]
    fn rejects_duplicate_columns() {
        let result = TableSchema::new(vec![column("name"), column("name")], Vec::new(), Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn exposes_delete_notification() {
        let table = table();
        assert_eq!(
            table.delete_notification().map(Notification::title),
            Some("Deleted")
        );
        assert!(!table.allows_bulk_delete());
    }
}
