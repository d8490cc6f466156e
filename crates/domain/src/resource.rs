use serde::{Deserialize, Serialize};
use staffroll_core::{AppError, AppResult, NonEmptyString};

use crate::{DetailSchema, FilterSchema, FormSchema, GlobalSearchSchema, NavigationItem, TableSchema};

/// CRUD page kinds a resource can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Paginated list.
    Index,
    /// Create form.
    Create,
    /// Read-only view.
    View,
    /// Edit form.
    Edit,
}

/// Route of one CRUD page, relative to the resource base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePage {
    /// Page kind.
    pub kind: PageKind,
    /// Relative route; `{record}` stands for the record id.
    pub path: String,
    /// Whether the page is routed.
    pub enabled: bool,
}

/// Declarative bundle describing how the admin panel presents one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    slug: NonEmptyString,
    model_label: NonEmptyString,
    record_title_attribute: String,
    navigation: NavigationItem,
    form: FormSchema,
    table: TableSchema,
    filters: FilterSchema,
    infolist: DetailSchema,
    global_search: GlobalSearchSchema,
    pages: Vec<ResourcePage>,
}

/// Schemas assembled into a [`ResourceDescriptor`].
#[derive(Debug, Clone)]
pub struct ResourceSchemas {
    /// Create/edit form.
    pub form: FormSchema,
    /// List table.
    pub table: TableSchema,
    /// List filters.
    pub filters: FilterSchema,
    /// View page layout.
    pub infolist: DetailSchema,
    /// Global search adapter.
    pub global_search: GlobalSearchSchema,
}

impl ResourceDescriptor {
    /// Creates a validated resource descriptor.
    pub fn new(
        slug: impl Into<String>,
        model_label: impl Into<String>,
        record_title_attribute: impl Into<String>,
        navigation: NavigationItem,
        schemas: ResourceSchemas,
        pages: Vec<ResourcePage>,
    ) -> AppResult<Self> {
        for required in [PageKind::Index, PageKind::Create, PageKind::Edit] {
            if !pages.iter().any(|page| page.kind == required && page.enabled) {
                return Err(AppError::Validation(format!(
                    "resource must route an enabled {required:?} page"
                )));
            }
        }

        Ok(Self {
            slug: NonEmptyString::new(slug)?,
            model_label: NonEmptyString::new(model_label)?,
            record_title_attribute: record_title_attribute.into(),
            navigation,
            form: schemas.form,
            table: schemas.table,
            filters: schemas.filters,
            infolist: schemas.infolist,
            global_search: schemas.global_search,
            pages,
        })
    }

    /// Returns the URL slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    /// Returns the singular model label.
    #[must_use]
    pub fn model_label(&self) -> &str {
        self.model_label.as_str()
    }

    /// Returns the attribute used as record title.
    #[must_use]
    pub fn record_title_attribute(&self) -> &str {
        self.record_title_attribute.as_str()
    }

    /// Returns the navigation entry.
    #[must_use]
    pub fn navigation(&self) -> &NavigationItem {
        &self.navigation
    }

    /// Returns the form schema.
    #[must_use]
    pub fn form(&self) -> &FormSchema {
        &self.form
    }

    /// Returns the table schema.
    #[must_use]
    pub fn table(&self) -> &TableSchema {
        &self.table
    }

    /// Returns the filter schema.
    #[must_use]
    pub fn filters(&self) -> &FilterSchema {
        &self.filters
    }

    /// Returns the infolist schema.
    #[must_use]
    pub fn infolist(&self) -> &DetailSchema {
        &self.infolist
    }

    /// Returns the global search schema.
    #[must_use]
    pub fn global_search(&self) -> &GlobalSearchSchema {
        &self.global_search
    }

    /// Returns every page, disabled ones included.
    #[must_use]
    pub fn pages(&self) -> &[ResourcePage] {
        &self.pages
    }

    /// Returns whether a page kind is routed.
    #[must_use]
    pub fn is_page_enabled(&self, kind: PageKind) -> bool {
        self.pages
            .iter()
            .any(|page| page.kind == kind && page.enabled)
    }

    /// Returns the URL of a record's edit page under `base_path`.
    #[must_use]
    pub fn edit_url(&self, base_path: &str, record_id: &str) -> String {
        let relative = self
            .pages
            .iter()
            .find(|page| page.kind == PageKind::Edit)
            .map_or("/{record}/edit", |page| page.path.as_str());
        format!("{base_path}{}", relative.replace("{record}", record_id))
    }
}
