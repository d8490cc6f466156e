use staffroll_core::AppResult;
use staffroll_domain::{
    BadgeColor, BulkAction, BulkActionGroup, DetailEntry, DetailSchema, DetailSection,
    EMPLOYEE_TEXT_MAX_LENGTH, EMPLOYEE_ZIP_CODE_MAX_LENGTH, FilterSchema, FiltersLayout, FormField,
    FormSchema, FormSection, GlobalSearchSchema, NavigationItem, Notification, OptionSource,
    PageKind, ResourceDescriptor, ResourcePage, ResourceSchemas, RowAction, SearchDetail,
    TableColumn, TableFilter, TableSchema,
};

/// Path prefix under which admin resources are mounted.
pub const ADMIN_PATH_PREFIX: &str = "/admin";

/// Title of the notification shown after deleting one employee.
pub const EMPLOYEE_DELETED_TITLE: &str = "Employee deleted";

/// Body of the notification shown after deleting one employee.
pub const EMPLOYEE_DELETED_BODY: &str = "The employee was deleted successfully.";

const DATE_DISPLAY_FORMAT: &str = "d/m/Y";

/// Builds the admin resource describing employees.
pub fn employee_resource() -> AppResult<ResourceDescriptor> {
    ResourceDescriptor::new(
        "employees",
        "Employee",
        "first_name",
        NavigationItem {
            label: "Employees".to_owned(),
            icon: "heroicon-o-user-group".to_owned(),
            group: "Employee Management".to_owned(),
            badge_color: BadgeColor::Warning,
        },
        ResourceSchemas {
            form: employee_form()?,
            table: employee_table()?,
            filters: employee_filters()?,
            infolist: employee_infolist()?,
            global_search: employee_global_search()?,
        },
        vec![
            page(PageKind::Index, "/", true),
            page(PageKind::Create, "/create", true),
            page(PageKind::View, "/{record}", false),
            page(PageKind::Edit, "/{record}/edit", true),
        ],
    )
}

fn page(kind: PageKind, path: &str, enabled: bool) -> ResourcePage {
    ResourcePage {
        kind,
        path: path.to_owned(),
        enabled,
    }
}

fn relationship(relation: &str) -> OptionSource {
    OptionSource::Relationship {
        relation: relation.to_owned(),
        title_attribute: "name".to_owned(),
    }
}

fn dependent(relation: &str, parent_field: &str) -> OptionSource {
    OptionSource::Dependent {
        relation: relation.to_owned(),
        title_attribute: "name".to_owned(),
        parent_field: parent_field.to_owned(),
    }
}

fn employee_form() -> AppResult<FormSchema> {
    let relationships = FormSection::new(
        "Relationships",
        None,
        2,
        vec![
            FormField::select("country_id", relationship("country"), true)?
                .required()
                .live_resetting(&["state_id", "city_id"]),
            FormField::select("state_id", dependent("state", "country_id"), true)?
                .required()
                .live_resetting(&["city_id"]),
            FormField::select("city_id", dependent("city", "state_id"), false)?
                .required()
                .live(),
            FormField::select("department_id", relationship("department"), true)?.required(),
        ],
    )?;

    let user_name = FormSection::new(
        "User Name",
        Some("Put the user name details here."),
        3,
        vec![
            FormField::text_input("first_name", Some(EMPLOYEE_TEXT_MAX_LENGTH))?.required(),
            FormField::text_input("middle_name", Some(EMPLOYEE_TEXT_MAX_LENGTH))?,
            FormField::text_input("last_name", Some(EMPLOYEE_TEXT_MAX_LENGTH))?.required(),
        ],
    )?;

    let address = FormSection::new(
        "Address",
        Some("Put the address details here."),
        2,
        vec![
            FormField::text_input("address", Some(EMPLOYEE_TEXT_MAX_LENGTH))?.required(),
            FormField::text_input("zip_code", Some(EMPLOYEE_ZIP_CODE_MAX_LENGTH))?.required(),
        ],
    )?;

    let dates = FormSection::new(
        "Dates",
        None,
        2,
        vec![
            FormField::date_picker("date_of_birth", DATE_DISPLAY_FORMAT)?.required(),
            FormField::date_picker("date_hired", DATE_DISPLAY_FORMAT)?.required(),
        ],
    )?;

    FormSchema::new(3, vec![relationships, user_name, address, dates])
}

fn employee_table() -> AppResult<TableSchema> {
    TableSchema::new(
        vec![
            TableColumn::new("country.name")?.sortable(),
            TableColumn::new("state.name")?.sortable(),
            TableColumn::new("city.name")?.sortable(),
            TableColumn::new("department.name")?.sortable(),
            TableColumn::new("first_name")?.searchable(),
            TableColumn::new("last_name")?.searchable(),
            TableColumn::new("middle_name")?
                .searchable()
                .toggleable(true),
            TableColumn::new("address")?.searchable().toggleable(true),
            TableColumn::new("zip_code")?.searchable().toggleable(true),
            TableColumn::new("date_of_birth")?
                .date()
                .sortable()
                .toggleable(true),
            TableColumn::new("date_hired")?
                .date()
                .sortable()
                .toggleable(true),
            TableColumn::new("created_at")?
                .date_time()
                .sortable()
                .toggleable(true),
            TableColumn::new("updated_at")?
                .date_time()
                .sortable()
                .toggleable(true),
        ],
        vec![
            RowAction::View,
            RowAction::Edit,
            RowAction::Delete {
                success_notification: Notification::success(
                    EMPLOYEE_DELETED_TITLE,
                    Some(EMPLOYEE_DELETED_BODY),
                ),
            },
        ],
        vec![BulkActionGroup::new(vec![BulkAction::Delete])?],
    )
}

fn employee_filters() -> AppResult<FilterSchema> {
    FilterSchema::new(
        FiltersLayout::AboveContent,
        3,
        vec![
            TableFilter::select("department_id", "Department", "department", true)?,
            TableFilter::select("country_id", "Country", "country", true)?.disabled(),
            TableFilter::select("state_id", "State", "state", true)?.disabled(),
            TableFilter::select("city_id", "City", "city", true)?.disabled(),
            TableFilter::date_range("created_at", "Created")?,
        ],
    )
}

fn employee_infolist() -> AppResult<DetailSchema> {
    let entries = |paths: &[&str]| {
        paths
            .iter()
            .map(|path| DetailEntry::new(path))
            .collect::<AppResult<Vec<_>>>()
    };

    DetailSchema::new(vec![
        DetailSection::new(
            "Relationship",
            2,
            entries(&["country.name", "state.name", "city.name", "department.name"])?,
        )?,
        DetailSection::new(
            "Name",
            3,
            entries(&["first_name", "middle_name", "last_name"])?,
        )?,
        DetailSection::new("Address", 2, entries(&["address", "zip_code"])?)?,
    ])
}

fn employee_global_search() -> AppResult<GlobalSearchSchema> {
    GlobalSearchSchema::new(
        &["first_name", "last_name"],
        &["first_name", "middle_name", "last_name", "country.name"],
        vec![
            SearchDetail::new("Country", "country.name")?,
            SearchDetail::new("State", "state.name")?,
        ],
        &["country", "state"],
        50,
    )
}

#[cfg(test)]
mod tests {
    use staffroll_domain::{
        BadgeColor, FilterKind, FiltersLayout, FormFieldKind, OptionSource, PageKind, TableColumn,
    };

    use super::employee_resource;

    #[test]
    fn descriptor_builds() {
        assert!(employee_resource().is_ok());
    }

    #[test]
    fn form_sections_match_layout() {
        let resource = employee_resource().unwrap_or_else(|_| unreachable!());
        let layout: Vec<(&str, u8, usize)> = resource
            .form()
            .sections()
            .iter()
            .map(|section| (section.heading(), section.columns(), section.fields().len()))
            .collect();

        assert_eq!(resource.form().columns(), 3);
        assert_eq!(
            layout,
            vec![
                ("Relationships", 2, 4),
                ("User Name", 3, 3),
                ("Address", 2, 2),
                ("Dates", 2, 2),
            ]
        );
        assert_eq!(
            resource.form().sections()[1].description(),
            Some("Put the user name details here.")
        );
    }

    #[test]
    fn location_selects_cascade() {
        let resource = employee_resource().unwrap_or_else(|_| unreachable!());
        let form = resource.form();

        let country = form.field("country_id").unwrap_or_else(|| unreachable!());
        assert!(country.is_live());
        assert_eq!(country.resets(), ["state_id".to_owned(), "city_id".to_owned()]);

        let state = form.field("state_id").unwrap_or_else(|| unreachable!());
        assert_eq!(state.resets(), ["city_id".to_owned()]);
        assert_eq!(
            state.option_source().and_then(OptionSource::parent_field),
            Some("country_id")
        );

        let city = form.field("city_id").unwrap_or_else(|| unreachable!());
        assert!(matches!(
            city.kind(),
            FormFieldKind::Select { preload: false, .. }
        ));
        assert!(city.resets().is_empty());
    }

    #[test]
    fn middle_name_is_the_only_optional_field() {
        let resource = employee_resource().unwrap_or_else(|_| unreachable!());
        let optional: Vec<&str> = resource
            .form()
            .fields()
            .filter(|field| !field.is_required())
            .map(|field| field.name())
            .collect();
        assert_eq!(optional, vec!["middle_name"]);
    }

    #[test]
    fn table_columns_default_visibility() {
        let resource = employee_resource().unwrap_or_else(|_| unreachable!());
        let visible: Vec<String> = resource
            .table()
            .visible_columns(&[])
            .into_iter()
            .map(TableColumn::key)
            .collect();
        assert_eq!(
            visible,
            vec![
                "country.name",
                "state.name",
                "city.name",
                "department.name",
                "first_name",
                "last_name",
            ]
        );
        assert_eq!(resource.table().columns().len(), 13);
        assert!(resource.table().allows_bulk_delete());
    }

    #[test]
    fn only_department_and_created_filters_are_enabled() {
        let resource = employee_resource().unwrap_or_else(|_| unreachable!());
        let filters = resource.filters();
        let enabled: Vec<&str> = filters.enabled_filters().map(|filter| filter.name()).collect();

        assert_eq!(filters.layout(), FiltersLayout::AboveContent);
        assert_eq!(filters.form_columns(), 3);
        assert_eq!(enabled, vec!["department_id", "created_at"]);
        assert!(matches!(
            filters.filters()[4].kind(),
            FilterKind::DateRange { column_span: 2, columns: 2, .. }
        ));
    }

    #[test]
    fn view_page_is_declared_but_disabled() {
        let resource = employee_resource().unwrap_or_else(|_| unreachable!());
        assert!(!resource.is_page_enabled(PageKind::View));
        assert!(resource.is_page_enabled(PageKind::Edit));
        assert_eq!(resource.navigation().badge_color, BadgeColor::Warning);
        assert_eq!(resource.global_search().limit(), 50);
    }
}
