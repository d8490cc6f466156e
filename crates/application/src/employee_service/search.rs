use staffroll_core::AppResult;
use staffroll_domain::{GlobalSearchResult, GlobalSearchSchema, NavigationBadge};
use tracing::debug;

use crate::{EmployeeColumn, EmployeeSearchQuery};

use super::EmployeeService;

impl EmployeeService {
    /// Searches employees across the configured attributes.
    ///
    /// Blank queries return no results.
    pub async fn global_search(&self, query: &str) -> AppResult<Vec<GlobalSearchResult>> {
        let schema = self.resource.global_search();
        let terms = GlobalSearchSchema::terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let records = self
            .employees
            .search_employees(&EmployeeSearchQuery {
                terms: terms.clone(),
                columns: schema
                    .searchable_attributes()
                    .iter()
                    .filter_map(EmployeeColumn::from_path)
                    .collect(),
                limit: schema.limit(),
            })
            .await?;

        let base_path = self.base_path();
        let results: Vec<GlobalSearchResult> = records
            .iter()
            .filter(|record| schema.matches(*record, &terms))
            .take(schema.limit())
            .map(|record| {
                let url = self
                    .resource
                    .edit_url(&base_path, &record.employee().id().to_string());
                schema.result_for(record, url)
            })
            .collect();

        debug!(terms = terms.len(), results = results.len(), "employee global search");
        Ok(results)
    }

    /// Returns the navigation badge showing the employee count.
    pub async fn navigation_badge(&self) -> AppResult<NavigationBadge> {
        let count = self.employees.count_employees().await?;
        Ok(self.resource.navigation().count_badge(count))
    }
}
