use axum::Router;
use axum::routing::{MethodRouter, delete, get, post};
use staffroll_core::AppError;
use staffroll_domain::{PageKind, ResourceDescriptor};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let base_path = app_state.employee_service.base_path();
    let employee_routes = employee_routes(
        app_state.employee_service.resource(),
        base_path.as_str(),
    );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/admin/search", get(handlers::panel::global_search_handler))
        .route("/admin/navigation", get(handlers::panel::navigation_handler))
        .merge(employee_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}

/// Mounts the always-on resource endpoints plus every enabled page.
fn employee_routes(resource: &ResourceDescriptor, base_path: &str) -> Router<AppState> {
    let mut router = Router::new()
        .route(
            format!("{base_path}/resource").as_str(),
            get(handlers::employees::resource_handler),
        )
        .route(
            format!("{base_path}/bulk-delete").as_str(),
            post(handlers::employees::bulk_delete_employees_handler),
        )
        .route(
            format!("{base_path}/form/update").as_str(),
            post(handlers::employees::update_form_state_handler),
        )
        .route(
            format!("{base_path}/options/{{field}}").as_str(),
            get(handlers::employees::field_options_handler),
        )
        .route(
            format!("{base_path}/{{record}}").as_str(),
            delete(handlers::employees::delete_employee_handler),
        );

    for page in resource.pages().iter().filter(|page| page.enabled) {
        let path = format!("{base_path}{}", page.path);
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        router = router.route(path, page_route(page.kind));
    }

    router
}

fn page_route(kind: PageKind) -> MethodRouter<AppState> {
    match kind {
        PageKind::Index => get(handlers::employees::list_employees_handler),
        PageKind::Create => get(handlers::employees::create_form_handler)
            .post(handlers::employees::create_employee_handler),
        PageKind::View => get(handlers::employees::view_employee_handler),
        PageKind::Edit => get(handlers::employees::edit_form_handler)
            .post(handlers::employees::update_employee_handler),
    }
}
