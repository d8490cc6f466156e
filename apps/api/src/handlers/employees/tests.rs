use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api_router::build_router;
use crate::api_services::build_app_state;
use crate::dev_seed;

async fn seeded_router() -> Router {
    let state = build_app_state(None).unwrap_or_else(|_| unreachable!());
    assert!(dev_seed::run(state.reference_data.as_ref()).await.is_ok());
    build_router(state, "http://localhost:3000").unwrap_or_else(|_| unreachable!())
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap_or_else(|_| unreachable!());

    let response = router
        .clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|_| unreachable!());
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let payload = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, payload)
}

fn option_value(options: &Value, label: &str) -> String {
    options
        .as_array()
        .and_then(|options| {
            options
                .iter()
                .find(|option| option["label"] == label)
                .and_then(|option| option["value"].as_str())
        })
        .unwrap_or_default()
        .to_owned()
}

/// Walks the cascading selects the way the panel does and returns a valid state.
async fn grace_state(router: &Router) -> Value {
    let (_, form) = send(router, Method::GET, "/admin/employees/create", None).await;
    let country_id = option_value(&form["options"]["country_id"], "United States");
    let department_id = option_value(&form["options"]["department_id"], "Engineering");

    let (_, states) = send(
        router,
        Method::GET,
        format!("/admin/employees/options/state_id?country_id={country_id}").as_str(),
        None,
    )
    .await;
    let state_id = option_value(&states, "California");

    let (_, cities) = send(
        router,
        Method::GET,
        format!("/admin/employees/options/city_id?state_id={state_id}").as_str(),
        None,
    )
    .await;
    let city_id = option_value(&cities, "Los Angeles");

    json!({
        "country_id": country_id,
        "state_id": state_id,
        "city_id": city_id,
        "department_id": department_id,
        "first_name": "Grace",
        "middle_name": null,
        "last_name": "Hopper",
        "address": "1 Navy Way",
        "zip_code": "90001",
        "date_of_birth": "1906-12-09",
        "date_hired": "1943-07-01",
    })
}

async fn create_grace(router: &Router) -> Value {
    let state = grace_state(router).await;
    let (status, employee) = send(
        router,
        Method::POST,
        "/admin/employees/create",
        Some(json!({ "state": state })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    employee
}

#[tokio::test]
async fn health_and_resource_are_served() {
    let router = seeded_router().await;

    let (status, health) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    let (status, resource) = send(&router, Method::GET, "/admin/employees/resource", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resource["base_path"], "/admin/employees");
    assert_eq!(resource["descriptor"]["slug"], "employees");
}

#[tokio::test]
async fn create_form_preloads_countries_but_not_dependent_options() {
    let router = seeded_router().await;

    let (status, form) = send(&router, Method::GET, "/admin/employees/create", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["action"], "/admin/employees/create");
    assert_eq!(form["options"]["country_id"][0]["label"], "Canada");
    assert_eq!(form["options"]["state_id"], json!([]));
    assert_eq!(form["options"]["city_id"], json!([]));
    assert_eq!(form["state"]["first_name"], Value::Null);
}

#[tokio::test]
async fn created_employee_shows_up_in_list_and_edit_form() {
    let router = seeded_router().await;
    let employee = create_grace(&router).await;
    let employee_id = employee["id"].as_str().unwrap_or_default().to_owned();
    assert_eq!(employee["department_name"], "Engineering");

    let (status, listing) = send(&router, Method::GET, "/admin/employees?search=hop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["columns"].as_array().map(Vec::len), Some(6));
    assert_eq!(listing["rows"][0]["cells"][4], "Grace");

    let (status, form) = send(
        &router,
        Method::GET,
        format!("/admin/employees/{employee_id}/edit").as_str(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        form["action"],
        format!("/admin/employees/{employee_id}/edit")
    );
    assert_eq!(form["state"]["date_hired"], "1943-07-01");
    assert_eq!(form["options"]["city_id"][0]["label"], "Los Angeles");
}

#[tokio::test]
async fn invalid_submission_reports_field_errors() {
    let router = seeded_router().await;
    let mut state = grace_state(&router).await;
    state["first_name"] = json!("");
    state["zip_code"] = json!("12345678901");

    let (status, body) = send(
        &router,
        Method::POST,
        "/admin/employees/create",
        Some(json!({ "state": state })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["first_name"].is_array());
    assert!(body["errors"]["zip_code"].is_array());
    assert!(body["errors"].get("last_name").is_none());
}

#[tokio::test]
async fn update_edits_the_record() {
    let router = seeded_router().await;
    let employee = create_grace(&router).await;
    let employee_id = employee["id"].as_str().unwrap_or_default().to_owned();

    let mut state = grace_state(&router).await;
    state["middle_name"] = json!("Brewster");
    let (status, updated) = send(
        &router,
        Method::POST,
        format!("/admin/employees/{employee_id}/edit").as_str(),
        Some(json!({ "state": state })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["middle_name"], "Brewster");
    assert_eq!(updated["created_at"], employee["created_at"]);
}

#[tokio::test]
async fn view_page_is_not_routed_while_disabled() {
    let router = seeded_router().await;
    let employee = create_grace(&router).await;
    let employee_id = employee["id"].as_str().unwrap_or_default().to_owned();

    let (status, _) = send(
        &router,
        Method::GET,
        format!("/admin/employees/{employee_id}").as_str(),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn delete_returns_notification_then_not_found() {
    let router = seeded_router().await;
    let employee = create_grace(&router).await;
    let uri = format!(
        "/admin/employees/{}",
        employee["id"].as_str().unwrap_or_default()
    );

    let (status, notification) = send(&router, Method::DELETE, uri.as_str(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notification["status"], "success");
    assert_eq!(notification["title"], "Employee deleted");
    assert_eq!(
        notification["body"],
        "The employee was deleted successfully."
    );

    let (status, _) = send(&router, Method::DELETE, uri.as_str(), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listing) = send(&router, Method::GET, "/admin/employees", None).await;
    assert_eq!(listing["total"], 0);
    assert_eq!(listing["rows"], json!([]));
}

#[tokio::test]
async fn bulk_delete_counts_and_rejects_bad_ids() {
    let router = seeded_router().await;
    let first = create_grace(&router).await;
    let second = create_grace(&router).await;
    let third = create_grace(&router).await;

    let (status, outcome) = send(
        &router,
        Method::POST,
        "/admin/employees/bulk-delete",
        Some(json!({ "ids": [first["id"], second["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["deleted"], 2);

    let (_, listing) = send(&router, Method::GET, "/admin/employees", None).await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["rows"][0]["id"], third["id"]);

    let (status, _) = send(
        &router,
        Method::POST,
        "/admin/employees/bulk-delete",
        Some(json!({ "ids": ["not-a-uuid"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_page_is_a_bad_request() {
    let router = seeded_router().await;

    let (status, body) = send(
        &router,
        Method::GET,
        "/admin/employees?page=18446744073709551615",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn changing_country_resets_state_and_city() {
    let router = seeded_router().await;
    let state = grace_state(&router).await;
    let (_, form) = send(&router, Method::GET, "/admin/employees/create", None).await;
    let canada = option_value(&form["options"]["country_id"], "Canada");

    let (status, update) = send(
        &router,
        Method::POST,
        "/admin/employees/form/update",
        Some(json!({ "state": state, "field": "country_id", "value": canada })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(update["cleared"], json!(["state_id", "city_id"]));
    assert_eq!(update["state"]["state_id"], Value::Null);
    assert_eq!(update["state"]["city_id"], Value::Null);
    assert_eq!(update["state"]["first_name"], "Grace");
    let states: Vec<&str> = update["options"]["state_id"]
        .as_array()
        .map(|options| {
            options
                .iter()
                .filter_map(|option| option["label"].as_str())
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(states, vec!["Ontario", "Quebec"]);
    assert_eq!(update["options"]["city_id"], json!([]));
}

#[tokio::test]
async fn dependent_options_are_empty_without_parent() {
    let router = seeded_router().await;

    let (status, options) = send(&router, Method::GET, "/admin/employees/options/city_id", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(options, json!([]));

    let (status, _) = send(&router, Method::GET, "/admin/employees/options/first_name", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn global_search_and_navigation_badge_follow_records() {
    let router = seeded_router().await;
    let employee = create_grace(&router).await;

    let (status, results) = send(&router, Method::GET, "/admin/search?q=grace%20united", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results[0]["title"], "Grace Hopper");
    assert_eq!(
        results[0]["details"],
        json!([
            { "label": "Country", "value": "United States" },
            { "label": "State", "value": "California" },
        ])
    );
    assert_eq!(
        results[0]["url"],
        format!(
            "/admin/employees/{}/edit",
            employee["id"].as_str().unwrap_or_default()
        )
    );

    let (_, empty) = send(&router, Method::GET, "/admin/search?q=", None).await;
    assert_eq!(empty, json!([]));

    let (status, navigation) = send(&router, Method::GET, "/admin/navigation", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(navigation["group"], "Employee Management");
    assert_eq!(navigation["badge"]["value"], "1");
    assert_eq!(navigation["badge"]["color"], "warning");
}
