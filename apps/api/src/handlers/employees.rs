use std::collections::BTreeMap;
use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;
use staffroll_domain::{EmployeeId, FormState};

use crate::dto::{
    BulkDeleteEmployeesRequest, BulkDeleteEmployeesResponse, DetailSectionResponse,
    EmployeeFormResponse, EmployeeListParams, EmployeeListResponse, EmployeeResponse,
    FormUpdateRequest, FormUpdateResponse, NotificationResponse, ResourceResponse,
    SaveEmployeeRequest, SelectOptionResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[cfg(test)]
mod tests;

pub async fn resource_handler(State(state): State<AppState>) -> Json<ResourceResponse> {
    Json(ResourceResponse {
        base_path: state.employee_service.base_path(),
        descriptor: state.employee_service.resource().clone(),
    })
}

pub async fn list_employees_handler(
    State(state): State<AppState>,
    Query(params): Query<EmployeeListParams>,
) -> ApiResult<Json<EmployeeListResponse>> {
    let listing = state
        .employee_service
        .list_employees(params.into_request()?)
        .await?;

    Ok(Json(EmployeeListResponse::from(listing)))
}

pub async fn create_form_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<EmployeeFormResponse>> {
    let service = &state.employee_service;
    let form = service.create_form().await?;

    Ok(Json(EmployeeFormResponse::new(
        format!("{}/create", service.base_path()),
        service.resource().form(),
        form,
    )))
}

pub async fn create_employee_handler(
    State(state): State<AppState>,
    Json(payload): Json<SaveEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    let record = state.employee_service.create_employee(&payload.state).await?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(record))))
}

pub async fn edit_form_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<EmployeeFormResponse>> {
    let employee_id = EmployeeId::from_str(employee_id.as_str())?;
    let service = &state.employee_service;
    let form = service.edit_form(employee_id).await?;

    Ok(Json(EmployeeFormResponse::new(
        service
            .resource()
            .edit_url(service.base_path().as_str(), employee_id.to_string().as_str()),
        service.resource().form(),
        form,
    )))
}

pub async fn update_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(payload): Json<SaveEmployeeRequest>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee_id = EmployeeId::from_str(employee_id.as_str())?;
    let record = state
        .employee_service
        .update_employee(employee_id, &payload.state)
        .await?;

    Ok(Json(EmployeeResponse::from(record)))
}

pub async fn view_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<Vec<DetailSectionResponse>>> {
    let employee_id = EmployeeId::from_str(employee_id.as_str())?;
    let sections = state
        .employee_service
        .view_employee(employee_id)
        .await?
        .into_iter()
        .map(DetailSectionResponse::from)
        .collect();

    Ok(Json(sections))
}

pub async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<NotificationResponse>> {
    let employee_id = EmployeeId::from_str(employee_id.as_str())?;
    let notification = state.employee_service.delete_employee(employee_id).await?;

    Ok(Json(NotificationResponse::from(notification)))
}

pub async fn bulk_delete_employees_handler(
    State(state): State<AppState>,
    Json(payload): Json<BulkDeleteEmployeesRequest>,
) -> ApiResult<Json<BulkDeleteEmployeesResponse>> {
    let employee_ids = payload
        .ids
        .iter()
        .map(|value| EmployeeId::from_str(value.as_str()))
        .collect::<Result<Vec<_>, _>>()?;
    let outcome = state
        .employee_service
        .delete_employees(employee_ids.as_slice())
        .await?;

    Ok(Json(BulkDeleteEmployeesResponse::from(outcome)))
}

pub async fn update_form_state_handler(
    State(state): State<AppState>,
    Json(payload): Json<FormUpdateRequest>,
) -> ApiResult<Json<FormUpdateResponse>> {
    let update = state
        .employee_service
        .update_form_state(payload.state, payload.field.as_str(), payload.value)
        .await?;

    Ok(Json(FormUpdateResponse::from(update)))
}

/// Query parameters carry the current values of the field's parents.
pub async fn field_options_handler(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Query(values): Query<BTreeMap<String, String>>,
) -> ApiResult<Json<Vec<SelectOptionResponse>>> {
    let form_state = FormState::from_values(
        values
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect(),
    );
    let options = state
        .employee_service
        .field_options(field.as_str(), &form_state)
        .await?
        .into_iter()
        .map(SelectOptionResponse::from)
        .collect();

    Ok(Json(options))
}
