use axum::Json;
use axum::extract::{Query, State};

use crate::dto::{
    GlobalSearchParams, GlobalSearchResultResponse, NavigationBadgeResponse, NavigationResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn global_search_handler(
    State(state): State<AppState>,
    Query(params): Query<GlobalSearchParams>,
) -> ApiResult<Json<Vec<GlobalSearchResultResponse>>> {
    let results = state
        .employee_service
        .global_search(params.q.as_deref().unwrap_or_default())
        .await?
        .into_iter()
        .map(GlobalSearchResultResponse::from)
        .collect();

    Ok(Json(results))
}

pub async fn navigation_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<NavigationResponse>> {
    let badge = state.employee_service.navigation_badge().await?;
    let navigation = state.employee_service.resource().navigation();

    Ok(Json(NavigationResponse {
        label: navigation.label.clone(),
        icon: navigation.icon.clone(),
        group: navigation.group.clone(),
        url: state.employee_service.base_path(),
        badge: NavigationBadgeResponse {
            value: badge.value,
            color: badge.color.into(),
        },
    }))
}
