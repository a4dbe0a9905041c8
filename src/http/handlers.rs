//! Subscription handlers for the REST API

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::domain::PaginationInfo;
use crate::http::dto::{
    CostQuery, ListQuery, SubscriptionRequest, SubscriptionResponse, SubscriptionUpdateRequest,
};
use crate::http::error::ApiError;
use crate::http::state::AppState;

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::warn!(error = %rejection, "invalid request body");
        ApiError::BadRequest("invalid request body".to_string())
    })
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query.map(|Query(value)| value).map_err(|rejection| {
        tracing::warn!(error = %rejection, "invalid query parameters");
        ApiError::BadRequest("Invalid query parameters".to_string())
    })
}

/// Path id: unparseable is a 400, non-positive a 422
fn subscription_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = path.map_err(|rejection| {
        tracing::warn!(error = %rejection, "invalid subscription id");
        ApiError::BadRequest("invalid request body".to_string())
    })?;

    if id < 1 {
        tracing::warn!(id, "non-positive subscription id");
        return Err(ApiError::Validation(
            "Invalid id: must be a positive integer".to_string(),
        ));
    }
    Ok(id)
}

fn pagination_headers(info: &PaginationInfo) -> HeaderMap {
    let flag = |value: bool| HeaderValue::from_static(if value { "true" } else { "false" });

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static("x-page"), HeaderValue::from(info.page));
    headers.insert(
        HeaderName::from_static("x-page-size"),
        HeaderValue::from(info.page_size),
    );
    headers.insert(
        HeaderName::from_static("x-total-count"),
        HeaderValue::from(info.total_count),
    );
    headers.insert(
        HeaderName::from_static("x-total-pages"),
        HeaderValue::from(info.total_pages),
    );
    headers.insert(
        HeaderName::from_static("x-has-next-page"),
        flag(info.has_next_page()),
    );
    headers.insert(
        HeaderName::from_static("x-has-prev-page"),
        flag(info.has_prev_page()),
    );
    headers
}

/// POST /api/v1/subscription/create
pub async fn create_subscription(
    State(state): State<AppState>,
    body: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    let new = json_body(body)?.into_new_subscription()?;
    let created = state.subscriptions.create(new).await?;

    tracing::info!(id = created.id, "subscription created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /api/v1/subscription/list
pub async fn list_subscriptions(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<(HeaderMap, Json<Vec<SubscriptionResponse>>), ApiError> {
    let criteria = query_params(query)?.into_criteria()?;
    let list = state.subscriptions.list(&criteria).await?;

    let headers = pagination_headers(&list.info);
    let body = list.data.into_iter().map(SubscriptionResponse::from).collect();
    Ok((headers, Json(body)))
}

/// GET /api/v1/subscription/cost
pub async fn subscription_cost(
    State(state): State<AppState>,
    query: Result<Query<CostQuery>, QueryRejection>,
) -> Result<Json<i64>, ApiError> {
    let filter = query_params(query)?.into_filter()?;
    let cost = state.subscriptions.get_cost(&filter).await?;
    Ok(Json(cost))
}

/// GET /api/v1/subscription/{id}
pub async fn get_subscription(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let id = subscription_id(path)?;
    let subscription = state.subscriptions.get_by_id(id).await?;
    Ok(Json(subscription.into()))
}

/// PATCH /api/v1/subscription/{id}
pub async fn update_subscription(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<SubscriptionUpdateRequest>, JsonRejection>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let id = subscription_id(path)?;
    let changes = json_body(body)?.into_update()?;
    let updated = state.subscriptions.update(id, changes).await?;

    tracing::info!(id, "subscription updated");
    Ok(Json(updated.into()))
}

/// DELETE /api/v1/subscription/{id}
pub async fn delete_subscription(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = subscription_id(path)?;
    state.subscriptions.delete(id).await?;

    tracing::info!(id, "subscription deleted");
    Ok(StatusCode::NO_CONTENT)
}
