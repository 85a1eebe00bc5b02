use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use prodlens_client::{CompareRequest, FindRequest, UpdatesRequest};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{map_client_error, ApiError, AppState};

pub(super) async fn compare_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::from_rejection(&req_id.0, &e))?;
    let (product1, product2) = (request.product1.trim(), request.product2.trim());
    if product1.is_empty() || product2.is_empty() {
        return Err(ApiError::bad_request("product1 and product2 must not be empty"));
    }

    tracing::info!(request_id = %req_id.0, product1, product2, "compare requested");
    let comparison = state
        .perplexity
        .compare_products(product1, product2)
        .await
        .map_err(|e| map_client_error(&req_id.0, e))?;

    Ok(Json(comparison))
}

pub(super) async fn find_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<FindRequest>, JsonRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::from_rejection(&req_id.0, &e))?;
    let criteria = request.criteria.trim();
    if criteria.is_empty() {
        return Err(ApiError::bad_request("criteria must not be empty"));
    }

    tracing::info!(request_id = %req_id.0, criteria, "find requested");
    let products = state
        .perplexity
        .find_products(criteria)
        .await
        .map_err(|e| map_client_error(&req_id.0, e))?;

    tracing::debug!(request_id = %req_id.0, count = products.len(), "find answered");
    Ok(Json(products))
}

pub(super) async fn get_product_updates(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<UpdatesRequest>, JsonRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::from_rejection(&req_id.0, &e))?;
    let category = request.category.trim();
    if category.is_empty() {
        return Err(ApiError::bad_request("category must not be empty"));
    }

    tracing::info!(request_id = %req_id.0, category, "updates requested");
    let updates = state
        .perplexity
        .get_product_updates(category)
        .await
        .map_err(|e| map_client_error(&req_id.0, e))?;

    tracing::debug!(request_id = %req_id.0, count = updates.len(), "updates answered");
    Ok(Json(updates))
}
