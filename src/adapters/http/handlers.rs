//! Receipt endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::dto::{HealthResponse, PointsResponse, ProcessResponse};
use super::error::ApiResult;
use super::AppState;
use crate::domain::model::{Receipt, ReceiptId};
use crate::utils::validation::Validate;

/// POST /receipts/process
pub async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> ApiResult<Json<ProcessResponse>> {
    let Json(receipt) = payload?;
    receipt.validate()?;

    let id = state.service.process(&receipt).await?;

    Ok(Json(ProcessResponse { id: id.to_string() }))
}

/// GET /receipts/{id}/points
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let id: ReceiptId = id.parse()?;
    let points = state.service.lookup(&id).await?;

    Ok(Json(PointsResponse { points }))
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}
