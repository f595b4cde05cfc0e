//! Animal record routes: scan relay, lookup, edit and delete.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::json::JsonBody;
use crate::models::animal::{normalize_uid, Animal, EditAnimalRequest, ScanRequest};
use crate::services::animal as animal_service;
use crate::services::broadcast::DeliveryReport;
use crate::AppState;

/// Response of a successful scan.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub message: String,
    pub data: Animal,
    pub delivery: DeliveryReport,
}

fn require_uid(raw: Option<&str>) -> Result<&str, AppError> {
    normalize_uid(raw).ok_or_else(|| AppError::Validation("UID harus diberikan".to_string()))
}

/// POST /api/scan-rfid — relay a tag read by the scanning device.
pub async fn scan(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ScanRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    tracing::info!(uid = ?body.uid, "UID received from scanner");
    let uid = require_uid(body.uid.as_deref())?;

    let outcome = animal_service::scan(
        state.store.as_ref(),
        state.notifier.as_ref(),
        &state.config,
        uid,
    )
    .await?;

    Ok(Json(ScanResponse {
        success: true,
        message: "Data dikirim ke Telegram & waktu diperbarui".to_string(),
        data: outcome.animal,
        delivery: outcome.delivery,
    }))
}

/// GET /api/get-data/{uid}
pub async fn get(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<ApiResponse<Animal>>, AppError> {
    let uid = require_uid(Some(uid.as_str()))?;
    let animal = animal_service::get(state.store.as_ref(), uid).await?;
    Ok(ApiResponse::success(animal))
}

/// PUT /api/edit-data/{uid}
pub async fn edit(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    JsonBody(body): JsonBody<EditAnimalRequest>,
) -> Result<Json<ApiResponse<Animal>>, AppError> {
    let uid = require_uid(Some(uid.as_str()))?;
    let changes = body.into_changes()?;
    let animal = animal_service::edit(state.store.as_ref(), uid, &changes).await?;
    Ok(ApiResponse::with_message("Data berhasil diperbarui", animal))
}

/// DELETE /api/delete-data/{uid}
pub async fn delete(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let uid = require_uid(Some(uid.as_str()))?;
    animal_service::delete(state.store.as_ref(), uid).await?;
    Ok(ApiResponse::message("Data berhasil dihapus"))
}

/// Fallback for the record routes called without an identifier segment.
pub async fn missing_uid() -> AppError {
    AppError::Validation("UID harus diberikan".to_string())
}
