//! Animal record operations: scan relay, lookup, edit and delete.

use chrono::Utc;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::animal::{Animal, AnimalChanges};
use crate::models::telegram::OutgoingMessage;
use crate::services::broadcast::{broadcast, DeliveryReport};
use crate::services::formatter::{found_message, not_found_message};
use crate::services::store::AnimalStore;
use crate::services::telegram::Notifier;

const NOT_FOUND: &str = "Data tidak ditemukan";

/// Result of a successful scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// The record as stored after the scan, `last_scanned` included.
    pub animal: Animal,
    pub delivery: DeliveryReport,
}

/// Relay one RFID scan to every configured chat.
///
/// Unknown UIDs are announced to the recipients and reported as not found
/// without touching the store. Known UIDs get `last_scanned` set to now
/// before the record summary is sent out.
pub async fn scan(
    store: &dyn AnimalStore,
    notifier: &dyn Notifier,
    config: &AppConfig,
    uid: &str,
) -> Result<ScanOutcome, AppError> {
    let Some(mut animal) = store.find_by_id(uid).await? else {
        let message = OutgoingMessage::plain(not_found_message(uid));
        let delivery = broadcast(notifier, &config.telegram_chat_ids, &message).await;
        tracing::info!(uid = %uid, delivered = delivery.delivered, "Scanned UID has no record");
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    };

    // Lookup and write are separate round trips; concurrent scans of one tag
    // may interleave and the later write wins.
    let scanned_at = Utc::now();
    store.touch_last_scanned(&animal.id, scanned_at).await?;
    animal.last_scanned = Some(scanned_at);

    let message = OutgoingMessage::markdown(found_message(
        &animal,
        scanned_at,
        config.display_offset(),
    ));
    let delivery = broadcast(notifier, &config.telegram_chat_ids, &message).await;

    if delivery.all_failed() {
        let detail = delivery
            .failed
            .first()
            .map(|f| f.error.clone())
            .unwrap_or_default();
        return Err(AppError::Upstream(format!(
            "notifikasi gagal dikirim ke semua penerima: {detail}"
        )));
    }

    tracing::info!(
        uid = %uid,
        delivered = delivery.delivered,
        failed = delivery.failed.len(),
        "Scan relayed"
    );

    Ok(ScanOutcome { animal, delivery })
}

/// Look up one record.
pub async fn get(store: &dyn AnimalStore, uid: &str) -> Result<Animal, AppError> {
    store
        .find_by_id(uid)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// Overwrite the editable fields of one record.
pub async fn edit(
    store: &dyn AnimalStore,
    uid: &str,
    changes: &AnimalChanges,
) -> Result<Animal, AppError> {
    let animal = store
        .update(uid, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    tracing::info!(uid = %uid, "Record updated");
    Ok(animal)
}

/// Delete one record. Deleting an unknown UID is not an error.
pub async fn delete(store: &dyn AnimalStore, uid: &str) -> Result<(), AppError> {
    let removed = store.delete(uid).await?;
    tracing::info!(uid = %uid, removed, "Record delete requested");
    Ok(())
}
