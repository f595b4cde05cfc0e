//! Animal record stored in the `hewan` table, plus request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Animal {
    /// RFID tag value; primary key.
    pub id: String,
    pub nama: String,
    pub jenis: String,
    /// Age in years.
    pub usia: i32,
    pub status_kesehatan: Option<String>,
    #[serde(default)]
    pub last_scanned: Option<DateTime<Utc>>,
}

/// Body posted by the scanning device.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub uid: Option<String>,
}

/// Body of `PUT /api/edit-data/{uid}`.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation failure rather than a deserialization one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditAnimalRequest {
    #[validate(required, length(min = 1))]
    pub nama: Option<String>,
    #[validate(required, length(min = 1))]
    pub jenis: Option<String>,
    #[validate(required, range(min = 0))]
    pub usia: Option<i32>,
    /// Absent: keep the stored value. `null`: clear it.
    #[serde(default, deserialize_with = "present")]
    pub status_kesehatan: Option<Option<String>>,
}

/// Validated field changes for one record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnimalChanges {
    pub nama: String,
    pub jenis: String,
    pub usia: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_kesehatan: Option<Option<String>>,
}

impl EditAnimalRequest {
    /// Validate the body and turn it into the changes to persist.
    pub fn into_changes(self) -> Result<AnimalChanges, AppError> {
        self.validate()?;

        let nama = non_blank(self.nama, "nama")?;
        let jenis = non_blank(self.jenis, "jenis")?;
        let usia = self
            .usia
            .ok_or_else(|| AppError::Validation("Semua data harus diisi (periksa: usia)".to_string()))?;

        Ok(AnimalChanges {
            nama,
            jenis,
            usia,
            status_kesehatan: self.status_kesehatan,
        })
    }
}

/// Normalize an identifier taken from a path or body.
///
/// Surrounding whitespace is dropped (readers often append a newline);
/// an identifier that is empty afterwards counts as absent.
pub fn normalize_uid(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|uid| !uid.is_empty())
}

/// Blank means empty after trimming; the submitted text is kept as is.
fn non_blank(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("Semua data harus diisi (periksa: {field})")))
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
