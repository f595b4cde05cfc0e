//! Chat message rendering for scan results.

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::animal::Animal;

const NO_HEALTH_NOTE: &str = "Tidak ada catatan";

/// Markdown notification for a record found by a scan.
pub fn found_message(animal: &Animal, scanned_at: DateTime<Utc>, offset: FixedOffset) -> String {
    let health = animal
        .status_kesehatan
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(escape_markdown)
        .unwrap_or_else(|| NO_HEALTH_NOTE.to_string());

    format!(
        "🐄 *Data Hewan Ditemukan* 🐄\n\n\
         📌 *Nama:* {}\n\
         🆔 *RFID:* {}\n\
         ⚖️ *Jenis:* {}\n\
         💉 *Usia:* {} tahun\n\
         🩺 *Kesehatan:* {}\n\
         ⏳ *Terakhir Scan:* {}",
        escape_markdown(&animal.nama),
        escape_markdown(&animal.id),
        escape_markdown(&animal.jenis),
        animal.usia,
        health,
        format_timestamp(scanned_at, offset),
    )
}

/// Plain-text notification for a UID with no matching record.
pub fn not_found_message(uid: &str) -> String {
    format!("⚠️ Tidak ditemukan data untuk UID: {uid}")
}

/// Render `at` in `offset` using the Indonesian numeric style, e.g. `18/10/2026, 14.05.33`.
pub fn format_timestamp(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .format("%-d/%-m/%Y, %H.%M.%S")
        .to_string()
}

/// Escape the characters legacy Markdown treats as entity delimiters.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
