//! Domain records and wire DTOs.

pub mod animal;
pub mod telegram;
