//! Business logic services.

pub mod animal;
pub mod bot;
pub mod broadcast;
pub mod formatter;
pub mod store;
pub mod telegram;
