//! Appearance settings
//!
//! The record itself and the store that keeps it on disk.

pub mod record;
pub mod store;

pub use record::{is_valid_color, FontSize, InvalidFontSize, SettingsRecord};
pub use store::SettingsStore;
