//! Waymark Settings Crate
//!
//! Handles editor configuration and settings persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{
    ArrowheadStyle, EditorConfig, EventSettings, LineCap, MapViewSettings, MarkerSettings,
    PathStyle, SeedMarker,
};
pub use error::{SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
