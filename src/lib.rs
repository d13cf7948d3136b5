//! # Waymark
//!
//! Interactive map waypoint editing: users click the map to place ordered
//! markers, drag them, edit their altitude in a dialog, or delete them,
//! while a directional path through all markers stays in sync.
//!
//! ## Architecture
//!
//! Waymark is organized as a workspace with multiple crates:
//!
//! 1. **waymark-core** - Coordinates, marker identities, errors, event bus
//! 2. **waymark-settings** - Map view, path style, marker defaults, persistence
//! 3. **waymark-editor** - Coordinate store, marker handles, path, dialog contract
//! 4. **waymark** - Logging setup and the headless preview binary

use serde::Serialize;

pub use waymark_core::{
    DialogEvent, DialogResolution, EditorError, EditorEvent, Error, EventBus, EventCategory,
    EventFilter, LatLng, LayerId, MarkerEvent, MarkerId, PathEvent, Result,
};

pub use waymark_editor::{
    CoordinateStore, DialogOutcome, EditorDialog, EventResponse, HeadlessSurface, Layer,
    MapEditor, MapSurface, Marker, MarkerDialogData, MarkerEdit, MarkerRegistry, PathRenderer,
    SurfaceEvent,
};

pub use waymark_settings::{
    ArrowheadStyle, EditorConfig, LineCap, MapViewSettings, MarkerSettings, PathStyle,
    SeedMarker, SettingsError, SettingsPersistence,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Serializable view of an editor's markers and path.
#[derive(Debug, Clone, Serialize)]
pub struct EditorSnapshot {
    pub markers: Vec<Marker>,
    pub labels: Vec<String>,
    pub path: Vec<LatLng>,
}

impl EditorSnapshot {
    pub fn capture<S: MapSurface>(editor: &MapEditor<S>) -> Self {
        Self {
            markers: editor.markers().to_vec(),
            labels: editor.labels(),
            path: editor.path_points(),
        }
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
