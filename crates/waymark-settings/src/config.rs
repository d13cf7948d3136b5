//! Editor configuration
//!
//! Configuration is organized into logical sections:
//! - Map view (initial center/zoom, tile source)
//! - Path style (line and arrowhead decoration)
//! - Marker defaults (altitude, icon class, seed markers)
//! - Event delivery (receiver buffer, replay journal)
//!
//! Files are JSON or TOML, chosen by extension, and validated on both load
//! and save.

use serde::{Deserialize, Serialize};
use std::path::Path;
use waymark_core::{EventBusConfig, LatLng};

use crate::error::{SettingsError, SettingsResult};

/// Initial map view and tile source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapViewSettings {
    /// Initial view center
    pub center: LatLng,
    /// Initial zoom level
    pub zoom: u8,
    /// Maximum zoom the tile source serves
    pub max_zoom: u8,
    /// Tile URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders
    pub tile_url: String,
    /// Attribution shown with the tiles
    pub attribution: String,
}

impl Default for MapViewSettings {
    fn default() -> Self {
        Self {
            center: LatLng::new(50.4447, 30.5117),
            zoom: 12,
            max_zoom: 18,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution:
                "Map data © <a href=\"https://openstreetmap.org\">OpenStreetMap</a> contributors"
                    .to_string(),
        }
    }
}

/// Stroke end style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl std::fmt::Display for LineCap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Butt => write!(f, "butt"),
            Self::Round => write!(f, "round"),
            Self::Square => write!(f, "square"),
        }
    }
}

/// Direction arrowheads drawn along the path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowheadStyle {
    /// Arrowhead length in pixels
    pub size_px: u32,
    /// Filled or outline arrowheads
    pub fill: bool,
    /// Opening angle in degrees
    pub yawn_deg: f64,
}

impl Default for ArrowheadStyle {
    fn default() -> Self {
        Self {
            size_px: 30,
            fill: true,
            yawn_deg: 22.0,
        }
    }
}

/// Polyline appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    /// CSS color
    pub color: String,
    /// Stroke width in pixels
    pub weight: f64,
    /// Stroke end style
    #[serde(default)]
    pub line_cap: LineCap,
    /// Arrowhead decoration
    #[serde(default)]
    pub arrowheads: ArrowheadStyle,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: "red".to_string(),
            weight: 3.0,
            line_cap: LineCap::Round,
            arrowheads: ArrowheadStyle::default(),
        }
    }
}

/// Marker placed when the editor starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedMarker {
    pub position: LatLng,
    pub altitude: f64,
}

impl SeedMarker {
    pub fn new(lat: f64, lng: f64, altitude: f64) -> Self {
        Self {
            position: LatLng::new(lat, lng),
            altitude,
        }
    }
}

/// Marker defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSettings {
    /// Altitude given to markers created by a map click
    pub default_altitude: f64,
    /// Whether marker handles can be dragged
    #[serde(default = "default_true")]
    pub draggable: bool,
    /// CSS class of the label icon
    pub icon_class: String,
    /// Markers placed at startup, in order
    #[serde(default = "default_seed")]
    pub seed: Vec<SeedMarker>,
}

fn default_true() -> bool {
    true
}

fn default_seed() -> Vec<SeedMarker> {
    vec![
        SeedMarker::new(50.4544, 30.4525, 100.0),
        SeedMarker::new(50.4310, 30.5425, 100.0),
        SeedMarker::new(50.4472, 30.5152, 100.0),
    ]
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            default_altitude: 100.0,
            draggable: true,
            icon_class: "numeration".to_string(),
            seed: default_seed(),
        }
    }
}

/// Editor event delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSettings {
    /// Events buffered per async receiver
    pub channel_capacity: usize,
    /// Recent events kept for replay, 0 to disable
    #[serde(default)]
    pub journal_size: usize,
}

impl Default for EventSettings {
    fn default() -> Self {
        let bus = EventBusConfig::default();
        Self {
            channel_capacity: bus.channel_capacity,
            journal_size: bus.journal_size,
        }
    }
}

impl EventSettings {
    pub fn bus_config(&self) -> EventBusConfig {
        EventBusConfig {
            channel_capacity: self.channel_capacity,
            journal_size: self.journal_size,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    #[serde(default)]
    pub map: MapViewSettings,
    #[serde(default)]
    pub path: PathStyle,
    #[serde(default)]
    pub markers: MarkerSettings,
    #[serde(default)]
    pub events: EventSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !self.map.center.is_valid() {
            return Err(SettingsError::invalid(
                "map.center",
                format!("{} is not a valid coordinate", self.map.center),
            ));
        }

        if self.map.max_zoom == 0 || self.map.max_zoom > 22 {
            return Err(SettingsError::invalid("map.max_zoom", "must be in 1..=22"));
        }

        if self.map.zoom > self.map.max_zoom {
            return Err(SettingsError::invalid(
                "map.zoom",
                format!("{} exceeds max_zoom {}", self.map.zoom, self.map.max_zoom),
            ));
        }

        if self.map.tile_url.trim().is_empty() {
            return Err(SettingsError::invalid("map.tile_url", "must not be empty"));
        }

        if self.path.weight.is_nan() || self.path.weight <= 0.0 {
            return Err(SettingsError::invalid("path.weight", "must be > 0"));
        }

        if self.path.arrowheads.size_px == 0 {
            return Err(SettingsError::invalid(
                "path.arrowheads.size_px",
                "must be > 0",
            ));
        }

        if !self.markers.default_altitude.is_finite() {
            return Err(SettingsError::invalid(
                "markers.default_altitude",
                "must be a finite number",
            ));
        }

        if self.events.channel_capacity == 0 {
            return Err(SettingsError::invalid("events.channel_capacity", "must be > 0"));
        }

        for (i, seed) in self.markers.seed.iter().enumerate() {
            if !seed.position.is_valid() || !seed.altitude.is_finite() {
                return Err(SettingsError::invalid(
                    &format!("markers.seed[{}]", i),
                    format!("{} alt {} is not valid", seed.position, seed.altitude),
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
