//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so hosts can log or replay them.

use serde::{Deserialize, Serialize};

use crate::data::{LatLng, MarkerId};

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// Marker lifecycle
    Marker(MarkerEvent),
    /// Path layer maintenance
    Path(PathEvent),
    /// Marker dialog open/close
    Dialog(DialogEvent),
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::Marker(_) => EventCategory::Marker,
            EditorEvent::Path(_) => EventCategory::Path,
            EditorEvent::Dialog(_) => EventCategory::Dialog,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::Marker(e) => e.description(),
            EditorEvent::Path(e) => e.description(),
            EditorEvent::Dialog(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Marker lifecycle events.
    Marker,
    /// Path layer events.
    Path,
    /// Dialog events.
    Dialog,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Marker => write!(f, "Marker"),
            EventCategory::Path => write!(f, "Path"),
            EventCategory::Dialog => write!(f, "Dialog"),
        }
    }
}

/// Marker lifecycle events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerEvent {
    /// Marker appended to the end of the sequence.
    Added {
        /// Marker identity.
        id: MarkerId,
        /// Sequence index it landed at.
        index: usize,
        /// Where it was placed.
        position: LatLng,
    },
    /// Drag committed a new position.
    Moved {
        /// Marker identity.
        id: MarkerId,
        /// Sequence index.
        index: usize,
        /// Committed position.
        position: LatLng,
    },
    /// Dialog edit written back.
    Edited {
        /// Marker identity.
        id: MarkerId,
        /// Sequence index.
        index: usize,
        /// New position.
        position: LatLng,
        /// New altitude.
        altitude: f64,
    },
    /// Marker deleted.
    Removed {
        /// Marker identity.
        id: MarkerId,
        /// Index it held before removal.
        index: usize,
    },
    /// Remaining handles relabeled after indices shifted.
    Relabeled {
        /// Number of handles relabeled.
        count: usize,
    },
    /// All markers cleared.
    Cleared,
}

impl MarkerEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            MarkerEvent::Added { index, position, .. } => {
                format!("Marker {} added at {}", index, position)
            }
            MarkerEvent::Moved { index, position, .. } => {
                format!("Marker {} moved to {}", index, position)
            }
            MarkerEvent::Edited {
                index,
                position,
                altitude,
                ..
            } => format!("Marker {} edited: {} alt {}", index, position, altitude),
            MarkerEvent::Removed { index, .. } => format!("Marker {} removed", index),
            MarkerEvent::Relabeled { count } => format!("{} markers relabeled", count),
            MarkerEvent::Cleared => "All markers cleared".to_string(),
        }
    }
}

/// Path layer events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathEvent {
    /// Vertex list rebuilt in place.
    Redrawn {
        /// Vertex count after the rebuild.
        points: usize,
    },
    /// One vertex appended.
    Extended {
        /// Vertex count after the append.
        points: usize,
    },
    /// Layer removed and attached anew.
    Recreated {
        /// Vertex count of the new layer.
        points: usize,
    },
}

impl PathEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            PathEvent::Redrawn { points } => format!("Path redrawn ({} points)", points),
            PathEvent::Extended { points } => format!("Path extended ({} points)", points),
            PathEvent::Recreated { points } => format!("Path recreated ({} points)", points),
        }
    }
}

/// How a marker dialog was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogResolution {
    /// Fields written back.
    Edited,
    /// Marker deleted.
    Deleted,
    /// Dismissed without changes.
    Cancelled,
}

/// Dialog events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DialogEvent {
    /// Dialog opened for a marker.
    Opened {
        /// Marker being edited.
        id: MarkerId,
        /// Its index when the dialog opened.
        index: usize,
    },
    /// Dialog closed.
    Closed {
        /// Marker the dialog was opened for.
        id: MarkerId,
        /// Outcome applied.
        resolution: DialogResolution,
    },
}

impl DialogEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            DialogEvent::Opened { index, .. } => format!("Dialog opened for marker {}", index),
            DialogEvent::Closed { resolution, .. } => format!("Dialog closed: {:?}", resolution),
        }
    }
}
