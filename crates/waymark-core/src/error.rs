//! Error handling for Waymark
//!
//! Provides error types for the editor layers:
//! - Editor errors (store indexing, marker identity, dialog protocol)
//! - I/O errors surfaced by hosts and settings
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::data::{LayerId, MarkerId};

/// Editor error type
///
/// Raised before any mutation takes place, so a failed operation leaves the
/// store, the marker handles, and the path exactly as they were.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Sequence index does not address an existing marker
    #[error("Marker index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of markers at the time of the request.
        len: usize,
    },

    /// Marker ID is not (or no longer) present
    #[error("Unknown marker {0}")]
    UnknownMarker(MarkerId),

    /// Coordinate is not finite or outside the lat/lng range
    #[error("Invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate {
        /// The rejected latitude.
        lat: f64,
        /// The rejected longitude.
        lng: f64,
    },

    /// Altitude is not a finite number
    #[error("Invalid altitude {0}")]
    InvalidAltitude(f64),

    /// A marker dialog is already open
    #[error("A marker dialog is already open")]
    DialogAlreadyOpen,

    /// A dialog response arrived with no dialog open
    #[error("No marker dialog is open")]
    NoDialogOpen,

    /// Dialog response does not belong to the open dialog
    #[error("Dialog response for {actual} does not match open dialog for {expected}")]
    StaleDialog {
        /// Marker the open dialog was created for.
        expected: MarkerId,
        /// Marker named by the response.
        actual: MarkerId,
    },

    /// Surface does not hold the layer
    #[error("Layer {0} not found on map surface")]
    LayerNotFound(LayerId),

    /// Generic editor error
    #[error("Editor error: {0}")]
    Other(String),
}

/// Main error type for Waymark
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Editor error
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an editor error
    pub fn is_editor_error(&self) -> bool {
        matches!(self, Error::Editor(_))
    }

    /// Check if this error was caused by a bad index or stale marker reference
    pub fn is_addressing_error(&self) -> bool {
        matches!(
            self,
            Error::Editor(EditorError::IndexOutOfRange { .. })
                | Error::Editor(EditorError::UnknownMarker(_))
                | Error::Editor(EditorError::StaleDialog { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
