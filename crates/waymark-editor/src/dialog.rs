//! Marker dialog contract.
//!
//! The editor opens a dialog with a [`MarkerDialogData`] snapshot and gets
//! back either nothing (dismissed) or the same shape, edited or carrying
//! `deleteMarker: true`. The wire shape uses camelCase so web hosts can pass
//! it straight to their modal component.
//!
//! The response is validated before it is interpreted: a missing response
//! is a cancel, the delete flag is checked before any field, and edited
//! fields must be a valid coordinate and a finite altitude.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use waymark_core::{EditorError, LatLng, MarkerId};

use crate::store::Marker;

/// Fields shown in and returned from a marker dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDialogData {
    pub marker_id: MarkerId,
    pub lat: f64,
    pub lng: f64,
    pub alt: f64,
    pub delete_marker: bool,
    pub number_of_marker: usize,
}

impl MarkerDialogData {
    /// Snapshot of `marker` at sequence position `index`.
    pub fn for_marker(marker: &Marker, index: usize) -> Self {
        Self {
            marker_id: marker.id,
            lat: marker.position.lat,
            lng: marker.position.lng,
            alt: marker.altitude,
            delete_marker: false,
            number_of_marker: index,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Same snapshot with the delete flag raised.
    pub fn into_delete(self) -> Self {
        Self {
            delete_marker: true,
            ..self
        }
    }
}

/// Fields to write back to a marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerEdit {
    pub position: LatLng,
    pub altitude: f64,
}

/// What closing a dialog asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogOutcome {
    Edited(MarkerEdit),
    Deleted,
    Cancelled,
}

impl DialogOutcome {
    /// Interprets a dialog close.
    pub fn from_response(response: Option<&MarkerDialogData>) -> Result<Self, EditorError> {
        let Some(data) = response else {
            return Ok(DialogOutcome::Cancelled);
        };
        if data.delete_marker {
            return Ok(DialogOutcome::Deleted);
        }
        let position = LatLng::checked(data.lat, data.lng)?;
        if !data.alt.is_finite() {
            return Err(EditorError::InvalidAltitude(data.alt));
        }
        Ok(DialogOutcome::Edited(MarkerEdit {
            position,
            altitude: data.alt,
        }))
    }
}

/// Modal host. `open` resolves when the user closes the dialog; `None`
/// means it was dismissed without action.
#[async_trait(?Send)]
pub trait EditorDialog {
    async fn open(&self, request: MarkerDialogData) -> Option<MarkerDialogData>;
}
