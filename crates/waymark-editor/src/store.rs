//! Ordered marker storage.
//!
//! The store owns every `Marker`. A marker's sequence index is its position
//! in the list and shifts when an earlier marker is removed; its `MarkerId`
//! never changes. Index-addressed mutations validate the index first and
//! leave the store untouched on failure.

use serde::{Deserialize, Serialize};
use waymark_core::{EditorError, LatLng, MarkerId};

/// A user-placed point with altitude metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub position: LatLng,
    pub altitude: f64,
}

impl Marker {
    /// Creates a marker with a fresh identity.
    pub fn new(position: LatLng, altitude: f64) -> Self {
        Self {
            id: MarkerId::new(),
            position,
            altitude,
        }
    }

    /// Same identity, different position.
    pub fn moved_to(self, position: LatLng) -> Self {
        Self { position, ..self }
    }
}

/// Ordered, in-memory marker sequence.
#[derive(Debug, Clone, Default)]
pub struct CoordinateStore {
    markers: Vec<Marker>,
}

impl CoordinateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered view of all markers.
    pub fn list(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    /// Current sequence index of a marker.
    pub fn index_of(&self, id: MarkerId) -> Option<usize> {
        self.markers.iter().position(|m| m.id == id)
    }

    /// Looks up a marker by identity, returning it with its current index.
    pub fn find(&self, id: MarkerId) -> Result<(usize, &Marker), EditorError> {
        self.markers
            .iter()
            .enumerate()
            .find(|(_, m)| m.id == id)
            .ok_or(EditorError::UnknownMarker(id))
    }

    /// Marker positions in sequence order.
    pub fn positions(&self) -> Vec<LatLng> {
        self.markers.iter().map(|m| m.position).collect()
    }

    /// Appends to the end of the sequence and returns the new index.
    pub fn append(&mut self, marker: Marker) -> usize {
        self.markers.push(marker);
        self.markers.len() - 1
    }

    /// Replaces the marker at `index`, returning the previous entry.
    pub fn replace(&mut self, index: usize, marker: Marker) -> Result<Marker, EditorError> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.markers[index], marker))
    }

    /// Removes the marker at `index`; later markers shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<Marker, EditorError> {
        self.check_index(index)?;
        Ok(self.markers.remove(index))
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    fn check_index(&self, index: usize) -> Result<(), EditorError> {
        if index < self.markers.len() {
            Ok(())
        } else {
            Err(EditorError::IndexOutOfRange {
                index,
                len: self.markers.len(),
            })
        }
    }
}

impl FromIterator<Marker> for CoordinateStore {
    fn from_iter<T: IntoIterator<Item = Marker>>(iter: T) -> Self {
        Self {
            markers: iter.into_iter().collect(),
        }
    }
}

/// Service boundary for hosts that keep marker storage behind an interface.
pub trait MarkerService {
    fn get_markers(&self) -> Vec<Marker>;
    fn add_marker(&mut self, marker: Marker);
    fn update_marker(&mut self, index: usize, marker: Marker) -> Result<(), EditorError>;
    fn delete_marker(&mut self, index: usize) -> Result<(), EditorError>;
    fn clear_markers(&mut self);
}

impl MarkerService for CoordinateStore {
    fn get_markers(&self) -> Vec<Marker> {
        self.markers.clone()
    }

    fn add_marker(&mut self, marker: Marker) {
        self.append(marker);
    }

    fn update_marker(&mut self, index: usize, marker: Marker) -> Result<(), EditorError> {
        self.replace(index, marker).map(|_| ())
    }

    fn delete_marker(&mut self, index: usize) -> Result<(), EditorError> {
        self.remove(index).map(|_| ())
    }

    fn clear_markers(&mut self) {
        self.clear();
    }
}
