//! Marker handles on the map surface.
//!
//! `MarkerRegistry` keeps one draggable marker layer per stored marker, in
//! the same order as the [`CoordinateStore`](crate::CoordinateStore). Each
//! handle shows its sequence index as a label. Handles are addressed by
//! `MarkerId`, never by searching for a matching position.
//!
//! A handle's position is the live one: during a drag it runs ahead of the
//! store until the drag ends.

use waymark_core::{EditorError, LatLng, LayerId, MarkerId};
use waymark_settings::MarkerSettings;

use crate::store::Marker;
use crate::surface::{Layer, MapSurface, MarkerLayer};

const BADGE_STYLE: &str = "border-radius: 50%; \
text-align: center; \
font-size: 12px; \
background-color: white; \
border: 1px solid black; \
padding: 6px 8px;";

/// Label badge drawn for a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub label: String,
    pub html: String,
    pub class_name: String,
}

impl MarkerIcon {
    /// Round white badge showing `index`.
    pub fn numbered(index: usize, class_name: &str) -> Self {
        let label = index.to_string();
        Self {
            html: format!("<span style=\"{}\">{}</span>", BADGE_STYLE, label),
            label,
            class_name: class_name.to_string(),
        }
    }
}

/// Registry entry for one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHandle {
    pub marker_id: MarkerId,
    pub layer: LayerId,
    pub position: LatLng,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct MarkerRegistry {
    handles: Vec<MarkerHandle>,
    icon_class: String,
    draggable: bool,
}

impl MarkerRegistry {
    pub fn new(settings: &MarkerSettings) -> Self {
        Self {
            handles: Vec::new(),
            icon_class: settings.icon_class.clone(),
            draggable: settings.draggable,
        }
    }

    pub fn handles(&self) -> &[MarkerHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn handle(&self, id: MarkerId) -> Option<&MarkerHandle> {
        self.handles.iter().find(|h| h.marker_id == id)
    }

    /// Labels in sequence order.
    pub fn labels(&self) -> Vec<String> {
        self.handles.iter().map(|h| h.label.clone()).collect()
    }

    /// Handle positions in sequence order, including uncommitted drags.
    pub fn live_positions(&self) -> Vec<LatLng> {
        self.handles.iter().map(|h| h.position).collect()
    }

    /// Adds a handle for `marker` at the end, labeled with its index.
    pub fn attach(&mut self, surface: &mut dyn MapSurface, marker: &Marker) -> &MarkerHandle {
        let index = self.handles.len();
        let icon = MarkerIcon::numbered(index, &self.icon_class);
        let label = icon.label.clone();
        let layer = surface.add_layer(Layer::Marker(MarkerLayer {
            marker_id: marker.id,
            position: marker.position,
            icon,
            draggable: self.draggable,
        }));
        tracing::debug!("Attached {} as {} with label {}", marker.id, layer, label);

        self.handles.push(MarkerHandle {
            marker_id: marker.id,
            layer,
            position: marker.position,
            label,
        });
        &self.handles[index]
    }

    /// Removes a handle and its layer. Labels of later handles are stale
    /// until [`relabel_all`](Self::relabel_all) runs.
    pub fn detach(
        &mut self,
        surface: &mut dyn MapSurface,
        id: MarkerId,
    ) -> Result<MarkerHandle, EditorError> {
        let slot = self.slot(id)?;
        let handle = self.handles.remove(slot);
        if surface.remove_layer(handle.layer).is_none() {
            tracing::warn!("{} had no layer {} on the surface", id, handle.layer);
        }
        Ok(handle)
    }

    /// Moves a handle and its layer to `position`.
    pub fn set_position(
        &mut self,
        surface: &mut dyn MapSurface,
        id: MarkerId,
        position: LatLng,
    ) -> Result<(), EditorError> {
        let slot = self.slot(id)?;
        let layer_id = self.handles[slot].layer;
        match surface.layer_mut(layer_id) {
            Some(Layer::Marker(layer)) => layer.position = position,
            _ => return Err(EditorError::LayerNotFound(layer_id)),
        }
        self.handles[slot].position = position;
        Ok(())
    }

    /// Rewrites every label to its current index. Returns the handle count.
    pub fn relabel_all(&mut self, surface: &mut dyn MapSurface) -> Result<usize, EditorError> {
        for (index, handle) in self.handles.iter_mut().enumerate() {
            let icon = MarkerIcon::numbered(index, &self.icon_class);
            match surface.layer_mut(handle.layer) {
                Some(Layer::Marker(layer)) => {
                    handle.label = icon.label.clone();
                    layer.icon = icon;
                }
                _ => return Err(EditorError::LayerNotFound(handle.layer)),
            }
        }
        Ok(self.handles.len())
    }

    /// Fails with `LayerNotFound` for the first handle whose marker layer is
    /// missing from the surface.
    pub fn check_layers(&self, surface: &dyn MapSurface) -> Result<(), EditorError> {
        match self.handles.iter().find(|h| !has_marker_layer(surface, h.layer)) {
            Some(handle) => Err(EditorError::LayerNotFound(handle.layer)),
            None => Ok(()),
        }
    }

    /// Moves handles left ahead of `markers` by an unfinished drag back to
    /// the stored positions. Returns how many moved; nothing moves if any
    /// of their layers is missing.
    pub fn snap_to(
        &mut self,
        surface: &mut dyn MapSurface,
        markers: &[Marker],
    ) -> Result<usize, EditorError> {
        let moves: Vec<(usize, LatLng)> = self
            .handles
            .iter()
            .enumerate()
            .filter_map(|(slot, handle)| {
                markers
                    .iter()
                    .find(|m| m.id == handle.marker_id && m.position != handle.position)
                    .map(|m| (slot, m.position))
            })
            .collect();

        for &(slot, _) in &moves {
            let layer = self.handles[slot].layer;
            if !has_marker_layer(surface, layer) {
                return Err(EditorError::LayerNotFound(layer));
            }
        }
        for &(slot, position) in &moves {
            let handle = &mut self.handles[slot];
            if let Some(Layer::Marker(layer)) = surface.layer_mut(handle.layer) {
                layer.position = position;
            }
            handle.position = position;
            tracing::debug!("{} snapped back to {}", handle.marker_id, position);
        }
        Ok(moves.len())
    }

    /// Removes every handle and its layer.
    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        for handle in self.handles.drain(..) {
            surface.remove_layer(handle.layer);
        }
    }

    fn slot(&self, id: MarkerId) -> Result<usize, EditorError> {
        self.handles
            .iter()
            .position(|h| h.marker_id == id)
            .ok_or(EditorError::UnknownMarker(id))
    }
}

fn has_marker_layer(surface: &dyn MapSurface, id: LayerId) -> bool {
    matches!(surface.layer(id), Some(Layer::Marker(_)))
}
