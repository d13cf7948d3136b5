//! Directional path through the markers.
//!
//! One polyline layer mirrors the marker sequence. Three ways to update it:
//! - `append_point` extends it after a marker is added at the end
//! - `redraw` replaces the vertex list in place (moves, edits, live drags)
//! - `recreate` detaches the layer and attaches a new one (deletes), since
//!   hosts cannot safely re-attach a removed decorated polyline

use waymark_core::{EditorError, LatLng, LayerId};
use waymark_settings::PathStyle;

use crate::surface::{Layer, MapSurface, PolylineLayer};

#[derive(Debug, Clone)]
pub struct PathRenderer {
    layer: Option<LayerId>,
    style: PathStyle,
}

impl PathRenderer {
    pub fn new(style: PathStyle) -> Self {
        Self { layer: None, style }
    }

    pub fn layer_id(&self) -> Option<LayerId> {
        self.layer
    }

    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    /// Attaches a polyline through `points`, replacing any layer this
    /// renderer already owns.
    pub fn attach(&mut self, surface: &mut dyn MapSurface, points: Vec<LatLng>) -> LayerId {
        if let Some(old) = self.layer.take() {
            surface.remove_layer(old);
        }
        let id = surface.add_layer(Layer::Polyline(PolylineLayer {
            points,
            style: self.style.clone(),
        }));
        self.layer = Some(id);
        id
    }

    /// Current vertex list, empty when no layer is attached.
    pub fn points(&self, surface: &dyn MapSurface) -> Vec<LatLng> {
        self.layer
            .and_then(|id| surface.layer(id))
            .and_then(Layer::as_polyline)
            .map(|p| p.points.clone())
            .unwrap_or_default()
    }

    /// Replaces the vertex list in place. Attaches a new layer when none
    /// exists yet or the host removed the old one.
    pub fn redraw(&mut self, surface: &mut dyn MapSurface, points: &[LatLng]) -> usize {
        if let Some(id) = self.layer {
            if let Ok(line) = polyline_mut(surface, id) {
                line.points.clear();
                line.points.extend_from_slice(points);
                tracing::trace!("Path {} redrawn with {} points", id, points.len());
                return points.len();
            }
            tracing::warn!("Path layer {} is gone, attaching a new one", id);
            self.layer = None;
        }
        self.attach(surface, points.to_vec());
        points.len()
    }

    /// Adds one vertex at the end.
    pub fn append_point(
        &mut self,
        surface: &mut dyn MapSurface,
        point: LatLng,
    ) -> Result<usize, EditorError> {
        let Some(id) = self.layer else {
            self.attach(surface, vec![point]);
            return Ok(1);
        };
        let line = polyline_mut(surface, id)?;
        line.points.push(point);
        Ok(line.points.len())
    }

    /// Detaches the current layer and attaches a fresh one through `points`.
    pub fn recreate(&mut self, surface: &mut dyn MapSurface, points: Vec<LatLng>) -> usize {
        let count = points.len();
        let id = self.attach(surface, points);
        tracing::debug!("Path recreated as {} with {} points", id, count);
        count
    }

    /// Detaches every polyline on the surface, including ones this renderer
    /// did not create, then attaches an empty path.
    pub fn reset(&mut self, surface: &mut dyn MapSurface) -> usize {
        self.layer = None;
        let removed = surface.remove_layers_where(&|l| l.is_polyline());
        self.attach(surface, Vec::new());
        removed
    }
}

fn polyline_mut(
    surface: &mut dyn MapSurface,
    id: LayerId,
) -> Result<&mut PolylineLayer, EditorError> {
    match surface.layer_mut(id) {
        Some(Layer::Polyline(line)) => Ok(line),
        _ => Err(EditorError::LayerNotFound(id)),
    }
}
