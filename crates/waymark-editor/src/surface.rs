//! Map surface abstraction.
//!
//! The mapping widget itself (tiles, pan/zoom, pointer translation) lives
//! outside this crate. The editor only needs to attach, mutate, enumerate,
//! and remove layers; hosts translate widget input into
//! [`SurfaceEvent`](crate::SurfaceEvent)s and feed them to the editor.
//!
//! [`HeadlessSurface`] keeps layers in memory and backs the tests and the
//! command-line preview.

use std::collections::BTreeMap;

use waymark_core::{LatLng, LayerId, MarkerId};
use waymark_settings::{MapViewSettings, PathStyle};

use crate::registry::MarkerIcon;

/// Raster tile source.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl From<&MapViewSettings> for TileLayer {
    fn from(view: &MapViewSettings) -> Self {
        Self {
            url_template: view.tile_url.clone(),
            attribution: view.attribution.clone(),
            max_zoom: view.max_zoom,
        }
    }
}

/// Visual handle of one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayer {
    pub marker_id: MarkerId,
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub draggable: bool,
}

/// Directional polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineLayer {
    pub points: Vec<LatLng>,
    pub style: PathStyle,
}

/// Anything the editor attaches to a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Tile(TileLayer),
    Marker(MarkerLayer),
    Polyline(PolylineLayer),
}

impl Layer {
    pub fn is_polyline(&self) -> bool {
        matches!(self, Layer::Polyline(_))
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Layer::Marker(_))
    }

    pub fn as_marker(&self) -> Option<&MarkerLayer> {
        match self {
            Layer::Marker(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_polyline(&self) -> Option<&PolylineLayer> {
        match self {
            Layer::Polyline(p) => Some(p),
            _ => None,
        }
    }
}

/// Layer host the editor draws onto.
pub trait MapSurface {
    /// Centers the view.
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Attaches a layer and returns its handle.
    fn add_layer(&mut self, layer: Layer) -> LayerId;

    /// Detaches a layer, returning it if it was attached.
    fn remove_layer(&mut self, id: LayerId) -> Option<Layer>;

    fn layer(&self, id: LayerId) -> Option<&Layer>;

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer>;

    /// Handles of all attached layers, in attach order.
    fn layer_ids(&self) -> Vec<LayerId>;

    /// Visits every attached layer.
    fn each_layer(&self, visit: &mut dyn FnMut(LayerId, &Layer)) {
        for id in self.layer_ids() {
            if let Some(layer) = self.layer(id) {
                visit(id, layer);
            }
        }
    }

    /// Detaches every layer matching `predicate`; returns how many went.
    fn remove_layers_where(&mut self, predicate: &dyn Fn(&Layer) -> bool) -> usize {
        let mut doomed = Vec::new();
        self.each_layer(&mut |id, layer| {
            if predicate(layer) {
                doomed.push(id);
            }
        });
        doomed
            .into_iter()
            .filter(|id| self.remove_layer(*id).is_some())
            .count()
    }
}

/// In-memory surface with no rendering.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    layers: BTreeMap<LayerId, Layer>,
    next_id: u64,
    center: Option<LatLng>,
    zoom: u8,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn polylines(&self) -> impl Iterator<Item = (LayerId, &PolylineLayer)> {
        self.layers
            .iter()
            .filter_map(|(id, l)| l.as_polyline().map(|p| (*id, p)))
    }

    pub fn markers(&self) -> impl Iterator<Item = (LayerId, &MarkerLayer)> {
        self.layers
            .iter()
            .filter_map(|(id, l)| l.as_marker().map(|m| (*id, m)))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.values().filter_map(|l| match l {
            Layer::Tile(t) => Some(t),
            _ => None,
        })
    }
}

impl MapSurface for HeadlessSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.center = Some(center);
        self.zoom = zoom;
    }

    fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(id, layer);
        id
    }

    fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        self.layers.remove(&id)
    }

    fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.keys().copied().collect()
    }
}
