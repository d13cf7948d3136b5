//! Map editor state manager.
//!
//! `MapEditor` owns the coordinate store, the marker handles, and the path,
//! and keeps them in step: after every completed operation the path has one
//! vertex per stored marker, in order, and every handle is labeled with its
//! sequence index.
//!
//! Input arrives as [`SurfaceEvent`]s from the host's map widget. Marker
//! clicks open a dialog; only one dialog may be open, and while it is open
//! map clicks and drags are ignored.

use std::sync::Arc;

use waymark_core::{
    DialogEvent, DialogResolution, EditorError, EditorEvent, EventBus, LatLng, MarkerEvent,
    MarkerId, PathEvent,
};
use waymark_settings::{EditorConfig, SeedMarker};

use crate::dialog::{DialogOutcome, EditorDialog, MarkerDialogData, MarkerEdit};
use crate::path::PathRenderer;
use crate::registry::MarkerRegistry;
use crate::store::{CoordinateStore, Marker};
use crate::surface::{Layer, MapSurface, TileLayer};

/// Pointer input translated by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Click on empty map.
    Click { position: LatLng },
    /// Click on a marker handle.
    MarkerClick { id: MarkerId },
    /// Marker handle moved mid-drag.
    MarkerDrag { id: MarkerId, position: LatLng },
    /// Marker handle released.
    MarkerDragEnd { id: MarkerId, position: LatLng },
}

/// What the editor did with a [`SurfaceEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventResponse {
    Handled,
    /// Dropped because a dialog is open.
    Ignored,
    /// Host should show this dialog and report back via `close_dialog`.
    OpenDialog(MarkerDialogData),
}

/// The dialog currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenDialog {
    pub marker_id: MarkerId,
    pub index: usize,
}

pub struct MapEditor<S: MapSurface> {
    surface: S,
    store: CoordinateStore,
    registry: MarkerRegistry,
    path: PathRenderer,
    default_altitude: f64,
    dialog: Option<OpenDialog>,
    bus: Arc<EventBus>,
}

impl<S: MapSurface> MapEditor<S> {
    /// Sets up the view and tile layer, places the seed markers, and draws
    /// the path through them.
    pub fn new(surface: S, config: &EditorConfig) -> Result<Self, EditorError> {
        let bus = EventBus::with_config(config.events.bus_config());
        Self::with_event_bus(surface, config, Arc::new(bus))
    }

    pub fn with_event_bus(
        mut surface: S,
        config: &EditorConfig,
        bus: Arc<EventBus>,
    ) -> Result<Self, EditorError> {
        config.map.center.validate()?;
        surface.set_view(config.map.center, config.map.zoom);
        surface.add_layer(Layer::Tile(TileLayer::from(&config.map)));

        let mut editor = Self {
            surface,
            store: CoordinateStore::new(),
            registry: MarkerRegistry::new(&config.markers),
            path: PathRenderer::new(config.path.clone()),
            default_altitude: config.markers.default_altitude,
            dialog: None,
            bus,
        };
        editor.seed(&config.markers.seed)?;
        Ok(editor)
    }

    fn seed(&mut self, seeds: &[SeedMarker]) -> Result<(), EditorError> {
        for seed in seeds {
            seed.position.validate()?;
            check_altitude(seed.altitude)?;
        }
        for seed in seeds {
            let marker = Marker::new(seed.position, seed.altitude);
            self.store.append(marker);
            self.registry.attach(&mut self.surface, &marker);
        }
        self.path.attach(&mut self.surface, self.store.positions());
        tracing::info!("Editor started with {} seed markers", seeds.len());
        Ok(())
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &CoordinateStore {
        &self.store
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn path(&self) -> &PathRenderer {
        &self.path
    }

    /// Stored markers in sequence order.
    pub fn markers(&self) -> &[Marker] {
        self.store.list()
    }

    /// Vertices of the path as currently drawn.
    pub fn path_points(&self) -> Vec<LatLng> {
        self.path.points(&self.surface)
    }

    /// Handle labels in sequence order.
    pub fn labels(&self) -> Vec<String> {
        self.registry.labels()
    }

    pub fn open_dialog_state(&self) -> Option<OpenDialog> {
        self.dialog
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Checks the store/handles/path agreement that every completed
    /// operation must leave behind.
    pub fn is_consistent(&self) -> bool {
        let markers = self.store.list();
        let handles = self.registry.handles();
        markers.len() == handles.len()
            && self.path_points().len() == markers.len()
            && markers
                .iter()
                .zip(handles)
                .enumerate()
                .all(|(i, (m, h))| m.id == h.marker_id && h.label == i.to_string())
    }

    /// Dispatches one input event.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> Result<EventResponse, EditorError> {
        if let Some(open) = self.dialog {
            tracing::warn!(
                "Ignoring {:?} while dialog for {} is open",
                event,
                open.marker_id
            );
            return Ok(EventResponse::Ignored);
        }
        match event {
            SurfaceEvent::Click { position } => {
                self.add_marker(position)?;
                Ok(EventResponse::Handled)
            }
            SurfaceEvent::MarkerClick { id } => self.open_dialog(id).map(EventResponse::OpenDialog),
            SurfaceEvent::MarkerDrag { id, position } => {
                self.drag_marker(id, position)?;
                Ok(EventResponse::Handled)
            }
            SurfaceEvent::MarkerDragEnd { id, position } => {
                self.end_drag(id, position)?;
                Ok(EventResponse::Handled)
            }
        }
    }

    /// Appends a marker with the default altitude and extends the path.
    pub fn add_marker(&mut self, position: LatLng) -> Result<MarkerId, EditorError> {
        position.validate()?;
        let marker = Marker::new(position, self.default_altitude);

        let points = match self.path.append_point(&mut self.surface, position) {
            Ok(points) => points,
            Err(EditorError::LayerNotFound(_)) => {
                let mut points = self.store.positions();
                points.push(position);
                self.path.redraw(&mut self.surface, &points)
            }
            Err(e) => return Err(e),
        };
        let index = self.store.append(marker);
        self.registry.attach(&mut self.surface, &marker);
        tracing::debug!("{} added at index {} {}", marker.id, index, position);

        self.emit(EditorEvent::Marker(MarkerEvent::Added {
            id: marker.id,
            index,
            position,
        }));
        self.emit(EditorEvent::Path(PathEvent::Extended { points }));
        debug_assert!(self.is_consistent());
        Ok(marker.id)
    }

    /// Moves a handle mid-drag and redraws the path through the live
    /// positions. The store is not touched until the drag ends.
    pub fn drag_marker(&mut self, id: MarkerId, position: LatLng) -> Result<(), EditorError> {
        position.validate()?;
        self.registry.set_position(&mut self.surface, id, position)?;
        let points = self.path.redraw(&mut self.surface, &self.registry.live_positions());
        self.emit(EditorEvent::Path(PathEvent::Redrawn { points }));
        Ok(())
    }

    /// Commits a drag's final position into the store.
    pub fn end_drag(&mut self, id: MarkerId, position: LatLng) -> Result<usize, EditorError> {
        position.validate()?;
        let (index, marker) = self.store.find(id)?;
        let moved = marker.moved_to(position);

        self.registry.set_position(&mut self.surface, id, position)?;
        self.store.replace(index, moved)?;
        let points = self.path.redraw(&mut self.surface, &self.store.positions());
        tracing::debug!("{} drag committed at index {} {}", id, index, position);

        self.emit(EditorEvent::Marker(MarkerEvent::Moved {
            id,
            index,
            position,
        }));
        self.emit(EditorEvent::Path(PathEvent::Redrawn { points }));
        debug_assert!(self.is_consistent());
        Ok(index)
    }

    /// Writes position and altitude back to a marker.
    pub fn apply_edit(&mut self, id: MarkerId, edit: MarkerEdit) -> Result<(), EditorError> {
        edit.position.validate()?;
        check_altitude(edit.altitude)?;
        let (index, marker) = self.store.find(id)?;
        let edited = Marker {
            position: edit.position,
            altitude: edit.altitude,
            ..*marker
        };

        self.registry.set_position(&mut self.surface, id, edit.position)?;
        self.store.replace(index, edited)?;
        let points = self.path.redraw(&mut self.surface, &self.store.positions());

        self.emit(EditorEvent::Marker(MarkerEvent::Edited {
            id,
            index,
            position: edit.position,
            altitude: edit.altitude,
        }));
        self.emit(EditorEvent::Path(PathEvent::Redrawn { points }));
        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Deletes a marker, relabels the remaining handles, and recreates the
    /// path layer. Uncommitted drags of other markers are reverted.
    pub fn delete_marker(&mut self, id: MarkerId) -> Result<Marker, EditorError> {
        let (index, _) = self.store.find(id)?;
        self.registry.handle(id).ok_or(EditorError::UnknownMarker(id))?;
        self.registry.check_layers(&self.surface)?;
        self.registry.snap_to(&mut self.surface, self.store.list())?;

        let removed = self.store.remove(index)?;
        self.registry.detach(&mut self.surface, id)?;
        let relabeled = self.registry.relabel_all(&mut self.surface)?;
        let points = self.path.recreate(&mut self.surface, self.store.positions());
        tracing::debug!("{} deleted from index {}", id, index);

        self.emit(EditorEvent::Marker(MarkerEvent::Removed { id, index }));
        self.emit(EditorEvent::Marker(MarkerEvent::Relabeled { count: relabeled }));
        self.emit(EditorEvent::Path(PathEvent::Recreated { points }));
        debug_assert!(self.is_consistent());
        Ok(removed)
    }

    /// Removes all markers and every polyline, then starts a fresh empty
    /// path. Any open dialog is dropped.
    pub fn clear(&mut self) {
        let markers = self.store.len();
        self.dialog = None;
        self.registry.clear(&mut self.surface);
        self.store.clear();
        let polylines = self.path.reset(&mut self.surface);
        tracing::info!("Cleared {} markers and {} polylines", markers, polylines);

        self.emit(EditorEvent::Marker(MarkerEvent::Cleared));
        self.emit(EditorEvent::Path(PathEvent::Recreated { points: 0 }));
    }

    /// Opens the dialog for a marker and returns the snapshot to show.
    /// Drags still in flight are reverted, since their end is ignored while
    /// the dialog is open.
    pub fn open_dialog(&mut self, id: MarkerId) -> Result<MarkerDialogData, EditorError> {
        if self.dialog.is_some() {
            return Err(EditorError::DialogAlreadyOpen);
        }
        let (index, marker) = self.store.find(id)?;
        let data = MarkerDialogData::for_marker(marker, index);
        self.discard_live_drags()?;
        self.dialog = Some(OpenDialog {
            marker_id: id,
            index,
        });

        self.emit(EditorEvent::Dialog(DialogEvent::Opened { id, index }));
        Ok(data)
    }

    /// Applies the response of the open dialog. The dialog counts as closed
    /// even when the response is rejected.
    pub fn close_dialog(
        &mut self,
        response: Option<MarkerDialogData>,
    ) -> Result<DialogResolution, EditorError> {
        let open = self.dialog.take().ok_or(EditorError::NoDialogOpen)?;
        if let Some(data) = &response {
            if data.marker_id != open.marker_id {
                return Err(EditorError::StaleDialog {
                    expected: open.marker_id,
                    actual: data.marker_id,
                });
            }
        }

        let resolution = match DialogOutcome::from_response(response.as_ref())? {
            DialogOutcome::Cancelled => DialogResolution::Cancelled,
            DialogOutcome::Deleted => {
                self.warn_if_shifted(open, response.as_ref());
                self.delete_marker(open.marker_id)?;
                DialogResolution::Deleted
            }
            DialogOutcome::Edited(edit) => {
                self.warn_if_shifted(open, response.as_ref());
                self.apply_edit(open.marker_id, edit)?;
                DialogResolution::Edited
            }
        };

        self.emit(EditorEvent::Dialog(DialogEvent::Closed {
            id: open.marker_id,
            resolution,
        }));
        Ok(resolution)
    }

    /// Opens `dialog` for a marker, waits for it to close, and applies the
    /// result.
    pub async fn edit_marker(
        &mut self,
        id: MarkerId,
        dialog: &dyn EditorDialog,
    ) -> Result<DialogResolution, EditorError> {
        let request = self.open_dialog(id)?;
        let response = dialog.open(request).await;
        self.close_dialog(response)
    }

    fn discard_live_drags(&mut self) -> Result<(), EditorError> {
        let reverted = self.registry.snap_to(&mut self.surface, self.store.list())?;
        if reverted > 0 {
            let points = self.path.redraw(&mut self.surface, &self.store.positions());
            tracing::debug!("Reverted {} uncommitted drags", reverted);
            self.emit(EditorEvent::Path(PathEvent::Redrawn { points }));
        }
        Ok(())
    }

    fn warn_if_shifted(&self, open: OpenDialog, response: Option<&MarkerDialogData>) {
        let current = self.store.index_of(open.marker_id);
        let reported = response.map(|r| r.number_of_marker);
        if current != Some(open.index) || reported.is_some_and(|r| r != open.index) {
            tracing::warn!(
                "{} dialog index drifted (opened {}, reported {:?}, now {:?}); addressing by id",
                open.marker_id,
                open.index,
                reported,
                current
            );
        }
    }

    fn emit(&self, event: EditorEvent) {
        if self.bus.publish(event).is_err() {
            tracing::trace!("No listeners for editor event");
        }
    }
}

fn check_altitude(altitude: f64) -> Result<(), EditorError> {
    if altitude.is_finite() {
        Ok(())
    } else {
        Err(EditorError::InvalidAltitude(altitude))
    }
}
