//! # Waymark Editor
//!
//! Keeps an ordered set of map markers, their on-map handles, and the
//! directional path through them in agreement while the user clicks, drags,
//! edits, and deletes.
//!
//! ## Architecture
//!
//! ```text
//! MapEditor
//!   ├── CoordinateStore (ordered markers, the only owned state)
//!   ├── MarkerRegistry  (one labeled, draggable handle per marker)
//!   ├── PathRenderer    (one arrowed polyline through all markers)
//!   └── MapSurface      (host widget: layers in, pointer events out)
//!
//! EditorDialog (host modal: snapshot in, edit/delete/cancel out)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use waymark_editor::{HeadlessSurface, MapEditor, SurfaceEvent};
//! use waymark_core::LatLng;
//! use waymark_settings::EditorConfig;
//!
//! let mut editor = MapEditor::new(HeadlessSurface::new(), &EditorConfig::default())?;
//! editor.handle_event(SurfaceEvent::Click { position: LatLng::new(50.40, 30.50) })?;
//! assert_eq!(editor.path_points().len(), 4);
//! ```

pub mod dialog;
pub mod editor;
pub mod path;
pub mod registry;
pub mod store;
pub mod surface;

pub use dialog::{DialogOutcome, EditorDialog, MarkerDialogData, MarkerEdit};
pub use editor::{EventResponse, MapEditor, OpenDialog, SurfaceEvent};
pub use path::PathRenderer;
pub use registry::{MarkerHandle, MarkerIcon, MarkerRegistry};
pub use store::{CoordinateStore, Marker, MarkerService};
pub use surface::{HeadlessSurface, Layer, MapSurface, MarkerLayer, PolylineLayer, TileLayer};
