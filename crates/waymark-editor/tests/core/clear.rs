use waymark_core::LatLng;
use waymark_editor::{HeadlessSurface, Layer, MapEditor, MapSurface, PolylineLayer};
use waymark_settings::{EditorConfig, PathStyle};

#[test]
fn test_clear_then_click_starts_fresh_path() {
    let mut editor = MapEditor::new(HeadlessSurface::new(), &EditorConfig::default()).unwrap();
    editor.surface_mut().add_layer(Layer::Polyline(PolylineLayer {
        points: vec![LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)],
        style: PathStyle::default(),
    }));

    editor.clear();

    assert!(editor.markers().is_empty());
    assert!(editor.registry().is_empty());
    assert_eq!(editor.surface().markers().count(), 0);
    assert_eq!(editor.surface().polylines().count(), 1);
    assert!(editor.path_points().is_empty());
    assert_eq!(editor.surface().tiles().count(), 1);

    let click = LatLng::new(50.40, 30.50);
    editor.add_marker(click).unwrap();
    assert_eq!(editor.path_points(), vec![click]);
    assert_eq!(editor.labels(), vec!["0"]);
    assert!(editor.is_consistent());
}

#[test]
fn test_clear_twice_is_harmless() {
    let mut editor = MapEditor::new(HeadlessSurface::new(), &EditorConfig::default()).unwrap();
    editor.clear();
    editor.clear();
    assert_eq!(editor.surface().polylines().count(), 1);
    assert!(editor.is_consistent());
}

#[test]
fn test_clear_drops_open_dialog() {
    let mut editor = MapEditor::new(HeadlessSurface::new(), &EditorConfig::default()).unwrap();
    let id = editor.markers()[0].id;
    editor.open_dialog(id).unwrap();

    editor.clear();

    assert!(!editor.is_dialog_open());
    editor.add_marker(LatLng::new(50.40, 30.50)).unwrap();
    assert_eq!(editor.markers().len(), 1);
}
