use waymark_core::LatLng;
use waymark_editor::{EventResponse, HeadlessSurface, MapEditor, SurfaceEvent};
use waymark_settings::EditorConfig;

fn seeded() -> MapEditor<HeadlessSurface> {
    MapEditor::new(HeadlessSurface::new(), &EditorConfig::default()).unwrap()
}

#[test]
fn test_click_appends_fourth_marker() {
    let mut editor = seeded();
    let click = LatLng::new(50.40, 30.50);

    let response = editor
        .handle_event(SurfaceEvent::Click { position: click })
        .unwrap();
    assert_eq!(response, EventResponse::Handled);

    assert_eq!(editor.markers().len(), 4);
    let points = editor.path_points();
    assert_eq!(points.len(), 4);
    assert_eq!(points.last(), Some(&click));
    assert_eq!(editor.labels().last().map(String::as_str), Some("3"));
    assert_eq!(editor.markers()[3].altitude, 100.0);
}

#[test]
fn test_delete_second_of_four() {
    let mut editor = seeded();
    editor.add_marker(LatLng::new(50.40, 30.50)).unwrap();
    let before = editor.path_points();
    let doomed = editor.markers()[1].id;

    editor.delete_marker(doomed).unwrap();

    assert_eq!(editor.markers().len(), 3);
    assert_eq!(editor.labels(), vec!["0", "1", "2"]);
    assert_eq!(
        editor.path_points(),
        vec![before[0], before[2], before[3]]
    );
    assert!(editor.is_consistent());
}

#[test]
fn test_drag_end_commits_at_same_ordinal() {
    let mut editor = seeded();
    let id = editor.markers()[2].id;
    let target = LatLng::new(50.46, 30.60);

    editor
        .handle_event(SurfaceEvent::MarkerDrag {
            id,
            position: LatLng::new(50.455, 30.58),
        })
        .unwrap();
    editor
        .handle_event(SurfaceEvent::MarkerDragEnd {
            id,
            position: target,
        })
        .unwrap();

    assert_eq!(editor.markers()[2].position, target);
    assert_eq!(editor.markers()[2].id, id);
    assert_eq!(editor.path_points()[2], target);
    assert!(editor.is_consistent());
}

#[test]
fn test_marker_click_requests_dialog() {
    let mut editor = seeded();
    let id = editor.markers()[1].id;

    match editor.handle_event(SurfaceEvent::MarkerClick { id }).unwrap() {
        EventResponse::OpenDialog(data) => {
            assert_eq!(data.marker_id, id);
            assert_eq!(data.number_of_marker, 1);
            assert_eq!(data.lat, 50.4310);
            assert_eq!(data.lng, 30.5425);
            assert_eq!(data.alt, 100.0);
            assert!(!data.delete_marker);
        }
        other => panic!("expected dialog request, got {:?}", other),
    }
    assert!(editor.is_dialog_open());
}

#[test]
fn test_empty_seed_starts_with_empty_path() {
    let mut config = EditorConfig::default();
    config.markers.seed.clear();
    let mut editor = MapEditor::new(HeadlessSurface::new(), &config).unwrap();

    assert!(editor.path_points().is_empty());
    editor.add_marker(LatLng::new(1.0, 2.0)).unwrap();
    assert_eq!(editor.path_points(), vec![LatLng::new(1.0, 2.0)]);
    assert_eq!(editor.labels(), vec!["0"]);
}

#[test]
fn test_unknown_marker_drag_is_rejected() {
    let mut editor = seeded();
    let before = editor.path_points();
    let stranger = waymark_core::MarkerId::new();

    assert!(editor
        .handle_event(SurfaceEvent::MarkerDragEnd {
            id: stranger,
            position: LatLng::new(0.0, 0.0),
        })
        .is_err());
    assert_eq!(editor.path_points(), before);
}
