use std::sync::Arc;

use parking_lot::Mutex;
use waymark_core::{
    DialogEvent, DialogResolution, EditorEvent, EventBus, EventCategory, EventFilter, LatLng,
    MarkerEvent, PathEvent,
};
use waymark_editor::{HeadlessSurface, MapEditor};
use waymark_settings::EditorConfig;

type Recorded = Arc<Mutex<Vec<EditorEvent>>>;

fn recording_editor(filter: EventFilter) -> (MapEditor<HeadlessSurface>, Recorded) {
    let bus = Arc::new(EventBus::new());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    bus.subscribe(filter, move |event| sink.lock().push(event.clone()));
    let editor =
        MapEditor::with_event_bus(HeadlessSurface::new(), &EditorConfig::default(), bus).unwrap();
    (editor, seen)
}

#[test]
fn test_click_publishes_added_and_extended() {
    let (mut editor, seen) = recording_editor(EventFilter::All);
    let id = editor.add_marker(LatLng::new(50.40, 30.50)).unwrap();

    let events = seen.lock().clone();
    assert_eq!(
        events,
        vec![
            EditorEvent::Marker(MarkerEvent::Added {
                id,
                index: 3,
                position: LatLng::new(50.40, 30.50),
            }),
            EditorEvent::Path(PathEvent::Extended { points: 4 }),
        ]
    );
}

#[test]
fn test_delete_publishes_relabel_and_recreate() {
    let (mut editor, seen) = recording_editor(EventFilter::All);
    let id = editor.markers()[0].id;
    editor.delete_marker(id).unwrap();

    let events = seen.lock().clone();
    assert!(events.contains(&EditorEvent::Marker(MarkerEvent::Removed { id, index: 0 })));
    assert!(events.contains(&EditorEvent::Marker(MarkerEvent::Relabeled { count: 2 })));
    assert!(events.contains(&EditorEvent::Path(PathEvent::Recreated { points: 2 })));
}

#[test]
fn test_dialog_events_filtered() {
    let (mut editor, seen) =
        recording_editor(EventFilter::Categories(vec![EventCategory::Dialog]));
    let id = editor.markers()[1].id;
    editor.open_dialog(id).unwrap();
    editor.close_dialog(None).unwrap();

    assert_eq!(
        seen.lock().clone(),
        vec![
            EditorEvent::Dialog(DialogEvent::Opened { id, index: 1 }),
            EditorEvent::Dialog(DialogEvent::Closed {
                id,
                resolution: DialogResolution::Cancelled,
            }),
        ]
    );
}

#[test]
fn test_journal_sized_from_config() {
    let mut config = EditorConfig::default();
    config.events.journal_size = 3;
    let mut editor = MapEditor::new(HeadlessSurface::new(), &config).unwrap();
    assert_eq!(editor.event_bus().config().journal_size, 3);

    let id = editor.add_marker(LatLng::new(50.40, 30.50)).unwrap();
    editor.delete_marker(id).unwrap();

    assert_eq!(
        editor.event_bus().journal(),
        vec![
            EditorEvent::Marker(MarkerEvent::Removed { id, index: 3 }),
            EditorEvent::Marker(MarkerEvent::Relabeled { count: 3 }),
            EditorEvent::Path(PathEvent::Recreated { points: 3 }),
        ]
    );
}

#[test]
fn test_journal_off_by_default() {
    let mut editor = MapEditor::new(HeadlessSurface::new(), &EditorConfig::default()).unwrap();
    editor.add_marker(LatLng::new(50.40, 30.50)).unwrap();
    assert!(editor.event_bus().journal().is_empty());
}

#[tokio::test]
async fn test_receiver_sees_editor_events() {
    let mut editor = MapEditor::new(HeadlessSurface::new(), &EditorConfig::default()).unwrap();
    let mut receiver = editor.event_bus().receiver();

    editor.clear();

    assert_eq!(
        receiver.recv().await.unwrap(),
        EditorEvent::Marker(MarkerEvent::Cleared)
    );
    assert_eq!(
        receiver.recv().await.unwrap(),
        EditorEvent::Path(PathEvent::Recreated { points: 0 })
    );
}
