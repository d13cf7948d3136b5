use std::cell::RefCell;

use async_trait::async_trait;
use waymark_core::{DialogResolution, LatLng};
use waymark_editor::{EditorDialog, HeadlessSurface, MapEditor, MarkerDialogData};
use waymark_settings::EditorConfig;

/// Dialog that answers with a fixed transformation of the request and
/// remembers what it was shown.
struct ScriptedDialog<F: Fn(MarkerDialogData) -> Option<MarkerDialogData>> {
    answer: F,
    shown: RefCell<Vec<MarkerDialogData>>,
}

impl<F: Fn(MarkerDialogData) -> Option<MarkerDialogData>> ScriptedDialog<F> {
    fn new(answer: F) -> Self {
        Self {
            answer,
            shown: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl<F: Fn(MarkerDialogData) -> Option<MarkerDialogData>> EditorDialog for ScriptedDialog<F> {
    async fn open(&self, request: MarkerDialogData) -> Option<MarkerDialogData> {
        self.shown.borrow_mut().push(request.clone());
        tokio::task::yield_now().await;
        (self.answer)(request)
    }
}

fn seeded() -> MapEditor<HeadlessSurface> {
    MapEditor::new(HeadlessSurface::new(), &EditorConfig::default()).unwrap()
}

#[tokio::test]
async fn test_altitude_only_edit_keeps_path() {
    let mut editor = seeded();
    let id = editor.markers()[0].id;
    let before = editor.path_points();

    let dialog = ScriptedDialog::new(|mut data| {
        data.alt = 420.0;
        Some(data)
    });
    let resolution = editor.edit_marker(id, &dialog).await.unwrap();

    assert_eq!(resolution, DialogResolution::Edited);
    assert_eq!(editor.markers()[0].altitude, 420.0);
    assert_eq!(editor.path_points(), before);
    assert_eq!(dialog.shown.borrow()[0].number_of_marker, 0);
    assert!(!editor.is_dialog_open());
}

#[tokio::test]
async fn test_position_edit_moves_handle_and_path() {
    let mut editor = seeded();
    let id = editor.markers()[1].id;
    let target = LatLng::new(50.42, 30.55);

    let dialog = ScriptedDialog::new(move |mut data| {
        data.lat = target.lat;
        data.lng = target.lng;
        Some(data)
    });
    editor.edit_marker(id, &dialog).await.unwrap();

    assert_eq!(editor.markers()[1].position, target);
    assert_eq!(editor.path_points()[1], target);
    assert_eq!(editor.registry().handle(id).unwrap().position, target);
}

#[tokio::test]
async fn test_delete_through_dialog() {
    let mut editor = seeded();
    let id = editor.markers()[0].id;

    let dialog = ScriptedDialog::new(|data| Some(data.into_delete()));
    let resolution = editor.edit_marker(id, &dialog).await.unwrap();

    assert_eq!(resolution, DialogResolution::Deleted);
    assert_eq!(editor.markers().len(), 2);
    assert_eq!(editor.labels(), vec!["0", "1"]);
    assert!(editor.store().index_of(id).is_none());
    assert_eq!(editor.surface().polylines().count(), 1);
}

#[tokio::test]
async fn test_dismiss_is_noop() {
    let mut editor = seeded();
    let id = editor.markers()[2].id;
    let before = editor.markers().to_vec();

    let dialog = ScriptedDialog::new(|_| None);
    let resolution = editor.edit_marker(id, &dialog).await.unwrap();

    assert_eq!(resolution, DialogResolution::Cancelled);
    assert_eq!(editor.markers(), before.as_slice());
    assert!(!editor.is_dialog_open());
}

#[tokio::test]
async fn test_invalid_edit_rejected_without_change() {
    let mut editor = seeded();
    let id = editor.markers()[0].id;
    let before = editor.markers().to_vec();

    let dialog = ScriptedDialog::new(|mut data| {
        data.lng = 200.0;
        Some(data)
    });
    assert!(editor.edit_marker(id, &dialog).await.is_err());
    assert_eq!(editor.markers(), before.as_slice());
    assert!(!editor.is_dialog_open());
}

#[test]
fn test_host_driven_dialog() {
    let mut editor = seeded();
    let id = editor.markers()[1].id;

    let request = editor.open_dialog(id).unwrap();
    let mut response = request.clone();
    response.alt = 55.5;

    assert_eq!(
        editor.close_dialog(Some(response)).unwrap(),
        DialogResolution::Edited
    );
    assert_eq!(editor.markers()[1].altitude, 55.5);
}

#[test]
fn test_dialog_addresses_marker_after_index_shift() {
    let mut editor = seeded();
    let target = editor.markers()[2].id;

    let request = editor.open_dialog(target).unwrap();
    assert_eq!(request.number_of_marker, 2);

    // Another view removes an earlier marker while the dialog is up.
    let first = editor.markers()[0].id;
    editor.delete_marker(first).unwrap();

    editor.close_dialog(Some(request.into_delete())).unwrap();
    assert!(editor.store().index_of(target).is_none());
    assert_eq!(editor.markers().len(), 1);
    assert_eq!(editor.labels(), vec!["0"]);
}
