use proptest::prelude::*;
use waymark_core::LatLng;
use waymark_editor::{HeadlessSurface, MapEditor};
use waymark_settings::EditorConfig;

fn empty_editor() -> MapEditor<HeadlessSurface> {
    let mut config = EditorConfig::default();
    config.markers.seed.clear();
    MapEditor::new(HeadlessSurface::new(), &config).unwrap()
}

fn coordinate() -> impl Strategy<Value = LatLng> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| LatLng::new(lat, lng))
}

proptest! {
    #[test]
    fn appends_keep_path_in_creation_order(points in prop::collection::vec(coordinate(), 0..40)) {
        let mut editor = empty_editor();
        for p in &points {
            editor.add_marker(*p).unwrap();
        }

        prop_assert_eq!(editor.path_points(), points.clone());
        prop_assert_eq!(editor.markers().len(), points.len());
        prop_assert!(editor.is_consistent());
    }

    #[test]
    fn delete_shifts_later_labels_down(
        points in prop::collection::vec(coordinate(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut editor = empty_editor();
        for p in &points {
            editor.add_marker(*p).unwrap();
        }
        let i = pick.index(points.len());
        let ids: Vec<_> = editor.markers().iter().map(|m| m.id).collect();

        editor.delete_marker(ids[i]).unwrap();

        let mut expected = points.clone();
        expected.remove(i);
        prop_assert_eq!(editor.path_points(), expected);

        for (j, id) in ids.iter().enumerate().skip(i + 1) {
            let label = editor.registry().handle(*id).unwrap().label.clone();
            prop_assert_eq!(label, (j - 1).to_string());
        }
        prop_assert!(editor.is_consistent());
    }

    #[test]
    fn drag_end_lands_at_same_ordinal(
        points in prop::collection::vec(coordinate(), 1..20),
        pick in any::<prop::sample::Index>(),
        target in coordinate(),
    ) {
        let mut editor = empty_editor();
        for p in &points {
            editor.add_marker(*p).unwrap();
        }
        let i = pick.index(points.len());
        let id = editor.markers()[i].id;

        prop_assert_eq!(editor.end_drag(id, target).unwrap(), i);
        prop_assert_eq!(editor.markers()[i].position, target);
        prop_assert_eq!(editor.path_points()[i], target);
        prop_assert_eq!(editor.path_points().len(), points.len());
    }
}
