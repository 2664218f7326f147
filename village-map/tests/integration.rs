//! Tests d'intégration : asset d'exemple → vue carte → sélection → route détail

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use geojson::{FeatureCollection, JsonObject};
use serde_json::json;
use village_map::route;
use village_map::view::layers::{DISTRICTS_SOURCE, HIT_LAYER, VILLAGES_SOURCE};
use village_map::view::{ControlPosition, LayerSpec};
use village_map::{
    ClassificationStatus, MapEngine, MapView, PointerEvent, PointerEventKind, VillageMapError,
    ViewOptions, Zone,
};

const SAMPLE: &str = include_str!("fixtures/ntpc_sample.geojson");

#[derive(Default)]
struct Calls {
    controls: Vec<ControlPosition>,
    sources: HashMap<String, (FeatureCollection, Option<String>)>,
    layers: Vec<serde_json::Value>,
    hover: HashMap<String, bool>,
    removed: bool,
}

#[derive(Clone, Default)]
struct FakeEngine(Rc<RefCell<Calls>>);

impl MapEngine for FakeEngine {
    fn add_navigation_control(&mut self, position: ControlPosition) -> Result<(), VillageMapError> {
        self.0.borrow_mut().controls.push(position);
        Ok(())
    }

    fn add_geojson_source(
        &mut self,
        id: &str,
        data: &FeatureCollection,
        promote_id: Option<&str>,
    ) -> Result<(), VillageMapError> {
        self.0.borrow_mut().sources.insert(
            id.to_string(),
            (data.clone(), promote_id.map(str::to_string)),
        );
        Ok(())
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), VillageMapError> {
        self.0.borrow_mut().layers.push(layer.to_json());
        Ok(())
    }

    fn set_feature_state(&mut self, source: &str, feature_id: &str, key: &str, value: bool) {
        assert_eq!(source, VILLAGES_SOURCE);
        assert_eq!(key, "hover");
        self.0
            .borrow_mut()
            .hover
            .insert(feature_id.to_string(), value);
    }

    fn set_cursor(&mut self, _cursor: &str) {}

    fn subscribe(&mut self, _kind: PointerEventKind, _layer: &str) -> Result<(), VillageMapError> {
        Ok(())
    }

    fn remove(&mut self) {
        self.0.borrow_mut().removed = true;
    }
}

/// Propriétés d'une feature de l'asset, comme les livrerait le moteur
fn feature_properties(index: usize) -> Option<JsonObject> {
    let value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
    value["features"][index]["properties"].as_object().cloned()
}

fn marked(engine: &FakeEngine) -> Vec<String> {
    let mut ids: Vec<String> = engine
        .0
        .borrow()
        .hover
        .iter()
        .filter(|(_, on)| **on)
        .map(|(id, _)| id.clone())
        .collect();
    ids.sort();
    ids
}

#[test]
fn test_load_sample_asset() {
    let engine = FakeEngine::default();
    let mut view = MapView::new(engine.clone(), ViewOptions::default()).unwrap();
    let report = view.load(SAMPLE).unwrap().clone();

    assert_eq!(report.status, ClassificationStatus::Complete);
    assert_eq!(report.villages, 6);
    assert_eq!(report.non_interactive, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 6);
    assert_eq!(report.districts, 3);

    let calls = engine.0.borrow();
    assert_eq!(calls.controls, vec![ControlPosition::TopLeft]);

    let (villages, promote) = &calls.sources[VILLAGES_SOURCE];
    assert_eq!(promote.as_deref(), Some("vid"));
    assert_eq!(villages.features.len(), 6);

    // Chaque village porte la zone de son district
    let zones: Vec<_> = villages
        .features
        .iter()
        .map(|f| f.property("zone").cloned())
        .collect();
    assert_eq!(
        zones,
        vec![
            Some(json!("一區")),
            Some(json!("一區")),
            Some(json!("二區")),
            Some(json!("三區")),
            Some(json!("三區")),
            Some(json!("三區")),
        ]
    );

    let (districts, _) = &calls.sources[DISTRICTS_SOURCE];
    let names: Vec<_> = districts
        .features
        .iter()
        .map(|f| f.property("ADMIT").cloned())
        .collect();
    assert!(names.contains(&Some(json!("板橋區"))));
    assert!(names.contains(&Some(json!("三峽區"))));
    assert!(names.contains(&Some(json!("石碇區"))));

    assert_eq!(calls.layers.len(), 8);
    assert_eq!(calls.layers[3]["id"], HIT_LAYER);
}

#[test]
fn test_numeric_and_fallback_names() {
    let engine = FakeEngine::default();
    let mut view = MapView::new(engine.clone(), ViewOptions::default()).unwrap();
    view.load(SAMPLE).unwrap();

    let calls = engine.0.borrow();
    let (villages, _) = &calls.sources[VILLAGES_SOURCE];

    // T_NAME absent : repli sur ADMIV
    assert_eq!(villages.features[1].property("vlabel"), Some(&json!("留侯里")));
    // ADMIV_ID numérique
    assert_eq!(villages.features[2].property("vid"), Some(&json!("65000130-7")));
}

#[test]
fn test_hover_never_marks_two_villages() {
    let engine = FakeEngine::default();
    let mut view = MapView::new(engine.clone(), ViewOptions::default()).unwrap();
    view.load(SAMPLE).unwrap();

    let sequence = [
        (PointerEventKind::Enter, Some(0)),
        (PointerEventKind::Move, Some(0)),
        (PointerEventKind::Move, Some(1)),
        (PointerEventKind::Move, Some(4)),
        (PointerEventKind::Move, Some(2)),
        (PointerEventKind::Leave, None),
        (PointerEventKind::Enter, Some(3)),
    ];

    for (kind, index) in sequence {
        let event = PointerEvent::new(kind, HIT_LAYER, index.and_then(feature_properties));
        view.handle(&event);
        assert!(marked(&engine).len() <= 1);
    }

    assert_eq!(marked(&engine), vec!["65000200-004".to_string()]);
    assert_eq!(view.hovered(), Some("65000200-004"));
}

#[test]
fn test_click_to_detail_route() {
    let engine = FakeEngine::default();
    let mut view = MapView::new(engine.clone(), ViewOptions::default()).unwrap();
    view.load(SAMPLE).unwrap();

    assert!(view.handle(&PointerEvent::new(
        PointerEventKind::Click,
        HIT_LAYER,
        feature_properties(0)
    )));
    let selection = view.selection().unwrap().clone();
    assert_eq!(selection.district, "板橋區");
    assert_eq!(selection.village, "中正里");
    assert_eq!(selection.zone, Zone::One);
    assert_eq!(selection.id, "65000010-001");

    let href = selection.detail_href();
    assert_eq!(href, "/village/65000010-001");
    assert_eq!(route::parse_detail_path(&href).unwrap(), selection.id);

    // Village non interactif : la sélection précédente reste
    assert!(!view.handle(&PointerEvent::new(
        PointerEventKind::Click,
        HIT_LAYER,
        feature_properties(4)
    )));
    assert_eq!(view.selection().unwrap().id, "65000010-001");

    // Le dernier clic gagne
    assert!(view.handle(&PointerEvent::new(
        PointerEventKind::Click,
        HIT_LAYER,
        feature_properties(3)
    )));
    assert_eq!(view.selection().unwrap().zone, Zone::Three);

    view.dismiss();
    view.dismiss();
    assert!(view.selection().is_none());
}

#[test]
fn test_teardown_releases_engine() {
    let engine = FakeEngine::default();
    {
        let mut view = MapView::new(engine.clone(), ViewOptions::default()).unwrap();
        view.load(SAMPLE).unwrap();
    }
    assert!(engine.0.borrow().removed);
}

#[test]
fn test_not_a_feature_collection() {
    let engine = FakeEngine::default();
    let mut view = MapView::new(engine.clone(), ViewOptions::default()).unwrap();
    let err = view
        .load(r#"{"type": "Point", "coordinates": [0, 0]}"#)
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(engine.0.borrow().sources.is_empty());
    assert!(engine.0.borrow().layers.is_empty());
}
