//! Tests navigateur (wasm-pack test --headless --firefox)

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

use village_map::{classify_str, ClassificationStatus, Selection, Zone};
use village_map_web::card::{SummaryCard, CARD_CLASS};
use village_map_web::legend::{render_legend, LEGEND_CLASS};
use village_map_web::log_setup_error;

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> (Document, Element) {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&container).unwrap();
    (document, container)
}

fn selection() -> Selection {
    Selection {
        id: "A-01".to_string(),
        district: "板橋區".to_string(),
        village: "中正里".to_string(),
        zone: Zone::One,
    }
}

#[wasm_bindgen_test]
fn card_hidden_until_selection() {
    let (document, container) = container();
    let card = SummaryCard::new(&document, &container, || {}).unwrap();
    assert!(!card.is_visible());

    card.render(Some(&selection()));
    assert!(card.is_visible());

    let text = card.element().text_content().unwrap();
    assert!(text.contains("板橋區｜中正里"));
    assert!(text.contains("Key：A-01"));
    assert!(text.contains("一區"));

    let link = card
        .element()
        .query_selector("a")
        .unwrap()
        .unwrap()
        .get_attribute("href")
        .unwrap();
    assert_eq!(link, "/village/A-01");

    card.render(None);
    assert!(!card.is_visible());
}

#[wasm_bindgen_test]
fn card_close_button_calls_back() {
    let (document, container) = container();
    let closed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&closed);
    let card = SummaryCard::new(&document, &container, move || counter.set(counter.get() + 1)).unwrap();
    card.render(Some(&selection()));

    let button: HtmlElement = card
        .element()
        .query_selector("button")
        .unwrap()
        .unwrap()
        .unchecked_into();
    button.click();
    assert_eq!(closed.get(), 1);
}

#[wasm_bindgen_test]
fn card_removed_on_drop() {
    let (document, container) = container();
    let card = SummaryCard::new(&document, &container, || {}).unwrap();
    drop(card);
    assert_eq!(container.get_elements_by_class_name(CARD_CLASS).length(), 0);
}

#[wasm_bindgen_test]
fn legend_lists_all_zones() {
    let (document, container) = container();
    let legend = render_legend(&document, &container).unwrap();
    assert_eq!(legend.class_name(), LEGEND_CLASS);
    assert_eq!(legend.child_element_count(), 3);

    let text = legend.text_content().unwrap();
    for zone in Zone::ALL {
        assert!(text.contains(zone.label()));
    }
}

#[wasm_bindgen_test]
fn classify_sample_in_browser() {
    let text = include_str!("../../village-map/tests/fixtures/ntpc_sample.geojson");
    let classification = classify_str(text).unwrap();
    assert_eq!(classification.villages.len(), 6);
    assert_eq!(classification.districts.len(), 3);
    assert_eq!(classification.report.status, ClassificationStatus::Complete);
    assert!(classification.report.duration_secs >= 0.0);
}

#[wasm_bindgen_test]
fn setup_error_goes_to_console_error() {
    let err = village_map::VillageMapError::AssetFetch {
        url: "/ntpc_villages.geojson".to_string(),
        status: 404,
    };
    assert!(err.is_fatal());
    log_setup_error(&err);
}
