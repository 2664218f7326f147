//! Légende des zones

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use village_map::legend;

pub const LEGEND_CLASS: &str = "village-legend";

/// Ajoute la légende dans `container`
pub fn render_legend(document: &Document, container: &Element) -> Result<Element, JsValue> {
    let root = document.create_element("div")?;
    root.set_class_name(LEGEND_CLASS);

    for entry in legend() {
        let row = document.create_element("div")?;
        row.set_class_name("village-legend__entry");

        let swatch: HtmlElement = document.create_element("span")?.unchecked_into();
        swatch.set_class_name("village-legend__swatch");
        swatch.style().set_property("background-color", entry.color)?;

        let label = document.create_element("span")?;
        label.set_text_content(Some(entry.label));

        row.append_child(&swatch)?;
        row.append_child(&label)?;
        root.append_child(&row)?;
    }

    container.append_child(&root)?;
    Ok(root)
}
