//! Liaisons vers `maplibregl` (chargé globalement par la page)

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = maplibregl)]
    pub type Map;

    #[wasm_bindgen(constructor, js_namespace = maplibregl, catch)]
    pub fn new(options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addControl)]
    pub fn add_control(this: &Map, control: &JsValue, position: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    pub fn add_source(this: &Map, id: &str, source: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    pub fn add_layer(this: &Map, layer: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = setFeatureState)]
    pub fn set_feature_state(this: &Map, feature: &JsValue, state: &JsValue);

    #[wasm_bindgen(method, js_name = getCanvas)]
    pub fn get_canvas(this: &Map) -> web_sys::HtmlElement;

    /// `map.on(event, layerId, listener)`
    #[wasm_bindgen(method, js_name = on)]
    pub fn on_layer(this: &Map, event: &str, layer: &str, listener: &Function);

    /// `map.off(event, layerId, listener)`
    #[wasm_bindgen(method, js_name = off)]
    pub fn off_layer(this: &Map, event: &str, layer: &str, listener: &Function);

    #[wasm_bindgen(method)]
    pub fn once(this: &Map, event: &str, listener: &Function);

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map);

    #[wasm_bindgen(js_namespace = maplibregl)]
    pub type NavigationControl;

    #[wasm_bindgen(constructor, js_namespace = maplibregl)]
    pub fn new() -> NavigationControl;
}

impl Map {
    /// Promesse résolue au premier événement `load` (style prêt)
    pub fn loaded_promise(&self) -> Promise {
        Promise::new(&mut |resolve, _reject| self.once("load", &resolve))
    }
}
