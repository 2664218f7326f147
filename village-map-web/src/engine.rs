//! `MapEngine` au-dessus de `maplibregl.Map`
//!
//! Les closures JS des abonnements appartiennent au moteur et sont
//! détachées puis libérées par `remove`.

use std::cell::RefCell;
use std::rc::Rc;

use geojson::{FeatureCollection, JsonObject};
use js_sys::{Array, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use village_map::view::{ControlPosition, LayerSpec, MapEngine, PointerEvent, PointerEventKind};
use village_map::VillageMapError;

use crate::maplibre::{Map, NavigationControl};

/// Destination des événements pointeur, branchée après la construction de la vue
pub type EventSink = Rc<RefCell<Option<Rc<dyn Fn(PointerEvent)>>>>;

struct Listener {
    event: &'static str,
    layer: String,
    closure: Closure<dyn FnMut(JsValue)>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeoJsonSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    data: &'a FeatureCollection,
    #[serde(skip_serializing_if = "Option::is_none")]
    promote_id: Option<&'a str>,
}

#[derive(Serialize)]
struct FeatureRef<'a> {
    source: &'a str,
    id: &'a str,
}

pub struct MaplibreEngine {
    map: Option<Map>,
    sink: EventSink,
    listeners: Vec<Listener>,
}

impl MaplibreEngine {
    pub fn new(map: Map, sink: EventSink) -> Self {
        Self {
            map: Some(map),
            sink,
            listeners: Vec::new(),
        }
    }

    pub fn map(&self) -> Option<&Map> {
        self.map.as_ref()
    }

    fn live_map(&self) -> Result<&Map, VillageMapError> {
        self.map
            .as_ref()
            .ok_or_else(|| VillageMapError::engine("map already removed"))
    }
}

/// Sérialise vers un objet JS simple (pas de `Map` JS pour les objets)
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, VillageMapError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| VillageMapError::engine(e.to_string()))
}

pub fn engine_error(error: JsValue) -> VillageMapError {
    VillageMapError::engine(
        error
            .as_string()
            .unwrap_or_else(|| format!("{:?}", error)),
    )
}

/// Propriétés de la première feature d'un événement de couche
fn first_feature_properties(event: &JsValue) -> Option<JsonObject> {
    let features: Array = Reflect::get(event, &JsValue::from_str("features"))
        .ok()?
        .dyn_into()
        .ok()?;
    let properties = Reflect::get(&features.get(0), &JsValue::from_str("properties")).ok()?;
    serde_wasm_bindgen::from_value(properties).ok()
}

impl MapEngine for MaplibreEngine {
    fn add_navigation_control(&mut self, position: ControlPosition) -> Result<(), VillageMapError> {
        let control = NavigationControl::new();
        self.live_map()?
            .add_control(&control, position.as_str())
            .map_err(engine_error)?;
        Ok(())
    }

    fn add_geojson_source(
        &mut self,
        id: &str,
        data: &FeatureCollection,
        promote_id: Option<&str>,
    ) -> Result<(), VillageMapError> {
        let source = to_js(&GeoJsonSource {
            kind: "geojson",
            data,
            promote_id,
        })?;
        self.live_map()?
            .add_source(id, &source)
            .map_err(engine_error)?;
        Ok(())
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), VillageMapError> {
        let layer = to_js(layer)?;
        self.live_map()?.add_layer(&layer).map_err(engine_error)?;
        Ok(())
    }

    fn set_feature_state(&mut self, source: &str, feature_id: &str, key: &str, value: bool) {
        let Some(map) = &self.map else {
            return;
        };

        let mut state = serde_json::Map::new();
        state.insert(key.to_string(), serde_json::Value::Bool(value));

        match (
            to_js(&FeatureRef {
                source,
                id: feature_id,
            }),
            to_js(&state),
        ) {
            (Ok(feature), Ok(state)) => map.set_feature_state(&feature, &state),
            (Err(e), _) | (_, Err(e)) => {
                crate::console::warn(&format!("setFeatureState failed: {}", e))
            }
        }
    }

    fn set_cursor(&mut self, cursor: &str) {
        if let Some(map) = &self.map {
            let _ = map.get_canvas().style().set_property("cursor", cursor);
        }
    }

    fn subscribe(&mut self, kind: PointerEventKind, layer: &str) -> Result<(), VillageMapError> {
        let map = self.live_map()?;

        let sink = Rc::clone(&self.sink);
        let layer_id = layer.to_string();
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let properties = match kind {
                PointerEventKind::Leave => None,
                _ => first_feature_properties(&event),
            };
            let event = PointerEvent::new(kind, layer_id.clone(), properties);

            let handler = sink.borrow().clone();
            if let Some(handler) = handler {
                handler(event);
            }
        });

        map.on_layer(kind.event_name(), layer, closure.as_ref().unchecked_ref());
        self.listeners.push(Listener {
            event: kind.event_name(),
            layer: layer.to_string(),
            closure,
        });
        Ok(())
    }

    fn remove(&mut self) {
        let Some(map) = self.map.take() else {
            return;
        };

        for listener in self.listeners.drain(..) {
            map.off_layer(
                listener.event,
                &listener.layer,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
        self.sink.borrow_mut().take();
        map.remove();
    }
}

impl Drop for MaplibreEngine {
    fn drop(&mut self) {
        self.remove();
    }
}
