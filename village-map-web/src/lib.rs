//! # village-map-web
//!
//! Point d'entrée WebAssembly : monte la carte des villages dans un conteneur
//! de la page, charge l'asset et relie les événements MapLibre à la vue.
//!
//! ```js
//! import init, { mount } from "./pkg/village_map_web.js";
//! await init();
//! const app = await mount("map", options);
//! // ...
//! app.destroy();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Promise;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Response};

use village_map::asset;
use village_map::{MapView, PointerEvent, ViewOptions, VillageMapError};

pub mod card;
pub mod console;
pub mod engine;
pub mod legend;
pub mod maplibre;

use card::SummaryCard;
use engine::{engine_error, to_js, EventSink, MaplibreEngine};
use maplibre::Map;

#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => ($crate::console::log(&format!($($t)*)))
}

use std::sync::Once;
static INIT: Once = Once::new();

#[wasm_bindgen(start)]
pub fn start() {
    INIT.call_once(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log!("village-map module initialized");
    });
}

fn js_error(error: VillageMapError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[derive(Serialize)]
struct MapOptions<'a> {
    container: &'a str,
    style: serde_json::Value,
    center: [f64; 2],
    zoom: f64,
}

/// Télécharge l'asset. Un statut HTTP hors 2xx est fatal.
async fn fetch_text(url: &str) -> Result<String, VillageMapError> {
    let window = web_sys::window().ok_or_else(|| VillageMapError::engine("no window"))?;

    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(engine_error)?
        .dyn_into()
        .map_err(engine_error)?;
    asset::check_status(url, response.status())?;

    let text = JsFuture::from(response.text().map_err(engine_error)?)
        .await
        .map_err(engine_error)?;
    text.as_string()
        .ok_or_else(|| VillageMapError::invalid_asset("response body is not text"))
}

struct AppInner {
    view: RefCell<Option<MapView<MaplibreEngine>>>,
    card: SummaryCard,
    legend: Element,
}

impl AppInner {
    fn dispatch(&self, event: PointerEvent) {
        let changed = match self.view.try_borrow_mut() {
            Ok(mut view) => view.as_mut().map_or(false, |v| v.handle(&event)),
            Err(_) => false,
        };
        if changed {
            self.render_card();
        }
    }

    fn dismiss(&self) {
        if let Ok(mut view) = self.view.try_borrow_mut() {
            if let Some(view) = view.as_mut() {
                view.dismiss();
            }
        }
        self.render_card();
    }

    fn render_card(&self) {
        let view = self.view.borrow();
        let selection = view.as_ref().and_then(|v| v.selection());
        self.card.render(selection);
    }

    fn teardown(&self) {
        // Drop de la vue : retire la carte et ses listeners
        self.view.borrow_mut().take();
        self.card.render(None);
        self.legend.remove();
    }
}

/// Carte montée dans la page
#[wasm_bindgen]
pub struct VillageMapApp {
    inner: Rc<AppInner>,
}

#[wasm_bindgen]
impl VillageMapApp {
    /// Identifiant composite du village sélectionné
    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> Option<String> {
        let view = self.inner.view.borrow();
        view.as_ref()
            .and_then(|v| v.selection())
            .map(|s| s.id.clone())
    }

    /// Rapport de classification (objet JS), `undefined` si l'asset n'a pas
    /// pu être chargé
    pub fn report(&self) -> Result<JsValue, JsValue> {
        let view = self.inner.view.borrow();
        match view.as_ref().and_then(|v| v.report()) {
            Some(report) => to_js(report).map_err(js_error),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn dismiss(&self) {
        self.inner.dismiss();
    }

    /// Libère la carte, ses abonnements et les éléments ajoutés
    pub fn destroy(&self) {
        self.inner.teardown();
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Erreur d'initialisation irrécupérable : la carte reste sans couche
pub fn log_setup_error(error: &dyn std::fmt::Display) {
    console::error(&format!("Map setup aborted: {}", error));
}

/// Monte la carte dans l'élément `container_id`.
///
/// `options` suit `ViewOptions` (champs absents = défauts). Si l'asset ne
/// peut pas être chargé, l'erreur est loggée et la carte reste sans couche.
#[wasm_bindgen]
pub async fn mount(container_id: String, options: JsValue) -> Result<VillageMapApp, JsValue> {
    let options: ViewOptions = if options.is_undefined() || options.is_null() {
        ViewOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    let document = document()?;
    let container = document
        .get_element_by_id(&container_id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", container_id)))?;

    let map = Map::new(
        &to_js(&MapOptions {
            container: &container_id,
            style: options.style.descriptor(),
            center: options.center,
            zoom: options.zoom,
        })
        .map_err(js_error)?,
    )?;
    let loaded: Promise = map.loaded_promise();

    let sink: EventSink = Rc::new(RefCell::new(None));
    let engine = MaplibreEngine::new(map, Rc::clone(&sink));
    let view = MapView::new(engine, options.clone()).map_err(js_error)?;

    // Les callbacks ne tiennent qu'une référence faible vers l'application
    let slot: Rc<RefCell<Weak<AppInner>>> = Rc::new(RefCell::new(Weak::new()));
    let card = {
        let slot = Rc::clone(&slot);
        SummaryCard::new(&document, &container, move || {
            let app = slot.borrow().upgrade();
            if let Some(app) = app {
                app.dismiss();
            }
        })?
    };
    let legend = legend::render_legend(&document, &container)?;

    let inner = Rc::new(AppInner {
        view: RefCell::new(Some(view)),
        card,
        legend,
    });
    *slot.borrow_mut() = Rc::downgrade(&inner);
    let app = Rc::downgrade(&inner);
    let handler: Rc<dyn Fn(PointerEvent)> = Rc::new(move |event: PointerEvent| {
        if let Some(app) = app.upgrade() {
            app.dispatch(event);
        }
    });
    *sink.borrow_mut() = Some(handler);

    JsFuture::from(loaded).await?;

    match fetch_text(&options.asset_url).await {
        Ok(text) => {
            let mut view = inner.view.borrow_mut();
            if let Some(view) = view.as_mut() {
                match view.load(&text) {
                    Ok(report) => console_log!("{}", report.summary()),
                    Err(e) => log_setup_error(&e),
                }
            }
        }
        Err(e) => log_setup_error(&e),
    }

    Ok(VillageMapApp { inner })
}
