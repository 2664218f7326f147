//! Pile de couches déclarative (de bas en haut)
//!
//! Les couches sont sérialisées telles quelles au format des couches de style
//! MapLibre. Les couleurs de zone viennent de la palette de [`Zone`], via une
//! expression évaluée par feature sur la propriété `zone`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::{DISTRICT_NAME, LABEL_PROPERTY, ZONE_PROPERTY};
use crate::view::options::ViewOptions;
use crate::zone::Zone;

pub const VILLAGES_SOURCE: &str = "villages";
pub const DISTRICTS_SOURCE: &str = "districts";

pub const BACKGROUND_LAYER: &str = "background";
pub const FILL_LAYER: &str = "village-fill";
pub const HOVER_LAYER: &str = "village-hover";
pub const HIT_LAYER: &str = "village-fill-hit";
pub const BOUNDARY_LAYER: &str = "village-boundary";
pub const DISTRICT_OUTLINE_LAYER: &str = "district-outline";
pub const DISTRICT_LABEL_LAYER: &str = "district-label";
pub const VILLAGE_LABEL_LAYER: &str = "village-label";

/// Clé de feature-state pilotant la couche de survol
pub const HOVER_STATE: &str = "hover";

/// Opacité de la couche de hit-test : quasi nulle mais pas nulle, sinon
/// certains moteurs ignorent la couche pour le hit-test
pub const HIT_OPACITY: f64 = 0.001;

/// Type de couche
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Background,
    Fill,
    Line,
    Symbol,
}

/// Une couche de style
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: &'static str,

    #[serde(rename = "type")]
    pub kind: LayerKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,

    pub paint: Value,
}

impl LayerSpec {
    fn new(id: &'static str, kind: LayerKind, source: Option<&'static str>, paint: Value) -> Self {
        Self {
            id,
            kind,
            source,
            minzoom: None,
            layout: None,
            paint,
        }
    }

    fn with_minzoom(mut self, minzoom: f64) -> Self {
        self.minzoom = Some(minzoom);
        self
    }

    fn with_layout(mut self, layout: Value) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Objet JSON passé à `map.addLayer`
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Expression `match` zone → couleur, la dernière zone servant de défaut
pub fn zone_color_expression() -> Value {
    let mut expr = vec![json!("match"), json!(["get", ZONE_PROPERTY])];
    let last = Zone::ALL.len() - 1;
    for (i, zone) in Zone::ALL.iter().enumerate() {
        if i < last {
            expr.push(json!(zone.label()));
        }
        expr.push(json!(zone.color()));
    }
    Value::Array(expr)
}

/// Construit la pile de couches. Sans districts (fusion dégradée), les
/// couches de contour et de label de district sont omises.
pub fn layer_stack(options: &ViewOptions, with_districts: bool) -> Vec<LayerSpec> {
    let mut layers = vec![
        LayerSpec::new(
            BACKGROUND_LAYER,
            LayerKind::Background,
            None,
            json!({ "background-color": options.background_color }),
        ),
        LayerSpec::new(
            FILL_LAYER,
            LayerKind::Fill,
            Some(VILLAGES_SOURCE),
            json!({
                "fill-color": zone_color_expression(),
                "fill-opacity": 0.75
            }),
        ),
        LayerSpec::new(
            HOVER_LAYER,
            LayerKind::Fill,
            Some(VILLAGES_SOURCE),
            json!({
                "fill-color": "#000000",
                "fill-opacity": [
                    "case",
                    ["boolean", ["feature-state", HOVER_STATE], false],
                    0.25,
                    0
                ]
            }),
        ),
        LayerSpec::new(
            HIT_LAYER,
            LayerKind::Fill,
            Some(VILLAGES_SOURCE),
            json!({
                "fill-color": "#000000",
                "fill-opacity": HIT_OPACITY
            }),
        ),
        LayerSpec::new(
            BOUNDARY_LAYER,
            LayerKind::Line,
            Some(VILLAGES_SOURCE),
            json!({
                "line-color": "#5b6770",
                "line-width": 0.6,
                "line-opacity": 0.7
            }),
        ),
    ];

    if with_districts {
        layers.push(LayerSpec::new(
            DISTRICT_OUTLINE_LAYER,
            LayerKind::Line,
            Some(DISTRICTS_SOURCE),
            json!({
                "line-color": "#1d2327",
                "line-width": 2.2
            }),
        ));
        layers.push(
            LayerSpec::new(
                DISTRICT_LABEL_LAYER,
                LayerKind::Symbol,
                Some(DISTRICTS_SOURCE),
                json!({
                    "text-color": "#1d2327",
                    "text-halo-color": "#ffffff",
                    "text-halo-width": 1.5
                }),
            )
            .with_layout(json!({
                "text-field": ["get", DISTRICT_NAME],
                "text-font": options.label_font,
                "text-size": 14
            }))
            .with_minzoom(options.district_label_min_zoom),
        );
    }

    layers.push(
        LayerSpec::new(
            VILLAGE_LABEL_LAYER,
            LayerKind::Symbol,
            Some(VILLAGES_SOURCE),
            json!({
                "text-color": "#333333",
                "text-halo-color": "#ffffff",
                "text-halo-width": 1
            }),
        )
        .with_layout(json!({
            "text-field": ["get", LABEL_PROPERTY],
            "text-font": options.label_font,
            "text-size": 11
        }))
        .with_minzoom(options.village_label_min_zoom),
    );

    layers
}
