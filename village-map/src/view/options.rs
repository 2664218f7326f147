//! Options de la vue carte

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::asset::DEFAULT_ASSET_URL;

/// Glyphs publics pour les labels quand le style est embarqué
pub const DEFAULT_GLYPHS: &str = "https://demotiles.maplibre.org/font/{fontstack}/{range}.pbf";

/// Style passé au constructeur de la carte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyleSource {
    /// URL d'un style distant
    Remote { url: String },
    /// Style minimal embarqué : aucune source, seulement les glyphs
    Inline { glyphs: String },
}

impl Default for StyleSource {
    fn default() -> Self {
        StyleSource::Inline {
            glyphs: DEFAULT_GLYPHS.to_string(),
        }
    }
}

impl StyleSource {
    /// Descripteur accepté par `new maplibregl.Map({ style })`
    pub fn descriptor(&self) -> Value {
        match self {
            StyleSource::Remote { url } => Value::String(url.clone()),
            StyleSource::Inline { glyphs } => json!({
                "version": 8,
                "glyphs": glyphs,
                "sources": {},
                "layers": []
            }),
        }
    }
}

/// Options de la vue, toutes avec une valeur par défaut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub style: StyleSource,

    /// Centre initial `[lng, lat]`
    pub center: [f64; 2],
    pub zoom: f64,

    /// URL de l'asset GeoJSON des villages
    pub asset_url: String,

    /// Couleur de la couche de fond (remplace le fond de carte)
    pub background_color: String,

    /// Zoom minimal des labels de districts
    pub district_label_min_zoom: f64,

    /// Zoom minimal des labels de villages (plus élevé que celui des districts)
    pub village_label_min_zoom: f64,

    /// Police des labels (fontstack des glyphs)
    pub label_font: Vec<String>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            style: StyleSource::default(),
            center: [121.48, 25.02],
            zoom: 9.5,
            asset_url: DEFAULT_ASSET_URL.to_string(),
            background_color: "#eef1f4".to_string(),
            district_label_min_zoom: 10.5,
            village_label_min_zoom: 13.0,
            label_font: vec!["Open Sans Semibold".to_string()],
        }
    }
}
