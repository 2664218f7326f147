//! Surface du moteur de rendu consommée par la vue

use geojson::{FeatureCollection, JsonObject};

use crate::view::layers::LayerSpec;
use crate::VillageMapError;

/// Position d'un contrôle sur la carte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "top-left",
            ControlPosition::TopRight => "top-right",
            ControlPosition::BottomLeft => "bottom-left",
            ControlPosition::BottomRight => "bottom-right",
        }
    }
}

/// Événements pointeur écoutés sur une couche
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Enter,
    Move,
    Leave,
    Click,
}

impl PointerEventKind {
    pub const ALL: [PointerEventKind; 4] = [
        PointerEventKind::Enter,
        PointerEventKind::Move,
        PointerEventKind::Leave,
        PointerEventKind::Click,
    ];

    /// Nom de l'événement côté moteur
    pub fn event_name(self) -> &'static str {
        match self {
            PointerEventKind::Enter => "mouseenter",
            PointerEventKind::Move => "mousemove",
            PointerEventKind::Leave => "mouseleave",
            PointerEventKind::Click => "click",
        }
    }
}

/// Événement pointeur livré par le moteur
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Couche sur laquelle l'abonnement a été pris
    pub layer: String,
    /// Propriétés de la première feature sous le pointeur (absentes sur `Leave`)
    pub properties: Option<JsonObject>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, layer: impl Into<String>, properties: Option<JsonObject>) -> Self {
        Self {
            kind,
            layer: layer.into(),
            properties,
        }
    }
}

/// Moteur de rendu cartographique.
///
/// Les abonnements renvoient les événements via [`crate::MapView::handle`],
/// le câblage des callbacks étant à la charge de l'implémentation.
pub trait MapEngine {
    /// Ajoute le contrôle de navigation (zoom, boussole)
    fn add_navigation_control(&mut self, position: ControlPosition) -> Result<(), VillageMapError>;

    /// Ajoute une source GeoJSON. `promote_id` désigne la propriété servant
    /// d'identifiant de feature pour le feature-state.
    fn add_geojson_source(
        &mut self,
        id: &str,
        data: &FeatureCollection,
        promote_id: Option<&str>,
    ) -> Result<(), VillageMapError>;

    /// Ajoute une couche au-dessus des précédentes
    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), VillageMapError>;

    /// Positionne un drapeau de feature-state éphémère
    fn set_feature_state(&mut self, source: &str, feature_id: &str, key: &str, value: bool);

    /// Curseur du canvas (`""` pour le défaut)
    fn set_cursor(&mut self, cursor: &str);

    /// S'abonne à un événement pointeur limité à une couche
    fn subscribe(&mut self, kind: PointerEventKind, layer: &str) -> Result<(), VillageMapError>;

    /// Libère l'instance et ses abonnements. Doit être idempotent.
    fn remove(&mut self);
}
