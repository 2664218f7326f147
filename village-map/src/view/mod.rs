//! Composition de la vue carte
//!
//! [`MapView`] possède le moteur, le suivi du survol et la sélection. Les
//! handlers d'événements sont les seuls à muter ces deux états.

pub mod engine;
pub mod layers;
pub mod options;

use tracing::{debug, info};

use crate::classify::{classify_str, Classification};
use crate::report::ClassificationReport;
use crate::state::{HoverTracker, HoverTransition, Selection, SelectionState};
use crate::types::{VillageProps, ID_PROPERTY};
use crate::VillageMapError;

pub use engine::{ControlPosition, MapEngine, PointerEvent, PointerEventKind};
pub use layers::{layer_stack, LayerKind, LayerSpec};
pub use options::{StyleSource, ViewOptions};

use layers::{DISTRICTS_SOURCE, HIT_LAYER, HOVER_STATE, VILLAGES_SOURCE};

/// Vue carte : couches + états interactifs.
///
/// L'instance du moteur est libérée quand la vue est droppée.
pub struct MapView<E: MapEngine> {
    engine: E,
    options: ViewOptions,
    hover: HoverTracker,
    selection: SelectionState,
    classification: Option<Classification>,
    /// Posé avant la première source : une installation interrompue n'est
    /// pas rejouée sur un moteur à moitié construit
    install_started: bool,
}

impl<E: MapEngine> MapView<E> {
    /// Prend possession d'un moteur fraîchement construit et ajoute le
    /// contrôle de navigation
    pub fn new(mut engine: E, options: ViewOptions) -> Result<Self, VillageMapError> {
        engine.add_navigation_control(ControlPosition::TopLeft)?;

        Ok(Self {
            engine,
            options,
            hover: HoverTracker::new(),
            selection: SelectionState::new(),
            classification: None,
            install_started: false,
        })
    }

    /// Classe l'asset puis installe sources, couches et abonnements.
    ///
    /// L'asset est entièrement parsé avant la première couche : une erreur
    /// ici laisse la carte sans couche ni interactivité. Une fois
    /// l'installation commencée, tout nouvel appel renvoie
    /// [`VillageMapError::AlreadyLoaded`], même si elle a échoué.
    pub fn load(&mut self, asset_text: &str) -> Result<&ClassificationReport, VillageMapError> {
        if self.install_started {
            return Err(VillageMapError::AlreadyLoaded);
        }

        let classification = classify_str(asset_text)?;
        self.install_started = true;
        self.install(&classification)?;

        info!(summary = %classification.report.summary(), "Map layers installed");
        let classification = self.classification.insert(classification);
        Ok(&classification.report)
    }

    fn install(&mut self, classification: &Classification) -> Result<(), VillageMapError> {
        let with_districts = classification.has_districts();

        self.engine.add_geojson_source(
            VILLAGES_SOURCE,
            &classification.villages_geojson(),
            Some(ID_PROPERTY),
        )?;
        if with_districts {
            self.engine.add_geojson_source(
                DISTRICTS_SOURCE,
                &classification.districts_geojson(),
                None,
            )?;
        }

        for layer in layer_stack(&self.options, with_districts) {
            self.engine.add_layer(&layer)?;
        }

        for kind in PointerEventKind::ALL {
            self.engine.subscribe(kind, HIT_LAYER)?;
        }

        Ok(())
    }

    /// Traite un événement pointeur. Renvoie `true` si la sélection a changé.
    ///
    /// Les événements d'autres couches, ou reçus avant `load`, sont ignorés.
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        if self.classification.is_none() || event.layer != HIT_LAYER {
            return false;
        }

        match event.kind {
            PointerEventKind::Enter => {
                self.engine.set_cursor("pointer");
                self.hover_over(event);
                false
            }
            PointerEventKind::Move => {
                self.hover_over(event);
                false
            }
            PointerEventKind::Leave => {
                self.engine.set_cursor("");
                let transition = self.hover.pointer_leave();
                self.apply(transition);
                false
            }
            PointerEventKind::Click => match &event.properties {
                Some(properties) => self.selection.click(properties).is_some(),
                None => false,
            },
        }
    }

    fn hover_over(&mut self, event: &PointerEvent) {
        let id = event
            .properties
            .as_ref()
            .and_then(VillageProps::from_properties)
            .map(|props| props.id());
        let transition = self.hover.pointer_over(id.as_deref());
        self.apply(transition);
    }

    fn apply(&mut self, transition: HoverTransition) {
        if transition.is_noop() {
            return;
        }
        if let Some(id) = transition.unmark {
            self.engine
                .set_feature_state(VILLAGES_SOURCE, &id, HOVER_STATE, false);
        }
        if let Some(id) = transition.mark {
            self.engine
                .set_feature_state(VILLAGES_SOURCE, &id, HOVER_STATE, true);
        }
    }

    /// Ferme la carte de résumé
    pub fn dismiss(&mut self) {
        debug!("Selection dismissed");
        self.selection.dismiss();
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.current()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hover.hovered()
    }

    pub fn report(&self) -> Option<&ClassificationReport> {
        self.classification.as_ref().map(|c| &c.report)
    }

    pub fn is_loaded(&self) -> bool {
        self.classification.is_some()
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: MapEngine> Drop for MapView<E> {
    fn drop(&mut self) {
        self.engine.remove();
    }
}
