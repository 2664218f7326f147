//! Suivi du survol : au plus une feature marquée `hover` à la fois
//!
//! Chaque transition produit un [`HoverTransition`] à appliquer au moteur
//! dans l'ordre : démarquage d'abord, marquage ensuite.

use tracing::debug;

/// État du survol
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    NoHover,
    /// Identifiant composite de la feature survolée
    Hovering(String),
}

/// Mises à jour de feature-state à appliquer au moteur
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HoverTransition {
    /// Feature à démarquer (`hover = false`), appliquée en premier
    pub unmark: Option<String>,
    /// Feature à marquer (`hover = true`)
    pub mark: Option<String>,
}

impl HoverTransition {
    /// Aucun changement de rendu
    pub fn is_noop(&self) -> bool {
        self.unmark.is_none() && self.mark.is_none()
    }
}

/// Machine à états du survol
#[derive(Debug, Default)]
pub struct HoverTracker {
    state: HoverState,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    /// Identifiant actuellement survolé
    pub fn hovered(&self) -> Option<&str> {
        match &self.state {
            HoverState::NoHover => None,
            HoverState::Hovering(id) => Some(id),
        }
    }

    /// Entrée ou déplacement du pointeur au-dessus d'une feature.
    ///
    /// `None` (feature sans identifiant complet) est ignoré.
    pub fn pointer_over(&mut self, feature_id: Option<&str>) -> HoverTransition {
        let Some(id) = feature_id else {
            return HoverTransition::default();
        };

        match &self.state {
            HoverState::Hovering(current) if current == id => HoverTransition::default(),
            HoverState::Hovering(current) => {
                let transition = HoverTransition {
                    unmark: Some(current.clone()),
                    mark: Some(id.to_string()),
                };
                debug!(from = %current, to = id, "Hover moved");
                self.state = HoverState::Hovering(id.to_string());
                transition
            }
            HoverState::NoHover => {
                debug!(to = id, "Hover started");
                self.state = HoverState::Hovering(id.to_string());
                HoverTransition {
                    unmark: None,
                    mark: Some(id.to_string()),
                }
            }
        }
    }

    /// Le pointeur quitte la couche de hit-test
    pub fn pointer_leave(&mut self) -> HoverTransition {
        match std::mem::take(&mut self.state) {
            HoverState::NoHover => HoverTransition::default(),
            HoverState::Hovering(current) => {
                debug!(from = %current, "Hover cleared");
                HoverTransition {
                    unmark: Some(current),
                    mark: None,
                }
            }
        }
    }
}
