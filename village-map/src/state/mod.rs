//! États interactifs possédés par la vue : survol et sélection

pub mod hover;
pub mod selection;

pub use hover::{HoverState, HoverTracker, HoverTransition};
pub use selection::{Selection, SelectionState};
