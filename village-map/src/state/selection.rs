//! Sélection d'un village au clic (un seul emplacement, le dernier clic gagne)

use geojson::JsonObject;
use serde::Serialize;
use tracing::debug;

use crate::route;
use crate::types::VillageProps;
use crate::zone::Zone;

/// Village sélectionné
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Identifiant composite `ADMIT_ID-ADMIV_ID`
    pub id: String,
    pub district: String,
    pub village: String,
    pub zone: Zone,
}

impl Selection {
    pub fn from_props(props: &VillageProps) -> Self {
        Self {
            id: props.id(),
            district: props.district.clone(),
            village: props.village.clone(),
            zone: props.zone(),
        }
    }

    /// Lien vers la page détail (id percent-encodé)
    pub fn detail_href(&self) -> String {
        route::detail_href(&self.id)
    }
}

/// Emplacement unique de sélection
#[derive(Debug, Default)]
pub struct SelectionState {
    current: Option<Selection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Clic sur une feature. Renvoie la nouvelle sélection, ou `None` si
    /// la feature n'a pas les quatre identifiants (état inchangé).
    pub fn click(&mut self, properties: &JsonObject) -> Option<&Selection> {
        let props = VillageProps::from_properties(properties)?;
        let selection = Selection::from_props(&props);
        debug!(id = %selection.id, zone = %selection.zone, "Village selected");
        self.current = Some(selection);
        self.current.as_ref()
    }

    /// Ferme la carte de résumé. Idempotent.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn props(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn banqiao() -> JsonObject {
        props(json!({
            "ADMIT": "板橋區",
            "T_NAME": "中正里",
            "ADMIT_ID": "A",
            "ADMIV_ID": "01"
        }))
    }

    #[test]
    fn test_click_selects() {
        let mut state = SelectionState::new();
        let selection = state.click(&banqiao()).cloned().unwrap();
        assert_eq!(
            selection,
            Selection {
                id: "A-01".to_string(),
                district: "板橋區".to_string(),
                village: "中正里".to_string(),
                zone: Zone::One,
            }
        );
        assert_eq!(selection.detail_href(), "/village/A-01");
    }

    #[test]
    fn test_click_default_zone() {
        let mut state = SelectionState::new();
        let selection = state
            .click(&props(json!({
                "ADMIT": "石碇區",
                "T_NAME": "永定里",
                "ADMIT_ID": "B",
                "ADMIV_ID": "05"
            })))
            .unwrap();
        assert_eq!(selection.zone, Zone::Three);
    }

    #[test]
    fn test_incomplete_click_leaves_selection() {
        let mut state = SelectionState::new();
        state.click(&banqiao());

        for missing in ["ADMIT", "T_NAME", "ADMIT_ID", "ADMIV_ID"] {
            let mut p = banqiao();
            p.insert("ADMIV_ID".to_string(), json!("99"));
            p.remove(missing);
            assert!(state.click(&p).is_none());
            assert_eq!(state.current().unwrap().id, "A-01");
        }

        let mut empty = SelectionState::new();
        let mut p = banqiao();
        p.insert("ADMIT".to_string(), json!(""));
        assert!(empty.click(&p).is_none());
        assert!(empty.current().is_none());
    }

    #[test]
    fn test_last_click_wins() {
        let mut state = SelectionState::new();
        state.click(&banqiao());
        let mut other = banqiao();
        other.insert("ADMIV_ID".to_string(), json!("02"));
        state.click(&other);
        assert_eq!(state.current().unwrap().id, "A-02");
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut state = SelectionState::new();
        state.dismiss();
        assert!(state.current().is_none());

        state.click(&banqiao());
        state.dismiss();
        state.dismiss();
        assert!(state.current().is_none());
    }
}
