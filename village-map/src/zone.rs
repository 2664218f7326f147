//! Classement des districts en zones et palette associée
//!
//! Une seule fonction ([`classify_district`]) décide de la zone d'un district.
//! Elle est utilisée à la fois pour la couleur de remplissage des villages, le
//! tag des contours de districts et la sélection au clic : les trois ne peuvent
//! donc pas diverger.

use serde::{Deserialize, Serialize};

/// Districts de la zone 1 (noyau urbain)
pub const ZONE_ONE_DISTRICTS: &[&str] = &[
    "板橋區", "三重區", "中和區", "永和區", "新莊區", "新店區", "土城區", "蘆洲區", "樹林區",
    "汐止區",
];

/// Districts de la zone 2 (première couronne)
pub const ZONE_TWO_DISTRICTS: &[&str] = &[
    "三峽區", "鶯歌區", "淡水區", "林口區", "五股區", "泰山區", "八里區",
];

/// Zone d'un district
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "一區")]
    One,
    #[serde(rename = "二區")]
    Two,
    /// Zone par défaut : tout district absent des deux listes
    #[serde(rename = "三區")]
    Three,
}

impl Zone {
    /// Toutes les zones, dans l'ordre de la légende
    pub const ALL: [Zone; 3] = [Zone::One, Zone::Two, Zone::Three];

    /// Libellé affiché (et valeur de la propriété `zone` des features)
    pub fn label(self) -> &'static str {
        match self {
            Zone::One => "一區",
            Zone::Two => "二區",
            Zone::Three => "三區",
        }
    }

    /// Couleur de remplissage (hex)
    pub fn color(self) -> &'static str {
        match self {
            Zone::One => "#f4a261",
            Zone::Two => "#2a9d8f",
            Zone::Three => "#8ab17d",
        }
    }

    /// Retrouve une zone depuis son libellé
    pub fn from_label(label: &str) -> Option<Zone> {
        Zone::ALL.into_iter().find(|z| z.label() == label)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Zone d'un district d'après son nom. Fonction totale.
pub fn classify_district(district_name: &str) -> Zone {
    if ZONE_ONE_DISTRICTS.contains(&district_name) {
        Zone::One
    } else if ZONE_TWO_DISTRICTS.contains(&district_name) {
        Zone::Two
    } else {
        Zone::Three
    }
}

/// Entrée de légende
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Légende complète, dérivée de la palette
pub fn legend() -> Vec<LegendEntry> {
    Zone::ALL
        .into_iter()
        .map(|zone| LegendEntry {
            label: zone.label(),
            color: zone.color(),
        })
        .collect()
}
