//! Types de données pour le crate village-map

use geo::MultiPolygon;
use geojson::JsonObject;
use serde_json::Value;

use crate::zone::{classify_district, Zone};

/// Nom du district
pub const DISTRICT_NAME: &str = "ADMIT";
/// Nom du village
pub const VILLAGE_NAME: &str = "T_NAME";
/// Nom alternatif du village, utilisé si `T_NAME` est absent
pub const VILLAGE_NAME_ALT: &str = "ADMIV";
/// Identifiant du district
pub const DISTRICT_ID: &str = "ADMIT_ID";
/// Identifiant du village (unique seulement au sein d'un district)
pub const VILLAGE_ID: &str = "ADMIV_ID";

/// Propriété ajoutée : libellé de zone
pub const ZONE_PROPERTY: &str = "zone";
/// Propriété ajoutée : identifiant composite (sert de `promoteId`)
pub const ID_PROPERTY: &str = "vid";
/// Propriété ajoutée : libellé du village pour la couche de labels
pub const LABEL_PROPERTY: &str = "vlabel";

/// Lit une propriété sous forme de texte.
///
/// Chaîne non vide ou nombre : présent. Tout le reste (null, vide, booléen,
/// tableau, objet) : absent.
pub fn property_text(props: &JsonObject, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Identifiant composite `district_id-village_id`, unique sur toute la ville
pub fn composite_id(district_id: &str, village_id: &str) -> String {
    format!("{}-{}", district_id, village_id)
}

/// Les quatre propriétés identifiantes d'un village
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VillageProps {
    pub district: String,
    pub village: String,
    pub district_id: String,
    pub village_id: String,
}

impl VillageProps {
    /// Extrait les propriétés identifiantes; `None` si l'une manque
    pub fn from_properties(props: &JsonObject) -> Option<Self> {
        let district = property_text(props, DISTRICT_NAME)?;
        let village = property_text(props, VILLAGE_NAME)
            .or_else(|| property_text(props, VILLAGE_NAME_ALT))?;
        let district_id = property_text(props, DISTRICT_ID)?;
        let village_id = property_text(props, VILLAGE_ID)?;

        Some(Self {
            district,
            village,
            district_id,
            village_id,
        })
    }

    pub fn id(&self) -> String {
        composite_id(&self.district_id, &self.village_id)
    }

    pub fn zone(&self) -> Zone {
        classify_district(&self.district)
    }
}

/// Un village de l'asset, géométrie normalisée en MultiPolygon
#[derive(Debug, Clone)]
pub struct VillageFeature {
    /// Géométrie (un Polygon devient un MultiPolygon à un élément)
    pub geometry: MultiPolygon<f64>,

    /// Propriétés d'origine, inchangées
    pub properties: JsonObject,

    /// Nom du district si présent (sert au regroupement du dissolve)
    pub district: Option<String>,

    /// Zone, toujours définie (zone par défaut si le district manque)
    pub zone: Zone,

    /// Propriétés identifiantes; `None` rend le village non interactif
    pub ident: Option<VillageProps>,
}

impl VillageFeature {
    pub fn new(geometry: MultiPolygon<f64>, properties: JsonObject) -> Self {
        let district = property_text(&properties, DISTRICT_NAME);
        let zone = district
            .as_deref()
            .map(classify_district)
            .unwrap_or(Zone::Three);
        let ident = VillageProps::from_properties(&properties);

        Self {
            geometry,
            properties,
            district,
            zone,
            ident,
        }
    }

    /// Identifiant composite, si les quatre propriétés sont présentes
    pub fn id(&self) -> Option<String> {
        self.ident.as_ref().map(VillageProps::id)
    }

    /// Cliquable et survolable
    pub fn is_interactive(&self) -> bool {
        self.ident.is_some()
    }
}

/// Contour fusionné d'un district
#[derive(Debug, Clone)]
pub struct DistrictOutline {
    pub district: String,
    pub zone: Zone,
    pub geometry: MultiPolygon<f64>,
}
