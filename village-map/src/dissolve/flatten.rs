//! Décomposition des multi-géométries et regroupement par district

use std::collections::BTreeMap;

use geo::Polygon;

use crate::types::VillageFeature;

/// Polygones simples regroupés par nom de district (égalité exacte)
pub type DistrictGroups = BTreeMap<String, Vec<Polygon<f64>>>;

/// Décompose chaque village en polygones simples et les regroupe par district.
///
/// Les villages sans nom de district ne participent à aucun contour.
pub fn group_by_district(villages: &[VillageFeature]) -> DistrictGroups {
    let mut groups = DistrictGroups::new();

    for village in villages {
        let Some(district) = &village.district else {
            continue;
        };
        groups
            .entry(district.clone())
            .or_default()
            .extend(village.geometry.0.iter().cloned());
    }

    // Un district dont tous les villages sont vides n'a pas de contour
    groups.retain(|_, polygons| !polygons.is_empty());
    groups
}
