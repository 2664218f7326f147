//! Fusion des villages en contours de districts
//!
//! Chaîne de contrats : principal, puis legacy, puis dégradation (aucun contour).

pub mod contract;
pub mod flatten;

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use tracing::warn;

use crate::types::{DistrictOutline, VillageFeature};
use crate::zone::classify_district;
use crate::VillageMapError;

pub use contract::{MergeContract, PairwiseUnion, UnaryUnion};
pub use flatten::{group_by_district, DistrictGroups};

/// Résultat de la fusion
#[derive(Debug, Default)]
pub struct DissolveOutcome {
    /// Contours, triés par nom de district. Vide si tous les contrats ont échoué.
    pub districts: Vec<DistrictOutline>,

    /// Contrat ayant abouti (`None` = dégradé)
    pub contract: Option<&'static str>,

    /// Échecs des contrats essayés avant celui qui a abouti
    pub errors: Vec<VillageMapError>,

    /// Districts écartés car leur union est vide
    pub empty_districts: Vec<String>,
}

impl DissolveOutcome {
    /// Vrai si aucun contrat n'a abouti
    pub fn is_degraded(&self) -> bool {
        self.contract.is_none()
    }
}

/// Fusionne avec la chaîne par défaut (union n-aire puis pairwise)
pub fn dissolve(villages: &[VillageFeature]) -> DissolveOutcome {
    dissolve_chain(villages, &[&UnaryUnion, &PairwiseUnion])
}

/// Essaie chaque contrat dans l'ordre jusqu'au premier qui aboutit
pub fn dissolve_chain(
    villages: &[VillageFeature],
    contracts: &[&dyn MergeContract],
) -> DissolveOutcome {
    let groups = group_by_district(villages);
    let mut outcome = DissolveOutcome::default();

    if groups.is_empty() {
        outcome.contract = contracts.first().map(|c| c.name());
        return outcome;
    }

    for contract in contracts {
        match dissolve_with(*contract, &groups) {
            Ok((districts, empty)) => {
                outcome.districts = districts;
                outcome.empty_districts = empty;
                outcome.contract = Some(contract.name());
                return outcome;
            }
            Err(e) => {
                warn!(contract = contract.name(), error = %e, "Dissolve contract failed");
                outcome.errors.push(e);
            }
        }
    }

    warn!("All dissolve contracts failed, district outlines omitted");
    outcome
}

/// Applique un contrat à tous les districts. Le premier refus d'un contrat
/// l'écarte ; en natif, une panique de la bibliothèque géométrique devient
/// aussi une erreur.
fn dissolve_with(
    contract: &dyn MergeContract,
    groups: &DistrictGroups,
) -> Result<(Vec<DistrictOutline>, Vec<String>), VillageMapError> {
    let merged = panic::catch_unwind(AssertUnwindSafe(|| {
        groups
            .par_iter()
            .map(|(district, polygons)| {
                contract
                    .merge(polygons)
                    .map(|geometry| (district.clone(), geometry))
            })
            .collect::<Result<Vec<_>, _>>()
    }))
    .map_err(|payload| VillageMapError::dissolve(contract.name(), panic_message(&payload)))??;

    let mut districts = Vec::with_capacity(merged.len());
    let mut empty = Vec::new();

    for (district, geometry) in merged {
        if geometry.0.is_empty() {
            warn!(district = %district, "Empty union, district outline dropped");
            empty.push(district);
            continue;
        }
        districts.push(DistrictOutline {
            zone: classify_district(&district),
            district,
            geometry,
        });
    }

    Ok((districts, empty))
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic in geometry library".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Coord, LineString, MultiPolygon, Polygon};
    use geojson::JsonObject;
    use serde_json::json;

    /// Panique, comme une bibliothèque sur une entrée incompatible
    struct Broken;

    impl MergeContract for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn merge(&self, _polygons: &[Polygon<f64>]) -> Result<MultiPolygon<f64>, VillageMapError> {
            panic!("incompatible argument shape")
        }
    }

    /// Refuse toute entrée sans paniquer
    struct Refusing;

    impl MergeContract for Refusing {
        fn name(&self) -> &'static str {
            "refusing"
        }

        fn merge(&self, _polygons: &[Polygon<f64>]) -> Result<MultiPolygon<f64>, VillageMapError> {
            Err(VillageMapError::dissolve(self.name(), "unsupported input"))
        }
    }

    fn village(district: &str, polygon: Polygon<f64>) -> VillageFeature {
        let mut props = JsonObject::new();
        props.insert("ADMIT".to_string(), json!(district));
        VillageFeature::new(MultiPolygon::new(vec![polygon]), props)
    }

    fn villages() -> Vec<VillageFeature> {
        let square = |x: f64| {
            polygon![(x: x, y: 0.0), (x: x + 1.0, y: 0.0), (x: x + 1.0, y: 1.0), (x: x, y: 1.0)]
        };
        ["板橋區", "板橋區", "石碇區"]
            .iter()
            .enumerate()
            .map(|(i, district)| village(district, square(i as f64)))
            .collect()
    }

    #[test]
    fn test_dissolve_primary() {
        let outcome = dissolve(&villages());
        assert_eq!(outcome.contract, Some("primary"));
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.districts.len(), 2);
        // Tri par nom (BTreeMap)
        assert_eq!(outcome.districts[0].district, "板橋區");
        assert_eq!(outcome.districts[0].geometry.0.len(), 1);
    }

    #[test]
    fn test_dissolve_falls_back_to_legacy() {
        let outcome = dissolve_chain(&villages(), &[&Broken, &PairwiseUnion]);
        assert_eq!(outcome.contract, Some("legacy"));
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0]
            .to_string()
            .contains("incompatible argument shape"));
        assert_eq!(outcome.districts.len(), 2);
    }

    #[test]
    fn test_dissolve_falls_back_on_refusal() {
        let outcome = dissolve_chain(&villages(), &[&Refusing, &PairwiseUnion]);
        assert_eq!(outcome.contract, Some("legacy"));
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].to_string().contains("unsupported input"));
        assert_eq!(outcome.districts.len(), 2);
    }

    #[test]
    fn test_degenerate_ring_uses_legacy() {
        let mut villages = villages();
        let sliver = Polygon::new(
            LineString::from(vec![Coord { x: 9.0, y: 9.0 }, Coord { x: 9.5, y: 9.5 }]),
            vec![],
        );
        villages.push(village("石碇區", sliver));

        let outcome = dissolve(&villages);
        assert_eq!(outcome.contract, Some("legacy"));
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].to_string().contains("primary"));
        assert_eq!(outcome.districts.len(), 2);
    }

    #[test]
    fn test_non_finite_coordinates_degrade() {
        let mut villages = villages();
        villages.push(village(
            "石碇區",
            polygon![(x: 3.0, y: 0.0), (x: f64::INFINITY, y: 0.0), (x: 4.0, y: 1.0)],
        ));

        let outcome = dissolve(&villages);
        assert!(outcome.is_degraded());
        assert!(outcome.districts.is_empty());
        assert_eq!(outcome.errors.len(), 2);
    }

    #[test]
    fn test_dissolve_degrades_when_all_fail() {
        let outcome = dissolve_chain(&villages(), &[&Broken, &Broken]);
        assert!(outcome.is_degraded());
        assert!(outcome.districts.is_empty());
        assert_eq!(outcome.errors.len(), 2);
    }

    #[test]
    fn test_outline_zone_matches_villages() {
        let villages = villages();
        let outcome = dissolve(&villages);
        for outline in &outcome.districts {
            for village in villages
                .iter()
                .filter(|v| v.district.as_deref() == Some(outline.district.as_str()))
            {
                assert_eq!(village.zone, outline.zone);
            }
        }
    }
}
