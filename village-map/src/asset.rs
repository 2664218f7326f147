//! Lecture de l'asset GeoJSON des villages
//!
//! Les défauts par feature (géométrie absente ou non surfacique) sont
//! ignorés avec un warning. Seul un asset illisible dans son ensemble est fatal.

use geo::{Geometry, MultiPolygon};
use geojson::{FeatureCollection, GeoJson};
use serde::Serialize;
use tracing::warn;

use crate::types::VillageFeature;
use crate::VillageMapError;

/// Chemin fixe de l'asset servi au navigateur
pub const DEFAULT_ASSET_URL: &str = "/ntpc_villages.geojson";

/// Feature écartée au chargement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFeature {
    /// Position dans la FeatureCollection d'origine
    pub index: usize,
    pub reason: String,
}

/// Villages lus depuis l'asset
#[derive(Debug, Clone, Default)]
pub struct VillageCollection {
    pub villages: Vec<VillageFeature>,
    pub skipped: Vec<SkippedFeature>,
}

/// Vérifie le statut HTTP du fetch de l'asset
pub fn check_status(url: &str, status: u16) -> Result<(), VillageMapError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(VillageMapError::AssetFetch {
            url: url.to_string(),
            status,
        })
    }
}

/// Parse le texte de l'asset
pub fn parse(text: &str) -> Result<VillageCollection, VillageMapError> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e| VillageMapError::invalid_asset(format!("{}", e)))?;

    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(from_collection(fc)),
        _ => Err(VillageMapError::invalid_asset(
            "GeoJSON must be a FeatureCollection",
        )),
    }
}

/// Convertit une FeatureCollection déjà parsée
pub fn from_collection(collection: FeatureCollection) -> VillageCollection {
    let mut out = VillageCollection::default();

    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            skip(&mut out, index, "missing geometry");
            continue;
        };

        let geometry = match Geometry::<f64>::try_from(geometry.value) {
            Ok(Geometry::Polygon(p)) => MultiPolygon::new(vec![p]),
            Ok(Geometry::MultiPolygon(mp)) => mp,
            Ok(_) => {
                skip(&mut out, index, "geometry is not polygonal");
                continue;
            }
            Err(e) => {
                skip(&mut out, index, &format!("invalid geometry: {}", e));
                continue;
            }
        };

        let properties = feature.properties.unwrap_or_default();
        out.villages.push(VillageFeature::new(geometry, properties));
    }

    out
}

fn skip(out: &mut VillageCollection, index: usize, reason: &str) {
    warn!(index, reason, "Skipping asset feature");
    out.skipped.push(SkippedFeature {
        index,
        reason: reason.to_string(),
    });
}
