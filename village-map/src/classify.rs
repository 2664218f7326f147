//! Classifieur : villages taggés par zone + contours de districts fusionnés

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;
use tracing::info;

use crate::asset::{self, VillageCollection};
use crate::clock::Stopwatch;
use crate::dissolve::{self, DissolveOutcome, MergeContract};
use crate::report::ClassificationReport;
use crate::types::{
    DistrictOutline, VillageFeature, DISTRICT_NAME, ID_PROPERTY, LABEL_PROPERTY, ZONE_PROPERTY,
};
use crate::VillageMapError;

/// Sortie du classifieur
#[derive(Debug, Clone)]
pub struct Classification {
    pub villages: Vec<VillageFeature>,
    /// Vide si la fusion a dégradé
    pub districts: Vec<DistrictOutline>,
    pub report: ClassificationReport,
}

impl Classification {
    /// Vrai si les contours (et labels) de districts peuvent être affichés
    pub fn has_districts(&self) -> bool {
        !self.districts.is_empty()
    }

    /// Villages en GeoJSON, avec `zone`, `vid` et `vlabel` ajoutés
    pub fn villages_geojson(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.villages.iter().map(village_feature).collect(),
            foreign_members: None,
        }
    }

    /// Contours de districts en GeoJSON, avec `ADMIT` et `zone`
    pub fn districts_geojson(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.districts.iter().map(district_feature).collect(),
            foreign_members: None,
        }
    }
}

/// Parse l'asset puis classe
pub fn classify_str(text: &str) -> Result<Classification, VillageMapError> {
    Ok(classify(asset::parse(text)?))
}

/// Classe des villages déjà chargés avec la chaîne de fusion par défaut
pub fn classify(collection: VillageCollection) -> Classification {
    classify_with(collection, &[&dissolve::UnaryUnion, &dissolve::PairwiseUnion])
}

/// Classe des villages avec une chaîne de contrats de fusion explicite
pub fn classify_with(
    collection: VillageCollection,
    contracts: &[&dyn MergeContract],
) -> Classification {
    let stopwatch = Stopwatch::start();
    let mut report = ClassificationReport::default();

    for village in &collection.villages {
        report.record_village(village.zone, village.is_interactive());
    }
    for skipped in collection.skipped {
        report.record_skipped(skipped);
    }

    let DissolveOutcome {
        districts,
        contract,
        errors,
        empty_districts,
    } = dissolve::dissolve_chain(&collection.villages, contracts);

    for district in &districts {
        report.record_district(district.zone);
    }
    report.dissolve_errors = errors.iter().map(|e| e.to_string()).collect();
    report.empty_districts = empty_districts;
    report.finalize(contract);
    report.set_duration(stopwatch.elapsed());

    info!(
        villages = report.villages,
        districts = report.districts,
        dissolve = %report.dissolve_contract,
        "Classification done"
    );

    Classification {
        villages: collection.villages,
        districts,
        report,
    }
}

fn village_feature(village: &VillageFeature) -> Feature {
    let mut properties: JsonObject = village.properties.clone();
    properties.insert(ZONE_PROPERTY.to_string(), json!(village.zone.label()));

    let id = village.ident.as_ref().map(|ident| {
        let id = ident.id();
        properties.insert(ID_PROPERTY.to_string(), json!(id));
        properties.insert(LABEL_PROPERTY.to_string(), json!(ident.village));
        Id::String(id)
    });

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&village.geometry))),
        id,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn district_feature(district: &DistrictOutline) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert(DISTRICT_NAME.to_string(), json!(district.district));
    properties.insert(ZONE_PROPERTY.to_string(), json!(district.zone.label()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&district.geometry))),
        id: Some(Id::String(district.district.clone())),
        properties: Some(properties),
        foreign_members: None,
    }
}
