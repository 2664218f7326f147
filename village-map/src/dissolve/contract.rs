//! Contrats de fusion géométrique
//!
//! Le contrat principal fait une union n-aire en un appel. Le contrat legacy
//! réduit les polygones deux à deux, ce qui n'utilise que l'union binaire.
//!
//! Chaque contrat vérifie son entrée avant d'appeler la bibliothèque : une
//! panique n'est pas rattrapable dans le navigateur.

use std::collections::VecDeque;

use geo::{unary_union, BooleanOps, CoordsIter, LineString, MultiPolygon, Polygon};

use crate::VillageMapError;

/// Une manière de fusionner les polygones d'un district
pub trait MergeContract: Send + Sync {
    /// Nom court, repris dans les logs et le rapport
    fn name(&self) -> &'static str;

    /// Union de tous les polygones, ou `Err` si l'entrée ne convient pas au
    /// contrat
    fn merge(&self, polygons: &[Polygon<f64>]) -> Result<MultiPolygon<f64>, VillageMapError>;
}

/// Union n-aire (`geo::unary_union`)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnaryUnion;

impl MergeContract for UnaryUnion {
    fn name(&self) -> &'static str {
        "primary"
    }

    /// Refuse les coordonnées non finies et les anneaux dégénérés
    fn merge(&self, polygons: &[Polygon<f64>]) -> Result<MultiPolygon<f64>, VillageMapError> {
        check_finite(self.name(), polygons)?;
        if let Some(index) = polygons.iter().position(has_degenerate_ring) {
            return Err(VillageMapError::dissolve(
                self.name(),
                format!("degenerate ring in polygon #{}", index),
            ));
        }
        Ok(unary_union(polygons.iter()))
    }
}

/// Réduction pairwise par `BooleanOps::union`, en arbre
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseUnion;

impl MergeContract for PairwiseUnion {
    fn name(&self) -> &'static str {
        "legacy"
    }

    /// Refuse les coordonnées non finies, écarte les polygones dégénérés
    fn merge(&self, polygons: &[Polygon<f64>]) -> Result<MultiPolygon<f64>, VillageMapError> {
        check_finite(self.name(), polygons)?;

        let mut queue: VecDeque<MultiPolygon<f64>> = polygons
            .iter()
            .filter(|p| !has_degenerate_ring(p))
            .map(|p| MultiPolygon::new(vec![p.clone()]))
            .collect();

        while queue.len() > 1 {
            let mut next_queue = VecDeque::with_capacity((queue.len() + 1) / 2);
            while let Some(a) = queue.pop_front() {
                if let Some(b) = queue.pop_front() {
                    next_queue.push_back(a.union(&b));
                } else {
                    next_queue.push_back(a);
                }
            }
            queue = next_queue;
        }

        Ok(queue.pop_front().unwrap_or_else(|| MultiPolygon::new(vec![])))
    }
}

fn check_finite(contract: &'static str, polygons: &[Polygon<f64>]) -> Result<(), VillageMapError> {
    match polygons
        .iter()
        .position(|p| p.coords_iter().any(|c| !c.x.is_finite() || !c.y.is_finite()))
    {
        Some(index) => Err(VillageMapError::dissolve(
            contract,
            format!("non-finite coordinate in polygon #{}", index),
        )),
        None => Ok(()),
    }
}

/// Anneau fermé de moins de 3 sommets distincts
fn is_degenerate(ring: &LineString<f64>) -> bool {
    ring.0.len() < 4
}

fn has_degenerate_ring(polygon: &Polygon<f64>) -> bool {
    is_degenerate(polygon.exterior()) || polygon.interiors().iter().any(is_degenerate)
}
