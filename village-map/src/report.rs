//! Rapport de classification avec dégradation gracieuse
//!
//! Collecte ce qui a été chargé, ignoré ou dégradé pendant un passage
//! du classifieur, pour l'afficher ou l'écrire en JSON.

use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::asset::SkippedFeature;
use crate::zone::Zone;
use crate::VillageMapError;

/// Statut global de la classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassificationStatus {
    /// Villages et contours de districts disponibles
    Complete,
    /// Contours de districts omis (fusion en échec), villages disponibles
    Degraded,
}

/// Statistiques par zone
#[derive(Debug, Clone, Default, Serialize)]
pub struct ZoneStats {
    /// Nombre de villages
    pub villages: usize,
    /// Nombre de contours de districts
    pub districts: usize,
}

/// Rapport complet d'un passage du classifieur
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    /// Statut global
    pub status: ClassificationStatus,
    /// Durée de la classification
    pub duration_secs: f64,

    /// Villages conservés
    pub villages: usize,
    /// Villages sans les quatre identifiants (ni clic, ni survol, ni label)
    pub non_interactive: usize,
    /// Contours de districts produits
    pub districts: usize,

    /// Statistiques par libellé de zone
    pub by_zone: BTreeMap<String, ZoneStats>,

    /// Contrat de fusion ayant abouti (`none` si dégradé)
    pub dissolve_contract: String,
    /// Échecs de contrats de fusion
    pub dissolve_errors: Vec<String>,
    /// Districts écartés car leur union est vide
    pub empty_districts: Vec<String>,

    /// Features de l'asset écartées au chargement
    pub skipped: Vec<SkippedFeature>,
}

impl Default for ClassificationReport {
    fn default() -> Self {
        Self {
            status: ClassificationStatus::Complete,
            duration_secs: 0.0,
            villages: 0,
            non_interactive: 0,
            districts: 0,
            by_zone: BTreeMap::new(),
            dissolve_contract: "none".to_string(),
            dissolve_errors: Vec::new(),
            empty_districts: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl ClassificationReport {
    /// Enregistre un village conservé
    pub fn record_village(&mut self, zone: Zone, interactive: bool) {
        self.villages += 1;
        if !interactive {
            self.non_interactive += 1;
        }
        self.by_zone
            .entry(zone.label().to_string())
            .or_default()
            .villages += 1;
    }

    /// Enregistre un contour de district
    pub fn record_district(&mut self, zone: Zone) {
        self.districts += 1;
        self.by_zone
            .entry(zone.label().to_string())
            .or_default()
            .districts += 1;
    }

    /// Enregistre une feature écartée au chargement
    pub fn record_skipped(&mut self, skipped: SkippedFeature) {
        self.skipped.push(skipped);
    }

    /// Définit la durée
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final d'après le contrat de fusion retenu
    pub fn finalize(&mut self, contract: Option<&str>) {
        self.dissolve_contract = contract.unwrap_or("none").to_string();
        self.status = if contract.is_some() {
            ClassificationStatus::Complete
        } else {
            ClassificationStatus::Degraded
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        print!("{}", self.render());
    }

    /// Texte du rapport, tel qu'affiché par [`Self::display`]
    pub fn render(&self) -> String {
        let mut out = String::new();
        // L'écriture dans une String ne peut pas échouer
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "\n{}", "=".repeat(60))?;
        writeln!(out, "CLASSIFICATION REPORT")?;
        writeln!(out, "{}", "=".repeat(60))?;

        writeln!(out, "\nStatus: {:?}", self.status)?;
        writeln!(out, "Duration: {:.2}s", self.duration_secs)?;

        writeln!(out, "\n--- SUMMARY ---")?;
        writeln!(
            out,
            "Villages: {} loaded, {} non-interactive, {} skipped",
            self.villages,
            self.non_interactive,
            self.skipped.len()
        )?;
        writeln!(
            out,
            "Districts: {} outlines (dissolve: {})",
            self.districts, self.dissolve_contract
        )?;

        if !self.by_zone.is_empty() {
            writeln!(out, "\n--- BY ZONE ---")?;
            for (zone, stats) in &self.by_zone {
                writeln!(
                    out,
                    "  {}: {} villages, {} districts",
                    zone, stats.villages, stats.districts
                )?;
            }
        }

        if !self.dissolve_errors.is_empty() {
            writeln!(out, "\n--- DISSOLVE ERRORS ({}) ---", self.dissolve_errors.len())?;
            for e in &self.dissolve_errors {
                writeln!(out, "  {}", e)?;
            }
        }

        if !self.empty_districts.is_empty() {
            writeln!(out, "\n--- EMPTY DISTRICTS ({}) ---", self.empty_districts.len())?;
            for district in &self.empty_districts {
                writeln!(out, "  {}", district)?;
            }
        }

        if !self.skipped.is_empty() {
            writeln!(out, "\n--- SKIPPED ({}) ---", self.skipped.len())?;
            for s in self.skipped.iter().take(20) {
                writeln!(out, "  [#{}] {}", s.index, s.reason)?;
            }
            if self.skipped.len() > 20 {
                writeln!(out, "  ... and {} more", self.skipped.len() - 20)?;
            }
        }

        writeln!(out, "\n{}", "=".repeat(60))
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), VillageMapError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{:?}: {} villages, {} districts ({}), {} skipped",
            self.status,
            self.villages,
            self.districts,
            self.dissolve_contract,
            self.skipped.len()
        )
    }
}
