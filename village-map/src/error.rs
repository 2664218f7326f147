//! Types d'erreurs pour le crate village-map

use thiserror::Error;

/// Erreurs pouvant survenir lors du chargement et de la composition de la carte
#[derive(Debug, Error)]
pub enum VillageMapError {
    /// Erreur d'I/O (export, rapport)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Erreur de sérialisation JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Le fetch de l'asset statique a renvoyé un statut non-succès (fatal)
    #[error("Failed to load {url}: HTTP {status}")]
    AssetFetch { url: String, status: u16 },

    /// Asset illisible (JSON invalide, pas une FeatureCollection)
    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    /// Échec d'un contrat de fusion des districts
    #[error("Dissolve failed with {contract} contract: {reason}")]
    Dissolve {
        contract: &'static str,
        reason: String,
    },

    /// Erreur remontée par le moteur de rendu
    #[error("Map engine error: {0}")]
    Engine(String),

    /// `MapView::load` rappelé après une installation, réussie ou interrompue
    #[error("Map view already loaded")]
    AlreadyLoaded,

    /// Chemin de page détail non reconnu ou mal encodé
    #[error("Invalid detail route: {0}")]
    InvalidRoute(String),
}

impl VillageMapError {
    /// Crée une erreur d'asset avec contexte
    pub fn invalid_asset(reason: impl Into<String>) -> Self {
        Self::InvalidAsset(reason.into())
    }

    /// Crée une erreur de dissolve pour un contrat donné
    pub fn dissolve(contract: &'static str, reason: impl Into<String>) -> Self {
        Self::Dissolve {
            contract,
            reason: reason.into(),
        }
    }

    /// Crée une erreur moteur
    pub fn engine(reason: impl Into<String>) -> Self {
        Self::Engine(reason.into())
    }

    /// Vrai si l'erreur doit interrompre l'initialisation de la carte
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::AssetFetch { .. } | Self::InvalidAsset(_) | Self::Engine(_)
        )
    }
}
