//! Configuration du serveur et de la vue

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use village_map::ViewOptions;

pub const ENV_HOST: &str = "VILLAGE_MAP_HOST";
pub const ENV_PORT: &str = "VILLAGE_MAP_PORT";
pub const ENV_STATIC_DIR: &str = "VILLAGE_MAP_STATIC_DIR";

/// Presets embarqués
pub const PRESETS: &[&str] = &["ntpc"];

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Titre de la page
    pub title: String,

    pub server: ServerConfig,

    /// Options passées telles quelles à la vue carte
    pub view: ViewOptions,
}

/// Écoute HTTP et fichiers statiques
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,

    /// Répertoire contenant l'asset GeoJSON et le bundle wasm (`pkg/`)
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Village map".to_string(),
            server: ServerConfig::default(),
            view: ViewOptions::default(),
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "ntpc" => Self::load_embedded(include_str!("presets/ntpc.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: {}", preset, PRESETS.join(", ")),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Nom de preset ou chemin vers un JSON
    pub fn resolve(preset_or_path: &str) -> Result<Self> {
        if PRESETS.contains(&preset_or_path) {
            Self::from_preset(preset_or_path)
        } else {
            Self::load(Path::new(preset_or_path))
        }
    }

    /// Surcharges depuis l'environnement (`.env` compris)
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(
            std::env::var(ENV_HOST).ok(),
            std::env::var(ENV_PORT).ok(),
            std::env::var(ENV_STATIC_DIR).ok(),
        )
    }

    fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<String>,
        static_dir: Option<String>,
    ) -> Result<()> {
        if let Some(host) = host {
            self.server.host = host
                .parse()
                .context(format!("Invalid {}: {}", ENV_HOST, host))?;
        }
        if let Some(port) = port {
            self.server.port = port
                .parse()
                .context(format!("Invalid {}: {}", ENV_PORT, port))?;
        }
        if let Some(dir) = static_dir {
            self.server.static_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Options de vue sérialisées pour la page
    pub fn view_json(&self) -> Result<String> {
        serde_json::to_string(&self.view).context("Failed to serialize view options")
    }
}
