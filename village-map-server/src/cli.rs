//! Définition et implémentation des commandes CLI
//!
//! - `serve`: page carte + page détail + fichiers statiques
//! - `classify`: asset GeoJSON → villages taggés + districts (sans serveur)

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use village_map_server::{classify_to_dir, serve, Config};

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the map page, the detail route and the static files
    Serve {
        /// Config preset name (ntpc) or path to a JSON config
        #[arg(long, default_value = "ntpc")]
        config: String,

        /// Directory holding the GeoJSON asset and the wasm bundle (défaut : env VILLAGE_MAP_STATIC_DIR)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Listening port (défaut : env VILLAGE_MAP_PORT / 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Classify a village asset and export zone-tagged GeoJSON
    Classify {
        /// Path to the village GeoJSON asset
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (villages.geojson, districts.geojson)
        #[arg(short, long)]
        output: PathBuf,

        /// Save the classification report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

/// Commande `serve`
pub async fn cmd_serve(config: &str, static_dir: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let mut config = Config::resolve(config)?;
    config.apply_env()?;

    // Les flags priment sur l'environnement
    if let Some(dir) = static_dir {
        config.server.static_dir = dir;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    info!(
        static_dir = %config.server.static_dir.display(),
        asset = %config.view.asset_url,
        "Serving village map"
    );
    serve(config).await
}

/// Commande `classify`
pub fn cmd_classify(input: &Path, output: &Path, report_path: Option<&Path>) -> Result<()> {
    let report = classify_to_dir(input, output)?;
    report.display();

    if let Some(path) = report_path {
        report.save_to_file(path)?;
        println!("Report saved to: {}", path.display());
    }

    Ok(())
}
