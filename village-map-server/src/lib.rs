//! # village-map-server
//!
//! Serveur et export hors ligne de la carte des villages de Nouveau Taipei.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Servir la carte (preset ntpc, fichiers statiques dans ./static)
//! village-map serve --static-dir ./static --port 3000
//!
//! # Exporter villages taggés + contours de districts
//! village-map classify --input ./ntpc_villages.geojson --output ./out/
//! ```

pub mod config;
pub mod export;
pub mod pages;
pub mod server;

pub use config::Config;
pub use export::classify_to_dir;
pub use server::{router, serve};
