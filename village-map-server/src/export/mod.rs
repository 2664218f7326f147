//! Export hors ligne : villages taggés et contours de districts en GeoJSON

pub mod geojson;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use village_map::{classify_str, ClassificationReport};

pub const VILLAGES_FILE: &str = "villages.geojson";
pub const DISTRICTS_FILE: &str = "districts.geojson";

/// Classe l'asset `input` et écrit les deux collections dans `output`
pub fn classify_to_dir(input: &Path, output: &Path) -> Result<ClassificationReport> {
    let text = std::fs::read_to_string(input)
        .context(format!("Failed to read asset: {}", input.display()))?;
    let classification =
        classify_str(&text).context(format!("Failed to classify {}", input.display()))?;

    std::fs::create_dir_all(output)
        .context(format!("Failed to create directory: {}", output.display()))?;

    geojson::write_collection(&classification.villages_geojson(), &output.join(VILLAGES_FILE))?;
    geojson::write_collection(
        &classification.districts_geojson(),
        &output.join(DISTRICTS_FILE),
    )?;

    if !classification.has_districts() {
        warn!("No district outlines written (dissolve degraded)");
    }
    info!(
        output = %output.display(),
        villages = classification.report.villages,
        districts = classification.report.districts,
        "Export done"
    );

    Ok(classification.report)
}
