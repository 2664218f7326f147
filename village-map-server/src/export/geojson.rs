//! Écriture de FeatureCollections GeoJSON

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geojson::FeatureCollection;

/// Écrit une FeatureCollection dans `output_path`
pub fn write_collection(collection: &FeatureCollection, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, collection)
        .context(format!("Failed to write GeoJSON: {}", output_path.display()))?;
    writer.flush()?;

    Ok(())
}
