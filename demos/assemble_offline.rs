//! Offline assembly example for mapvisual
//!
//! Builds a tiny data directory in a temp folder, assembles the India
//! option-b boundary from it without network access, and validates it.

use mapvisual_core::validate::{check_collection, BoundingBox};
use mapvisual_core::{AssemblerConfig, BoundaryAssembler, BoundaryKind, Result};
use serde_json::json;
use std::fs;

fn square(x: f64, y: f64) -> serde_json::Value {
    json!([[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]])
}

fn main() -> Result<()> {
    println!("=== mapvisual offline assembly ===\n");

    let dir = std::env::temp_dir().join("mapvisual-demo");
    let india = dir.join("india");
    fs::create_dir_all(&india)?;

    // Base states, one of them under an outdated name.
    let states = json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "NAME_1": "Jammu and Kashmir" },
              "geometry": { "type": "Polygon", "coordinates": square(74.0, 33.0) } },
            { "type": "Feature", "properties": { "NAME_1": "Orissa" },
              "geometry": { "type": "Polygon", "coordinates": square(84.0, 20.0) } }
        ]
    });
    fs::write(india.join("indian_states.geojson"), serde_json::to_vec(&states)?)?;

    // Bundled overlays.
    let ladakh = json!({
        "type": "FeatureCollection",
        "features": [{ "type": "Feature", "properties": { "st_nm": "Ladakh" },
                       "geometry": { "type": "Polygon", "coordinates": square(77.0, 34.0) } }]
    });
    let pok = json!({
        "type": "FeatureCollection",
        "features": [{ "type": "Feature", "properties": { "PROVINCE": "Gilgit-Baltistan" },
                       "geometry": { "type": "Polygon", "coordinates": square(74.0, 35.0) } }]
    });
    fs::write(india.join("ladakh.geojson"), serde_json::to_vec(&ladakh)?)?;
    fs::write(india.join("pok.geojson"), serde_json::to_vec(&pok)?)?;

    let config = AssemblerConfig::default().with_data_dir(&dir).offline(true);
    let assembler = BoundaryAssembler::from_config(config)?;

    println!("--- Assembling {} ---", BoundaryKind::IndiaOptionB);
    let doc = assembler.assemble(BoundaryKind::IndiaOptionB)?;
    let Some(fc) = doc.as_features() else {
        return Ok(());
    };
    for feature in &fc.features {
        let name = feature.canonical_name().unwrap_or("<unnamed>");
        let polygons = feature.area().map_or(0, |g| g.polygons().count());
        println!("  {name}: {polygons} polygon(s)");
    }
    println!();

    println!("--- Validation ---");
    let issues = check_collection(fc, Some(BoundingBox::INDIA));
    if issues.is_empty() {
        println!("  ✓ no issues");
    }
    for issue in issues {
        println!("  ✗ {issue}");
    }

    println!("\n--- Unknown boundary ---");
    match assembler.assemble_for("fr", "regions") {
        Ok(_) => println!("  unexpected success"),
        Err(e) => println!("  {e}"),
    }

    Ok(())
}
