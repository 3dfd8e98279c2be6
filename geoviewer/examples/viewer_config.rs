//! Reads a viewer configuration in JSON from the file given as the first argument (or uses a
//! built-in WMS configuration), initializes the viewer and prints what the map would request.
//!
//! Run with `RUST_LOG=debug` to see the initialization steps.

use geoviewer::config::ViewerConfig;
use geoviewer::diagnostics::DiagnosticLog;
use geoviewer::viewer::{Registries, ViewerController};

const DEFAULT_CONFIG: &str = r#"{
    "url": "https://geowebservices.stanford.edu/geoserver/wms",
    "protocol": "Wms",
    "available": true,
    "layerId": "druid:cz128vq0535",
    "mapGeom": {"type": "Polygon", "coordinates": [[[-122.5, 37.7], [-122.3, 37.7], [-122.3, 37.9], [-122.5, 37.9], [-122.5, 37.7]]]},
    "options": {
        "opacity": 0.75,
        "LAYERS": {"DETECT_RETINA": true},
        "VIEWERS": {"WMS": {"CONTROLS": ["Opacity", "Fullscreen"]}}
    }
}"#;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_CONFIG.to_string(),
    };
    let config = ViewerConfig::from_json(&json)?;

    let diagnostics = DiagnosticLog::new();
    let viewer =
        ViewerController::initialize(config, Registries::default(), diagnostics.clone()).await?;

    println!("state: {:?}", viewer.state());
    println!("controls: {:?}", viewer.map().control_names());
    for diagnostic in diagnostics.entries() {
        println!("diagnostic: {diagnostic}");
    }
    for url in viewer.map().requests() {
        println!("{url}");
    }

    Ok(())
}
