//! Generates `IBM_Product_Placemat.pptx` from the bundled portfolio description.

use placemat_core::{ExportError, Placemat, PlacematError};
use placemat_export::{export_pptx, render_placemat};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

const OUTPUT_FILE: &str = "IBM_Product_Placemat.pptx";

/// The bundled portfolio placemat.
const PORTFOLIO: &str = include_str!("../assets/portfolio.json");

fn main() -> Result<(), PlacematError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let placemat = Placemat::from_json(PORTFOLIO)?;
    let scene = render_placemat(&placemat)?;
    let bytes = export_pptx(&scene)?;
    std::fs::write(OUTPUT_FILE, &bytes).map_err(ExportError::from)?;

    info!(path = OUTPUT_FILE, bytes = bytes.len(), "slide generated");
    Ok(())
}
