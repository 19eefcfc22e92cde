//! Export formats for placemat slides.
//!
//! Supported formats:
//! - PPTX (single-slide Office Open XML presentation, editable shapes)
//! - SVG (preview)

#[cfg(feature = "pptx")]
pub mod pptx;

#[cfg(feature = "svg")]
pub mod svg;

use placemat_core::{Placemat, PlacematError};
use placemat_layout::compute_layout;
use placemat_render::{build_scene, Scene};
use tracing::info;

#[cfg(feature = "pptx")]
use placemat_core::ExportError;

#[cfg(feature = "pptx")]
pub use pptx::{PptxBuilder, PptxOptions};

/// Resolve, lay out and style a placemat into a scene ready for export.
pub fn render_placemat(placemat: &Placemat) -> Result<Scene, PlacematError> {
    let theme = placemat.resolve_theme()?;
    let layout = compute_layout(placemat)?;
    let scene = build_scene(&layout, &theme)?.with_title(placemat.title.clone());
    info!(boxes = scene.len(), title = %placemat.title, "placemat rendered");
    Ok(scene)
}

/// Export a scene to PPTX.
#[cfg(feature = "pptx")]
pub fn export_pptx(scene: &Scene) -> Result<Vec<u8>, ExportError> {
    pptx::export(scene)
}

/// Export a scene to PPTX with custom options.
#[cfg(feature = "pptx")]
pub fn export_pptx_with_options(
    scene: &Scene,
    options: &PptxOptions,
) -> Result<Vec<u8>, ExportError> {
    pptx::export_with_options(scene, options)
}

/// Export a scene to an SVG preview.
#[cfg(feature = "svg")]
pub fn export_svg(scene: &Scene) -> Result<String, placemat_core::ExportError> {
    svg::export(scene)
}
