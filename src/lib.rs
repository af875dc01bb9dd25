// src/lib.rs

pub mod bbox;
pub mod camera;
pub mod error;
pub mod extract;
pub mod layers;
pub mod painter;
pub mod render;
pub mod sexpr;
pub mod surface;
pub mod symbol_models;
pub mod theme;

use crate::error::Result;
use crate::painter::ThemedPainter;
use crate::surface::DrawingSurface;
use crate::symbol_models::{ParsedSymbol, SchematicContext};
use crate::theme::Theme;

/// Renders one symbol from raw text straight onto a surface.
///
/// Extraction is best effort; construction failure is the only error this
/// returns. The surface receives one complete render pass.
pub fn render_symbol_text<S: DrawingSurface>(
    raw: &str,
    filename: &str,
    surface: &mut S,
    theme: &Theme,
    viewport: Option<(f32, f32)>,
) -> Result<()> {
    let definition = extract::extract_symbol_text(raw);
    let ctx = SchematicContext::new(filename);
    let symbol = ParsedSymbol::from_text(&definition, &ctx)?;
    log::info!("rendering symbol '{}' ({} pins)", symbol.name, symbol.pin_count());

    let mut painter = ThemedPainter::new(theme.clone());
    let mut layer_set = layers::LayerSet::full();
    render::run_render_pass(surface, &mut painter, &mut layer_set, &symbol, viewport);
    Ok(())
}
