// src/render.rs

use crate::bbox;
use crate::camera;
use crate::error::Result;
use crate::extract;
use crate::layers::{LayerName, LayerSet};
use crate::painter::SymbolPainter;
use crate::surface::DrawingSurface;
use crate::symbol_models::{ParsedSymbol, SchematicContext};

/// Padding between the fitted symbol and the surface edge, in pixels.
const FIT_PADDING: f32 = 10.0;

/// Surface size used when the host rectangle is missing or degenerate.
const FALLBACK_SIZE: (f32, f32) = (300.0, 200.0);

/// Compiles each present layer in paint order: begin a recording, let the
/// painter decompose the symbol for that layer, store the result on the
/// layer. Every pass is a clean compile: all graphics are dropped up
/// front, so a painter error leaves the failed layer and everything after
/// it absent rather than carrying results from an earlier pass.
fn compile_layers<S, P>(
    surface: &mut S,
    painter: &mut P,
    layers: &mut LayerSet,
    symbol: &ParsedSymbol,
) -> Result<()>
where
    S: DrawingSurface,
    P: SymbolPainter,
{
    for name in LayerName::PAINT_ORDER {
        if let Some(layer) = layers.get_mut(name) {
            layer.graphics = None;
        }
    }
    for name in LayerName::PAINT_ORDER {
        if layers.get(name).is_none() {
            continue;
        }
        surface.begin_layer();
        match painter.paint_item(surface, name, symbol) {
            Ok(()) => {
                let graphics = surface.end_layer();
                if let Some(layer) = layers.get_mut(name) {
                    layer.graphics = Some(graphics);
                }
            }
            Err(e) => {
                let _ = surface.end_layer();
                return Err(e);
            }
        }
    }
    Ok(())
}

/// Renders every compiled layer in paint order at full opacity and unit
/// line-width scale. Layers with nothing compiled are skipped.
fn render_layers<S: DrawingSurface>(surface: &mut S, layers: &LayerSet) {
    for name in LayerName::PAINT_ORDER {
        if let Some(graphics) = layers.get(name).and_then(|l| l.graphics.as_ref()) {
            if graphics.is_empty() {
                continue;
            }
            surface.render_layer(graphics, 1.0, 1.0);
        }
    }
}

/// One full render pass: size, fit, clear, paint, composite.
///
/// The surface transform is saved before the camera is applied and restored
/// after compositing, on the failure path too, so no pass leaks transform
/// state into the next one. Painting errors are logged and the layers that
/// did compile still composite.
pub fn run_render_pass<S, P>(
    surface: &mut S,
    painter: &mut P,
    layers: &mut LayerSet,
    symbol: &ParsedSymbol,
    viewport: Option<(f32, f32)>,
) where
    S: DrawingSurface,
    P: SymbolPainter,
{
    let (w, h) = match viewport {
        Some((w, h)) if w > 0.0 && h > 0.0 => (w, h),
        _ => FALLBACK_SIZE,
    };
    surface.resize(w, h);

    let bbox = bbox::estimate(symbol);
    let transform = camera::fit_transform(w, h, &bbox, FIT_PADDING);

    surface.save();
    surface.set_transform(transform);
    surface.clear(painter.background_color());

    if let Err(e) = compile_layers(surface, painter, layers, symbol) {
        log::warn!("painting '{}' failed: {e}", symbol.name);
    }
    render_layers(surface, layers);

    surface.restore();
}

/// A symbol view: owns the surface, painter and layers, and schedules
/// render passes. Mirrors the host element contract without any host glue:
/// `load` ingests text, `request_render` marks a pass pending, and the host
/// calls `run_scheduled` from its layout callback.
pub struct SymbolView<S, P> {
    surface: S,
    painter: P,
    layers: LayerSet,
    symbol: Option<ParsedSymbol>,
    loaded: bool,
    render_pending: bool,
}

impl<S, P> SymbolView<S, P>
where
    S: DrawingSurface,
    P: SymbolPainter,
{
    pub fn new(surface: S, painter: P) -> SymbolView<S, P> {
        SymbolView {
            surface,
            painter,
            layers: LayerSet::full(),
            symbol: None,
            loaded: false,
            render_pending: false,
        }
    }

    /// Ingests raw symbol text. Extraction degrades to best effort;
    /// construction failure leaves the view loaded with no symbol, which
    /// later passes treat as a legitimate no-op.
    pub fn load(&mut self, raw: &str, filename: &str) {
        self.loaded = false;
        let definition = extract::extract_symbol_text(raw);
        let ctx = SchematicContext::new(filename);
        match ParsedSymbol::from_text(&definition, &ctx) {
            Ok(symbol) => {
                log::info!("loaded symbol '{}' ({} pins)", symbol.name, symbol.pin_count());
                self.symbol = Some(symbol);
            }
            Err(e) => {
                log::error!("failed to construct symbol from {filename}: {e}");
                self.symbol = None;
            }
        }
        self.loaded = true;
    }

    /// Marks a render pass pending. Single-flight: while one is pending,
    /// further requests are absorbed. Returns whether a pass was newly
    /// scheduled.
    pub fn request_render(&mut self) -> bool {
        if !self.loaded || self.render_pending {
            return false;
        }
        self.render_pending = true;
        true
    }

    /// Runs the pending pass, if any. `viewport` is the host's measured
    /// layout rectangle; a missing or degenerate one falls back to a fixed
    /// size.
    pub fn run_scheduled(&mut self, viewport: Option<(f32, f32)>) {
        if !self.render_pending {
            return;
        }
        self.render_pending = false;
        let Some(symbol) = self.symbol.as_ref() else {
            return;
        };
        run_render_pass(
            &mut self.surface,
            &mut self.painter,
            &mut self.layers,
            symbol,
            viewport,
        );
    }

    pub fn symbol(&self) -> Option<&ParsedSymbol> {
        self.symbol.as_ref()
    }

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
