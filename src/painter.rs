// src/painter.rs

use crate::error::Result;
use crate::layers::LayerName;
use crate::surface::DrawingSurface;
use crate::symbol_models::{Drawing, FillMode, ParsedSymbol};
use crate::theme::{Color, Theme};
use glam::Vec2;

/// Stroke width used when a drawing declares none.
const DEFAULT_LINE_WIDTH: f32 = 0.254;

/// Default schematic font size in grid units.
const TEXT_SIZE: f32 = 1.27;

/// Decomposes a symbol into draw calls for one layer. Calls land in the
/// surface's currently-open layer recording.
pub trait SymbolPainter {
    fn background_color(&self) -> Color;

    fn paint_item(
        &mut self,
        surface: &mut dyn DrawingSurface,
        layer: LayerName,
        symbol: &ParsedSymbol,
    ) -> Result<()>;
}

/// The stock painter: body fills on the background layer, outlines and
/// text on the foreground, pin leads with names and numbers on top.
#[derive(Debug, Clone, Default)]
pub struct ThemedPainter {
    pub theme: Theme,
}

impl ThemedPainter {
    pub fn new(theme: Theme) -> ThemedPainter {
        ThemedPainter { theme }
    }

    fn fill_color(&self, fill: FillMode) -> Option<Color> {
        match fill {
            FillMode::Background => Some(self.theme.component_body),
            FillMode::Outline => Some(self.theme.component_outline),
            FillMode::None => None,
        }
    }

    fn paint_background(&self, surface: &mut dyn DrawingSurface, symbol: &ParsedSymbol) {
        for unit in symbol.units.values().flatten() {
            for drawing in &unit.drawings {
                match drawing {
                    Drawing::Rectangle {
                        start, end, fill, ..
                    } => {
                        if let Some(color) = self.fill_color(*fill) {
                            surface.fill_rect(*start, *end, color);
                        }
                    }
                    Drawing::Circle {
                        center,
                        radius,
                        fill,
                        ..
                    } => {
                        if let Some(color) = self.fill_color(*fill) {
                            surface.fill_circle(*center, *radius, color);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn paint_foreground(&self, surface: &mut dyn DrawingSurface, symbol: &ParsedSymbol) {
        let outline = self.theme.component_outline;
        for unit in symbol.units.values().flatten() {
            for drawing in &unit.drawings {
                match drawing {
                    Drawing::Arc {
                        start,
                        mid,
                        end,
                        width,
                    } => surface.stroke_arc(*start, *mid, *end, line_width(*width), outline),
                    Drawing::Polyline { points, width, .. } => {
                        surface.stroke_line(points, line_width(*width), outline)
                    }
                    Drawing::Rectangle {
                        start, end, width, ..
                    } => surface.stroke_rect(*start, *end, line_width(*width), outline),
                    Drawing::Circle {
                        center,
                        radius,
                        width,
                        ..
                    } => surface.stroke_circle(*center, *radius, line_width(*width), outline),
                    Drawing::Text { value, pos, .. } => {
                        surface.draw_text(value, *pos, TEXT_SIZE, self.theme.note)
                    }
                }
            }
        }
    }

    fn paint_pins(&self, surface: &mut dyn DrawingSurface, symbol: &ParsedSymbol) {
        for unit in symbol.units.values().flatten() {
            for pin in &unit.pins {
                let Some(anchor) = pin.pos else { continue };
                let tip = anchor + pin.direction() * pin.length;
                surface.stroke_line(&[anchor, tip], DEFAULT_LINE_WIDTH, self.theme.pin);
                if !pin.name.is_empty() && pin.name != "~" {
                    let name_pos = tip + pin.direction() * TEXT_SIZE;
                    surface.draw_text(&pin.name, name_pos, TEXT_SIZE, self.theme.pin_name);
                }
                if !pin.number.is_empty() {
                    // number sits above the midpoint of the lead
                    let mid = (anchor + tip) / 2.0 + Vec2::new(0.0, TEXT_SIZE / 2.0);
                    surface.draw_text(&pin.number, mid, TEXT_SIZE, self.theme.pin_number);
                }
            }
        }
    }
}

fn line_width(declared: f32) -> f32 {
    if declared > 0.0 {
        declared
    } else {
        DEFAULT_LINE_WIDTH
    }
}

impl SymbolPainter for ThemedPainter {
    fn background_color(&self) -> Color {
        self.theme.background
    }

    fn paint_item(
        &mut self,
        surface: &mut dyn DrawingSurface,
        layer: LayerName,
        symbol: &ParsedSymbol,
    ) -> Result<()> {
        match layer {
            LayerName::Background => self.paint_background(surface, symbol),
            LayerName::Foreground => self.paint_foreground(surface, symbol),
            LayerName::Pin => self.paint_pins(surface, symbol),
        }
        Ok(())
    }
}
