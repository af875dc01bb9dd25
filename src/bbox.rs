// src/bbox.rs

use crate::symbol_models::ParsedSymbol;
use glam::Vec2;

/// Pin leads extend one grid step past the anchor in the worst case.
const PIN_LEAD_LENGTH: f32 = 2.54;

/// Coarse half-extent assumed for any drawing primitive. The box only
/// drives camera fit, so a placeholder beats a full geometry engine.
const DRAWING_HALF_EXTENT: f32 = 10.0;

/// Extent of the fallback box for symbols with no content (10 grid steps).
const EMPTY_SYMBOL_EXTENT: f32 = 25.4;

/// Axis-aligned box in symbol-space units. `w >= 0 && h >= 0` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BoundingBox {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Estimates the extent of a symbol from pin anchors and drawing presence.
///
/// Pins expand the box by the lead length on both axes around the anchor.
/// Drawings expand it to cover a fixed placeholder area regardless of their
/// actual geometry. A symbol with neither gets a default box centered at
/// the origin so the camera always has something to fit.
pub fn estimate(symbol: &ParsedSymbol) -> BoundingBox {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut has_content = false;

    for unit in symbol.units.values().flatten() {
        for pin in &unit.pins {
            if let Some(pos) = pin.pos {
                has_content = true;
                min = min.min(pos - Vec2::splat(PIN_LEAD_LENGTH));
                max = max.max(pos + Vec2::splat(PIN_LEAD_LENGTH));
            }
        }
        for _drawing in &unit.drawings {
            has_content = true;
            min = min.min(Vec2::splat(-DRAWING_HALF_EXTENT));
            max = max.max(Vec2::splat(DRAWING_HALF_EXTENT));
        }
    }

    if !has_content {
        return BoundingBox {
            x: -EMPTY_SYMBOL_EXTENT / 2.0,
            y: -EMPTY_SYMBOL_EXTENT / 2.0,
            w: EMPTY_SYMBOL_EXTENT,
            h: EMPTY_SYMBOL_EXTENT,
        };
    }

    BoundingBox {
        x: min.x,
        y: min.y,
        w: max.x - min.x,
        h: max.y - min.y,
    }
}
