// src/camera.rs

use crate::bbox::BoundingBox;
use glam::{Affine2, Vec2};

/// Builds the symbol-space to surface-space transform.
///
/// Uniform scale fits the box inside the surface minus padding on each
/// side. The Y axis is inverted: symbol space grows upward, surface space
/// grows downward. The box center lands on the surface midpoint.
pub fn fit_transform(
    surface_w: f32,
    surface_h: f32,
    bbox: &BoundingBox,
    padding: f32,
) -> Affine2 {
    let scale_x = (surface_w - 2.0 * padding) / bbox.w;
    let scale_y = (surface_h - 2.0 * padding) / bbox.h;
    let mut scale = scale_x.min(scale_y);
    // Both axes zero-sized only happens with a degenerate box; keep the
    // transform usable rather than propagating a non-finite scale.
    if !scale.is_finite() {
        scale = 1.0;
    }

    Affine2::from_translation(Vec2::new(surface_w / 2.0, surface_h / 2.0))
        * Affine2::from_scale(Vec2::new(scale, -scale))
        * Affine2::from_translation(-bbox.center())
}
