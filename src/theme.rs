// src/theme.rs

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// RGBA color, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Color roles the painter draws with. Every role is required: a theme
/// missing a field fails to load rather than rendering half-styled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub component_outline: Color,
    pub component_body: Color,
    pub pin: Color,
    pub pin_name: Color,
    pub pin_number: Color,
    pub reference: Color,
    pub value: Color,
    pub note: Color,
}

impl Theme {
    pub fn from_json(json: &str) -> Result<Theme> {
        Ok(serde_json::from_str(json)?)
    }

    /// The classic KiCad schematic palette.
    pub fn kicad_classic() -> Theme {
        Theme {
            background: Color::rgb(1.0, 1.0, 1.0),
            component_outline: Color::rgb(0.52, 0.0, 0.0),
            component_body: Color::rgb(1.0, 1.0, 0.76),
            pin: Color::rgb(0.52, 0.0, 0.0),
            pin_name: Color::rgb(0.0, 0.4, 0.4),
            pin_number: Color::rgb(0.52, 0.0, 0.0),
            reference: Color::rgb(0.0, 0.4, 0.4),
            value: Color::rgb(0.0, 0.4, 0.4),
            note: Color::rgb(0.0, 0.0, 0.52),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::kicad_classic()
    }
}
