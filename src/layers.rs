// src/layers.rs

use crate::surface::Graphics;

/// Semantic layer buckets, listed in paint order: backgrounds first, then
/// outlines and text, pins on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerName {
    Background,
    Foreground,
    Pin,
}

impl LayerName {
    pub const PAINT_ORDER: [LayerName; 3] =
        [LayerName::Background, LayerName::Foreground, LayerName::Pin];
}

/// One layer and its compiled graphics from the latest render pass. The
/// graphics object is replaced wholesale each pass, never appended to.
#[derive(Debug)]
pub struct Layer {
    pub name: LayerName,
    pub graphics: Option<Graphics>,
}

/// The layer collection for one view. Lookups by name may miss: a set is
/// allowed to omit layers, and painting skips the missing ones silently.
#[derive(Debug, Default)]
pub struct LayerSet {
    layers: Vec<Layer>,
}

impl LayerSet {
    /// A set with all three standard layers, nothing compiled yet.
    pub fn full() -> LayerSet {
        LayerSet {
            layers: LayerName::PAINT_ORDER
                .iter()
                .map(|&name| Layer {
                    name,
                    graphics: None,
                })
                .collect(),
        }
    }

    pub fn with_layers(names: &[LayerName]) -> LayerSet {
        LayerSet {
            layers: names
                .iter()
                .map(|&name| Layer {
                    name,
                    graphics: None,
                })
                .collect(),
        }
    }

    pub fn get(&self, name: LayerName) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn get_mut(&mut self, name: LayerName) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }
}
