// src/symbol_models.rs

use crate::error::{Error, Result};
use crate::sexpr::{self, SExpr};
use glam::Vec2;
use std::collections::BTreeMap;

/// Minimal schematic context a standalone symbol is constructed against.
/// Inline symbols have no project, so text variables never resolve.
#[derive(Debug, Clone, Default)]
pub struct SchematicContext {
    pub filename: String,
}

impl SchematicContext {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
        }
    }

    /// Text-variable lookup stub: inline symbols always report unresolved.
    pub fn resolve_text_var(&self, _name: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PinType {
    Input,
    Output,
    Bidirectional,
    PowerIn,
    Passive,
    Unspecified,
}

fn map_pin_type(raw: &str) -> PinType {
    match raw {
        "input" => PinType::Input,
        "output" => PinType::Output,
        "bidirectional" => PinType::Bidirectional,
        "power_in" => PinType::PowerIn,
        "passive" => PinType::Passive,
        _ => PinType::Unspecified,
    }
}

#[derive(Debug, Clone)]
pub struct SymbolPin {
    pub number: String,
    pub name: String,
    pub pin_type: PinType,
    /// Anchor position in symbol space, when the definition declares one.
    pub pos: Option<Vec2>,
    /// Orientation in degrees: 0 points right, 90 up, 180 left, 270 down.
    pub rotation: f32,
    pub length: f32,
}

impl SymbolPin {
    /// Unit direction the pin lead extends along, from the anchor.
    pub fn direction(&self) -> Vec2 {
        match self.rotation.rem_euclid(360.0) as i32 {
            90 => Vec2::new(0.0, 1.0),
            180 => Vec2::new(-1.0, 0.0),
            270 => Vec2::new(0.0, -1.0),
            _ => Vec2::new(1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    None,
    Outline,
    Background,
}

/// One graphical primitive of a unit body. Geometry is kept as declared;
/// the renderer decides how each kind is stroked or filled.
#[derive(Debug, Clone)]
pub enum Drawing {
    Arc {
        start: Vec2,
        mid: Vec2,
        end: Vec2,
        width: f32,
    },
    Polyline {
        points: Vec<Vec2>,
        width: f32,
        fill: FillMode,
    },
    Rectangle {
        start: Vec2,
        end: Vec2,
        width: f32,
        fill: FillMode,
    },
    Circle {
        center: Vec2,
        radius: f32,
        width: f32,
        fill: FillMode,
    },
    Text {
        value: String,
        pos: Vec2,
        rotation: f32,
    },
}

/// One interchangeable graphical representation ("body style") of a unit.
#[derive(Debug, Clone)]
pub struct SymbolUnit {
    pub style: u32,
    pub pins: Vec<SymbolPin>,
    pub drawings: Vec<Drawing>,
}

/// A constructed symbol: unit index to its body styles, in declaration
/// order. Read-only once built.
#[derive(Debug, Clone)]
pub struct ParsedSymbol {
    pub name: String,
    pub units: BTreeMap<u32, Vec<SymbolUnit>>,
}

impl ParsedSymbol {
    /// Builds a symbol from definition text. The text must hold exactly one
    /// `symbol` expression (already extracted and filtered).
    pub fn from_text(text: &str, ctx: &SchematicContext) -> Result<ParsedSymbol> {
        let def = sexpr::parse(text)?;
        Self::from_definition(&def, ctx)
    }

    pub fn from_definition(def: &SExpr, ctx: &SchematicContext) -> Result<ParsedSymbol> {
        if def.tag() != Some("symbol") {
            return Err(Error::InvalidSymbol(format!(
                "expected a symbol definition in {}, got {:?}",
                ctx.filename,
                def.tag()
            )));
        }
        let name = def
            .arg_str(0)
            .ok_or_else(|| Error::MissingData("symbol definition has no name".to_string()))?
            .to_string();

        let mut units: BTreeMap<u32, Vec<SymbolUnit>> = BTreeMap::new();

        for body in def.find_all("symbol") {
            let body_name = body
                .arg_str(0)
                .ok_or_else(|| Error::MissingData("unit body has no name".to_string()))?;
            let (unit, style) = parse_unit_suffix(body_name)?;
            units.entry(unit).or_default().push(SymbolUnit {
                style,
                pins: body.find_all("pin").map(parse_pin).collect(),
                drawings: body.args().iter().filter_map(parse_drawing).collect(),
            });
        }

        // Simple definitions carry pins and drawings directly on the symbol.
        let top_pins: Vec<SymbolPin> = def.find_all("pin").map(parse_pin).collect();
        let top_drawings: Vec<Drawing> = def.args().iter().filter_map(parse_drawing).collect();
        if !top_pins.is_empty() || !top_drawings.is_empty() {
            units.entry(1).or_default().push(SymbolUnit {
                style: 1,
                pins: top_pins,
                drawings: top_drawings,
            });
        }

        Ok(ParsedSymbol { name, units })
    }

    pub fn pin_count(&self) -> usize {
        self.units
            .values()
            .flatten()
            .map(|u| u.pins.len())
            .sum()
    }
}

/// Splits `NAME_U_S` into (unit, style). KiCad uses unit 0 for the body
/// shared by every unit.
fn parse_unit_suffix(body_name: &str) -> Result<(u32, u32)> {
    let mut parts = body_name.rsplitn(3, '_');
    let style = parts.next().and_then(|s| s.parse().ok());
    let unit = parts.next().and_then(|s| s.parse().ok());
    match (unit, style) {
        (Some(u), Some(s)) => Ok((u, s)),
        _ => Err(Error::InvalidSymbol(format!(
            "unit body name '{body_name}' has no _unit_style suffix"
        ))),
    }
}

fn parse_pin(node: &SExpr) -> SymbolPin {
    let at = node.find("at");
    SymbolPin {
        number: node
            .find("number")
            .and_then(|n| n.arg_str(0))
            .unwrap_or_default()
            .to_string(),
        name: node
            .find("name")
            .and_then(|n| n.arg_str(0))
            .unwrap_or_default()
            .to_string(),
        pin_type: map_pin_type(node.arg_str(0).unwrap_or("")),
        pos: at.and_then(|at| Some(Vec2::new(at.arg_f32(0)?, at.arg_f32(1)?))),
        rotation: at.and_then(|at| at.arg_f32(2)).unwrap_or(0.0),
        length: node
            .find("length")
            .and_then(|l| l.arg_f32(0))
            .unwrap_or(2.54),
    }
}

fn parse_drawing(node: &SExpr) -> Option<Drawing> {
    let width = stroke_width(node);
    match node.tag()? {
        "arc" => Some(Drawing::Arc {
            start: point_of(node.find("start")?)?,
            mid: point_of(node.find("mid")?)?,
            end: point_of(node.find("end")?)?,
            width,
        }),
        "polyline" => Some(Drawing::Polyline {
            points: node
                .find("pts")?
                .find_all("xy")
                .filter_map(point_of)
                .collect(),
            width,
            fill: fill_mode(node),
        }),
        "rectangle" => Some(Drawing::Rectangle {
            start: point_of(node.find("start")?)?,
            end: point_of(node.find("end")?)?,
            width,
            fill: fill_mode(node),
        }),
        "circle" => Some(Drawing::Circle {
            center: point_of(node.find("center")?)?,
            radius: node.find("radius")?.arg_f32(0)?,
            width,
            fill: fill_mode(node),
        }),
        "text" => Some(Drawing::Text {
            value: node.arg_str(0)?.to_string(),
            pos: node.find("at").and_then(point_of)?,
            rotation: node.find("at").and_then(|at| at.arg_f32(2)).unwrap_or(0.0),
        }),
        _ => None,
    }
}

fn point_of(node: &SExpr) -> Option<Vec2> {
    Some(Vec2::new(node.arg_f32(0)?, node.arg_f32(1)?))
}

fn stroke_width(node: &SExpr) -> f32 {
    node.find("stroke")
        .and_then(|s| s.find("width"))
        .and_then(|w| w.arg_f32(0))
        .unwrap_or(0.0)
}

fn fill_mode(node: &SExpr) -> FillMode {
    match node
        .find("fill")
        .and_then(|f| f.find("type"))
        .and_then(|t| t.arg_str(0))
    {
        Some("background") => FillMode::Background,
        Some("outline") => FillMode::Outline,
        _ => FillMode::None,
    }
}
