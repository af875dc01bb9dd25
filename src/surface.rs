// src/surface.rs

use crate::theme::Color;
use glam::{Affine2, Vec2};

/// One recorded draw call. Coordinates stay in symbol space; the surface
/// transform maps them at composite time.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        points: Vec<Vec2>,
        width: f32,
        color: Color,
    },
    Rect {
        start: Vec2,
        end: Vec2,
        width: f32,
        color: Color,
        filled: bool,
    },
    Circle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
        filled: bool,
    },
    Arc {
        start: Vec2,
        mid: Vec2,
        end: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        value: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
}

/// Compiled graphics for one layer: the draw calls recorded between
/// `begin_layer` and `end_layer`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graphics {
    pub commands: Vec<DrawCommand>,
}

impl Graphics {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// What a drawing backend must provide: sizing, clearing, a save/restore
/// transform stack, and a layer compile/render pair. Draw calls issued
/// while a layer recording is open belong to that layer.
pub trait DrawingSurface {
    fn resize(&mut self, width: f32, height: f32);
    fn clear(&mut self, color: Color);

    fn save(&mut self);
    fn restore(&mut self);
    fn set_transform(&mut self, transform: Affine2);

    fn begin_layer(&mut self);
    fn end_layer(&mut self) -> Graphics;
    fn render_layer(&mut self, graphics: &Graphics, alpha: f32, line_width_scale: f32);

    fn stroke_line(&mut self, points: &[Vec2], width: f32, color: Color);
    fn stroke_rect(&mut self, start: Vec2, end: Vec2, width: f32, color: Color);
    fn fill_rect(&mut self, start: Vec2, end: Vec2, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_arc(&mut self, start: Vec2, mid: Vec2, end: Vec2, width: f32, color: Color);
    fn draw_text(&mut self, value: &str, pos: Vec2, size: f32, color: Color);
}

/// Call log entries kept by [`RecordingSurface`], in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Resize(f32, f32),
    Clear,
    Save,
    Restore,
    SetTransform,
    BeginLayer,
    EndLayer,
    RenderLayer(usize),
}

/// A software backend that records commands instead of rasterizing. Useful
/// headless: the compiled command lists can be replayed against a real
/// backend, and the call log makes pipeline ordering observable.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub width: f32,
    pub height: f32,
    pub transform: Affine2,
    pub composited: Vec<Graphics>,
    recording: Option<Vec<DrawCommand>>,
    saved_transforms: Vec<Affine2>,
}

impl RecordingSurface {
    pub fn new() -> RecordingSurface {
        RecordingSurface::default()
    }

    fn record(&mut self, cmd: DrawCommand) {
        if let Some(rec) = self.recording.as_mut() {
            rec.push(cmd);
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.calls.push(SurfaceCall::Resize(width, height));
    }

    fn clear(&mut self, _color: Color) {
        self.composited.clear();
        self.calls.push(SurfaceCall::Clear);
    }

    fn save(&mut self) {
        self.saved_transforms.push(self.transform);
        self.calls.push(SurfaceCall::Save);
    }

    fn restore(&mut self) {
        if let Some(t) = self.saved_transforms.pop() {
            self.transform = t;
        }
        self.calls.push(SurfaceCall::Restore);
    }

    fn set_transform(&mut self, transform: Affine2) {
        self.transform = transform;
        self.calls.push(SurfaceCall::SetTransform);
    }

    fn begin_layer(&mut self) {
        self.recording = Some(Vec::new());
        self.calls.push(SurfaceCall::BeginLayer);
    }

    fn end_layer(&mut self) -> Graphics {
        self.calls.push(SurfaceCall::EndLayer);
        Graphics {
            commands: self.recording.take().unwrap_or_default(),
        }
    }

    fn render_layer(&mut self, graphics: &Graphics, _alpha: f32, _line_width_scale: f32) {
        self.calls
            .push(SurfaceCall::RenderLayer(graphics.commands.len()));
        self.composited.push(graphics.clone());
    }

    fn stroke_line(&mut self, points: &[Vec2], width: f32, color: Color) {
        self.record(DrawCommand::Line {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn stroke_rect(&mut self, start: Vec2, end: Vec2, width: f32, color: Color) {
        self.record(DrawCommand::Rect {
            start,
            end,
            width,
            color,
            filled: false,
        });
    }

    fn fill_rect(&mut self, start: Vec2, end: Vec2, color: Color) {
        self.record(DrawCommand::Rect {
            start,
            end,
            width: 0.0,
            color,
            filled: true,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.record(DrawCommand::Circle {
            center,
            radius,
            width,
            color,
            filled: false,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.record(DrawCommand::Circle {
            center,
            radius,
            width: 0.0,
            color,
            filled: true,
        });
    }

    fn stroke_arc(&mut self, start: Vec2, mid: Vec2, end: Vec2, width: f32, color: Color) {
        self.record(DrawCommand::Arc {
            start,
            mid,
            end,
            width,
            color,
        });
    }

    fn draw_text(&mut self, value: &str, pos: Vec2, size: f32, color: Color) {
        self.record(DrawCommand::Text {
            value: value.to_string(),
            pos,
            size,
            color,
        });
    }
}
