use symview_rs::{
    error::{Error, Result},
    layers::{LayerName, LayerSet},
    painter::{SymbolPainter, ThemedPainter},
    render::{self, SymbolView},
    surface::{DrawingSurface, RecordingSurface, SurfaceCall},
    symbol_models::{ParsedSymbol, SchematicContext},
    theme::{Color, Theme},
};

const RESISTOR: &str = r#"(symbol "Device:R"
  (symbol "R_0_1"
    (rectangle (start -1.016 -2.54) (end 1.016 2.54)
      (stroke (width 0.254)) (fill (type background))))
  (symbol "R_1_1"
    (pin passive line (at 0 3.81 270) (length 1.27)
      (name "~" (effects (font (size 1.27 1.27))))
      (number "1" (effects (font (size 1.27 1.27)))))
    (pin passive line (at 0 -3.81 90) (length 1.27)
      (name "~" (effects (font (size 1.27 1.27))))
      (number "2" (effects (font (size 1.27 1.27)))))))"#;

fn resistor() -> ParsedSymbol {
    let ctx = SchematicContext::new("test.kicad_sym");
    ParsedSymbol::from_text(RESISTOR, &ctx).expect("fixture must parse")
}

fn count(calls: &[SurfaceCall], wanted: fn(&SurfaceCall) -> bool) -> usize {
    calls.iter().filter(|c| wanted(c)).count()
}

/// Painter that fails on one layer, for failure-path assertions.
struct FailingPainter {
    inner: ThemedPainter,
    fail_on: LayerName,
}

impl SymbolPainter for FailingPainter {
    fn background_color(&self) -> Color {
        self.inner.background_color()
    }

    fn paint_item(
        &mut self,
        surface: &mut dyn DrawingSurface,
        layer: LayerName,
        symbol: &ParsedSymbol,
    ) -> Result<()> {
        if layer == self.fail_on {
            return Err(Error::PaintError("injected failure".to_string()));
        }
        self.inner.paint_item(surface, layer, symbol)
    }
}

#[test]
fn test_render_pass_call_order() {
    let mut surface = RecordingSurface::new();
    let mut painter = ThemedPainter::new(Theme::kicad_classic());
    let mut layers = LayerSet::full();
    let symbol = resistor();

    render::run_render_pass(
        &mut surface,
        &mut painter,
        &mut layers,
        &symbol,
        Some((400.0, 300.0)),
    );

    let calls = &surface.calls;
    assert_eq!(calls[0], SurfaceCall::Resize(400.0, 300.0));
    assert_eq!(count(calls, |c| matches!(c, SurfaceCall::Clear)), 1);
    assert_eq!(count(calls, |c| matches!(c, SurfaceCall::Save)), 1);
    assert_eq!(count(calls, |c| matches!(c, SurfaceCall::Restore)), 1);

    let clear_at = calls.iter().position(|c| matches!(c, SurfaceCall::Clear));
    let first_layer_at = calls
        .iter()
        .position(|c| matches!(c, SurfaceCall::BeginLayer));
    assert!(
        clear_at < first_layer_at,
        "clear must precede all layer painting: {calls:?}"
    );
    assert_eq!(
        calls.last(),
        Some(&SurfaceCall::Restore),
        "restore must close the pass"
    );

    // all three layers compile and composite
    assert_eq!(count(calls, |c| matches!(c, SurfaceCall::BeginLayer)), 3);
    assert_eq!(count(calls, |c| matches!(c, SurfaceCall::RenderLayer(_))), 3);
    assert!(layers.get(LayerName::Background).unwrap().graphics.is_some());
    assert!(layers.get(LayerName::Pin).unwrap().graphics.is_some());
}

#[test]
fn test_render_pass_fallback_size() {
    let mut surface = RecordingSurface::new();
    let mut painter = ThemedPainter::new(Theme::kicad_classic());
    let mut layers = LayerSet::full();
    let symbol = resistor();

    render::run_render_pass(&mut surface, &mut painter, &mut layers, &symbol, None);
    assert_eq!(surface.calls[0], SurfaceCall::Resize(300.0, 200.0));

    let mut surface = RecordingSurface::new();
    render::run_render_pass(
        &mut surface,
        &mut painter,
        &mut layers,
        &symbol,
        Some((0.0, 150.0)),
    );
    assert_eq!(
        surface.calls[0],
        SurfaceCall::Resize(300.0, 200.0),
        "degenerate host rectangle must fall back"
    );
}

#[test]
fn test_missing_layer_is_skipped_silently() {
    let mut surface = RecordingSurface::new();
    let mut painter = ThemedPainter::new(Theme::kicad_classic());
    let mut layers = LayerSet::with_layers(&[LayerName::Background, LayerName::Pin]);
    let symbol = resistor();

    render::run_render_pass(
        &mut surface,
        &mut painter,
        &mut layers,
        &symbol,
        Some((400.0, 300.0)),
    );

    assert_eq!(count(&surface.calls, |c| matches!(c, SurfaceCall::BeginLayer)), 2);
    assert_eq!(
        count(&surface.calls, |c| matches!(c, SurfaceCall::RenderLayer(_))),
        2
    );
    assert!(layers.get(LayerName::Foreground).is_none());
}

#[test]
fn test_painting_failure_keeps_partial_result() {
    let mut surface = RecordingSurface::new();
    let mut painter = FailingPainter {
        inner: ThemedPainter::new(Theme::kicad_classic()),
        fail_on: LayerName::Foreground,
    };
    let mut layers = LayerSet::full();
    let symbol = resistor();

    render::run_render_pass(
        &mut surface,
        &mut painter,
        &mut layers,
        &symbol,
        Some((400.0, 300.0)),
    );

    // first layer survives, failed and later layers are absent
    assert!(layers.get(LayerName::Background).unwrap().graphics.is_some());
    assert!(layers.get(LayerName::Foreground).unwrap().graphics.is_none());
    assert!(layers.get(LayerName::Pin).unwrap().graphics.is_none());

    // only the surviving layer composites, and the transform state is
    // restored exactly once
    assert_eq!(
        count(&surface.calls, |c| matches!(c, SurfaceCall::RenderLayer(_))),
        1
    );
    assert_eq!(count(&surface.calls, |c| matches!(c, SurfaceCall::Save)), 1);
    assert_eq!(count(&surface.calls, |c| matches!(c, SurfaceCall::Restore)), 1);
    assert_eq!(surface.calls.last(), Some(&SurfaceCall::Restore));
}

#[test]
fn test_failed_pass_drops_graphics_from_prior_pass() {
    let mut layers = LayerSet::full();
    let symbol = resistor();

    // first pass compiles everything
    let mut surface = RecordingSurface::new();
    let mut painter = ThemedPainter::new(Theme::kicad_classic());
    render::run_render_pass(
        &mut surface,
        &mut painter,
        &mut layers,
        &symbol,
        Some((400.0, 300.0)),
    );
    assert!(layers.get(LayerName::Pin).unwrap().graphics.is_some());

    // second pass against the same layer set fails mid-compile; layers
    // after the failure must be recompiled or absent, never reused
    let mut surface = RecordingSurface::new();
    let mut painter = FailingPainter {
        inner: ThemedPainter::new(Theme::kicad_classic()),
        fail_on: LayerName::Foreground,
    };
    render::run_render_pass(
        &mut surface,
        &mut painter,
        &mut layers,
        &symbol,
        Some((400.0, 300.0)),
    );

    assert!(layers.get(LayerName::Background).unwrap().graphics.is_some());
    assert!(layers.get(LayerName::Foreground).unwrap().graphics.is_none());
    assert!(
        layers.get(LayerName::Pin).unwrap().graphics.is_none(),
        "pin graphics from the prior pass must not survive a failed compile"
    );
    assert_eq!(
        count(&surface.calls, |c| matches!(c, SurfaceCall::RenderLayer(_))),
        1,
        "only the freshly compiled layer composites"
    );
}

#[test]
fn test_view_schedules_single_flight() {
    let mut view = SymbolView::new(
        RecordingSurface::new(),
        ThemedPainter::new(Theme::kicad_classic()),
    );

    assert!(!view.request_render(), "nothing loaded yet");

    view.load(RESISTOR, "test.kicad_sym");
    assert!(view.symbol().is_some());

    assert!(view.request_render());
    assert!(!view.request_render(), "second request must be absorbed");

    view.run_scheduled(Some((400.0, 300.0)));
    assert_eq!(
        count(&view.surface().calls, |c| matches!(c, SurfaceCall::Clear)),
        1
    );

    // flag was consumed: nothing runs without a new request
    let calls_before = view.surface().calls.len();
    view.run_scheduled(Some((400.0, 300.0)));
    assert_eq!(view.surface().calls.len(), calls_before);

    assert!(view.request_render(), "requests open up again after the pass");
}

#[test]
fn test_construction_failure_leaves_quiet_view() {
    let mut view = SymbolView::new(
        RecordingSurface::new(),
        ThemedPainter::new(Theme::kicad_classic()),
    );
    view.load("(this is not a symbol", "broken.kicad_sym");
    assert!(view.symbol().is_none());

    // loaded with no symbol is a legitimate no-op state, not an error
    view.request_render();
    view.run_scheduled(Some((400.0, 300.0)));
    assert!(
        view.surface().calls.is_empty(),
        "no surface traffic without a symbol: {:?}",
        view.surface().calls
    );
}

#[test]
fn test_render_from_lib_symbols_container() {
    let raw = format!("(kicad_sch (version 20230121) (lib_symbols {RESISTOR}))");
    let mut surface = RecordingSurface::new();
    let result = symview_rs::render_symbol_text(
        &raw,
        "container.kicad_sch",
        &mut surface,
        &Theme::kicad_classic(),
        Some((640.0, 480.0)),
    );
    assert!(result.is_ok(), "render failed: {:?}", result.err());
    assert_eq!(count(&surface.calls, |c| matches!(c, SurfaceCall::Clear)), 1);
    assert_eq!(
        count(&surface.calls, |c| matches!(c, SurfaceCall::RenderLayer(_))),
        3
    );
    assert!(!surface.composited.is_empty());
}

#[test]
fn test_theme_rejects_partial_json() {
    let partial = r#"{"background": {"r": 1.0, "g": 1.0, "b": 1.0, "a": 1.0}}"#;
    assert!(Theme::from_json(partial).is_err(), "partial themes must fail");

    let full = serde_json::to_string(&Theme::kicad_classic()).unwrap();
    let reloaded = Theme::from_json(&full).unwrap();
    assert_eq!(reloaded, Theme::kicad_classic());
}
