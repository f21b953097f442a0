//! Recording canvas with fixed font metrics, for testing.
//!
//! Shapes are forwarded to a [`RasterCanvas`] so pixels are real. Text is
//! drawn as one solid box per character with an advance of
//! `ADVANCE_RATIO * size`, so no font file is needed. Every call is appended
//! to a log shared with the factory.

use super::path::{Path, Rect};
use super::raster::RasterCanvas;
use super::{Canvas, CanvasError, CanvasFactory, Color, FontSpec, StrokeStyle};
use image::RgbaImage;
use parking_lot::RwLock;
use std::sync::Arc;

/// Advance per character, as a fraction of the font size.
pub const ADVANCE_RATIO: f32 = 0.6;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillPath {
        bounds: Option<Rect>,
        color: Color,
    },
    StrokePath {
        bounds: Option<Rect>,
        width: f32,
        color: Color,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
        font: FontSpec,
        color: Color,
    },
}

type CallLog = Arc<RwLock<Vec<DrawCall>>>;

/// Canvas with deterministic text metrics that records what it draws.
pub struct FixedMetricCanvas {
    inner: RasterCanvas,
    calls: CallLog,
}

impl FixedMetricCanvas {
    pub fn new(image: RgbaImage) -> Result<Self, CanvasError> {
        Ok(Self {
            inner: RasterCanvas::new(image, None)?,
            calls: Arc::new(RwLock::new(Vec::new())),
        })
    }

    /// Snapshot of the calls made so far.
    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.read().clone()
    }

    fn record(&self, call: DrawCall) {
        self.calls.write().push(call);
    }
}

impl Canvas for FixedMetricCanvas {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.record(DrawCall::FillPath {
            bounds: path.bounds(),
            color,
        });
        self.inner.fill_path(path, color);
    }

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle, color: Color) {
        self.record(DrawCall::StrokePath {
            bounds: path.bounds(),
            width: style.width,
            color,
        });
        self.inner.stroke_path(path, style, color);
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> Result<f32, CanvasError> {
        Ok(text.chars().count() as f32 * font.size * ADVANCE_RATIO)
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        color: Color,
    ) -> Result<(), CanvasError> {
        self.record(DrawCall::FillText {
            text: text.to_string(),
            x,
            y,
            font: *font,
            color,
        });

        let advance = font.size * ADVANCE_RATIO;
        let glyph_height = font.size * 0.7;
        for i in 0..text.chars().count() {
            let left = x + i as f32 * advance;
            let mut glyph = Path::new();
            glyph
                .move_to(left, y - glyph_height / 2.0)
                .line_to(left + advance * 0.8, y - glyph_height / 2.0)
                .line_to(left + advance * 0.8, y + glyph_height / 2.0)
                .line_to(left, y + glyph_height / 2.0)
                .close();
            self.inner.fill_path(&glyph, color);
        }
        Ok(())
    }

    fn into_image(self) -> RgbaImage {
        self.inner.into_image()
    }
}

/// Factory whose canvases all append to one shared call log.
#[derive(Clone, Default)]
pub struct FixedMetricCanvasFactory {
    calls: CallLog,
}

impl FixedMetricCanvasFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls made by canvases from this factory.
    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.read().clone()
    }

    /// Text calls only, in drawing order.
    pub fn text_calls(&self) -> Vec<DrawCall> {
        self.calls
            .read()
            .iter()
            .filter(|c| matches!(c, DrawCall::FillText { .. }))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.calls.write().clear();
    }
}

impl CanvasFactory for FixedMetricCanvasFactory {
    type Canvas = FixedMetricCanvas;

    fn create(&self, image: RgbaImage) -> Result<FixedMetricCanvas, CanvasError> {
        Ok(FixedMetricCanvas {
            inner: RasterCanvas::new(image, None)?,
            calls: Arc::clone(&self.calls),
        })
    }
}
