//! Software canvas over a `tiny_skia::Pixmap`.
//!
//! Paths are filled with the non-zero winding rule and stroked with round
//! caps and joins, both anti-aliased by `tiny-skia`. Text is rasterized glyph
//! by glyph with `ab_glyph` into a coverage mask, with synthetic oblique and
//! bold when the loaded face lacks the requested style, and the mask is then
//! painted in one pass.

use super::font::FontFace;
use super::path::Path;
use super::{Canvas, CanvasError, CanvasFactory, Color, FontSpec, StrokeStyle};
use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::sync::Arc;
use tiny_skia::{ColorU8, FillRule, LineCap, LineJoin, Mask, Paint, Pixmap, Stroke, Transform};

/// Horizontal shear for synthetic italics (about 12 degrees).
const OBLIQUE_SKEW: f32 = 0.21;

/// Synthetic bold overdraws glyphs by one pixel per this many pixels of size.
const BOLD_DIVISOR: f32 = 24.0;

/// Canvas backed by an in-memory premultiplied RGBA pixmap.
pub struct RasterCanvas {
    pixmap: Pixmap,
    font: Option<Arc<FontFace>>,
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("dimensions", &(self.pixmap.width(), self.pixmap.height()))
            .field("font", &self.font.as_ref().map(|face| face.name()))
            .finish()
    }
}

impl RasterCanvas {
    /// Copy a raster onto a new pixmap. Text drawing needs `font`; shapes
    /// work without it.
    ///
    /// # Errors
    ///
    /// `Allocation` if the pixmap cannot be created (zero or oversized
    /// dimensions).
    pub fn new(image: RgbaImage, font: Option<Arc<FontFace>>) -> Result<Self, CanvasError> {
        let (width, height) = image.dimensions();
        let mut pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::Allocation { width, height })?;

        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            let Rgba([r, g, b, a]) = *src;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        Ok(Self { pixmap, font })
    }

    /// Straight-alpha pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.pixmap.pixel(x, y).map(|p| straight(p.demultiply()))
    }

    fn face(&self) -> Result<Arc<FontFace>, CanvasError> {
        self.font.clone().ok_or(CanvasError::NoFontFace)
    }
}

impl Canvas for RasterCanvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let Some(path) = path.to_skia() else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle, color: Color) {
        // tiny-skia treats zero width as a hairline
        if style.width <= 0.0 {
            return;
        }
        let Some(path) = path.to_skia() else {
            return;
        };
        let stroke = Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn measure_text(&self, text: &str, spec: &FontSpec) -> Result<f32, CanvasError> {
        let face = self.face()?;
        let font = face.font();
        let scaled = font.as_scaled(PxScale::from(spec.size));

        let mut width = 0.0f32;
        let mut prev_glyph: Option<ab_glyph::GlyphId> = None;
        for c in text.chars() {
            let glyph_id = scaled.glyph_id(c);
            if let Some(prev) = prev_glyph {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }

        Ok(width)
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        spec: &FontSpec,
        color: Color,
    ) -> Result<(), CanvasError> {
        let face = self.face()?;
        if text.is_empty() {
            return Ok(());
        }

        let font = face.font();
        let scale = PxScale::from(spec.size);
        let scaled = font.as_scaled(scale);

        // Middle baseline: centre of the em box sits on `y`. ab_glyph descent is negative.
        let baseline = y + (scaled.ascent() + scaled.descent()) / 2.0;

        let skew = if spec.italic && !face.is_italic() {
            OBLIQUE_SKEW
        } else {
            0.0
        };
        let overdraw = if spec.bold && !face.is_bold() {
            (spec.size / BOLD_DIVISOR).round().max(1.0) as i32
        } else {
            0
        };

        let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height()).ok_or(
            CanvasError::Allocation {
                width: self.pixmap.width(),
                height: self.pixmap.height(),
            },
        )?;
        let mut coverage = CoverageMask::new(&mut mask);
        let mut cursor_x = x;
        let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

        for c in text.chars() {
            let glyph_id = scaled.glyph_id(c);
            if let Some(prev) = prev_glyph {
                cursor_x += scaled.kern(prev, glyph_id);
            }

            let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(cursor_x, baseline));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, glyph_coverage| {
                    let px = bounds.min.x + gx as f32;
                    let py = bounds.min.y + gy as f32;
                    let sheared = px + skew * (baseline - (py + 0.5));
                    let column = sheared.floor();
                    let frac = sheared - column;
                    let row = py as i32;

                    for k in 0..=overdraw {
                        let left = column as i32 + k;
                        coverage.add(left, row, glyph_coverage * (1.0 - frac));
                        coverage.add(left + 1, row, glyph_coverage * frac);
                    }
                });
            }

            cursor_x += scaled.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }

        let Some(touched) = coverage.touched() else {
            return Ok(());
        };
        self.pixmap
            .fill_rect(touched, &paint(color), Transform::identity(), Some(&mask));

        Ok(())
    }

    fn into_image(self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            *dst = straight(src.demultiply());
        }
        image
    }
}

/// Factory for software canvases sharing one font face.
#[derive(Debug, Clone, Default)]
pub struct RasterCanvasFactory {
    font: Option<Arc<FontFace>>,
}

impl RasterCanvasFactory {
    pub fn new(font: Option<Arc<FontFace>>) -> Self {
        Self { font }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }
}

impl CanvasFactory for RasterCanvasFactory {
    type Canvas = RasterCanvas;

    fn create(&self, image: RgbaImage) -> Result<RasterCanvas, CanvasError> {
        RasterCanvas::new(image, self.font.clone())
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn straight(color: ColorU8) -> Rgba<u8> {
    Rgba([color.red(), color.green(), color.blue(), color.alpha()])
}

/// Glyph coverage accumulated into a pixmap-sized mask, tracking the
/// touched area so only that region is painted.
struct CoverageMask<'a> {
    width: i32,
    height: i32,
    data: &'a mut [u8],
    min: (i32, i32),
    max: (i32, i32),
}

impl<'a> CoverageMask<'a> {
    fn new(mask: &'a mut Mask) -> Self {
        let (width, height) = (mask.width() as i32, mask.height() as i32);
        Self {
            width,
            height,
            data: mask.data_mut(),
            min: (i32::MAX, i32::MAX),
            max: (i32::MIN, i32::MIN),
        }
    }

    fn add(&mut self, x: i32, y: i32, coverage: f32) {
        if coverage <= 0.0 || x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let index = (y * self.width + x) as usize;
        let value = (coverage.min(1.0) * 255.0).round() as u8;
        self.data[index] = self.data[index].saturating_add(value);

        self.min = (self.min.0.min(x), self.min.1.min(y));
        self.max = (self.max.0.max(x), self.max.1.max(y));
    }

    fn touched(&self) -> Option<tiny_skia::Rect> {
        if self.min.0 > self.max.0 {
            return None;
        }
        tiny_skia::Rect::from_ltrb(
            self.min.0 as f32,
            self.min.1 as f32,
            (self.max.0 + 1) as f32,
            (self.max.1 + 1) as f32,
        )
    }
}
