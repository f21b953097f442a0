//! Raster canvas abstraction.
//!
//! The watermark compositor never touches pixels directly. It draws through
//! the [`Canvas`] capability trait, which exposes the handful of 2D primitives
//! the badge needs: path fill, path stroke, arcs, rounded rectangles, and
//! text drawing/measurement.
//!
//! # Backends
//!
//! - [`RasterCanvas`]: `tiny-skia` pixmap built from an `image::RgbaImage`,
//!   with glyphs rasterized by `ab_glyph`
//! - [`mock::FixedMetricCanvas`]: delegates shapes to `RasterCanvas` but
//!   draws text as solid glyph boxes with a fixed advance and records every
//!   call, so compositing can be exercised without a system font
//!
//! # Example
//!
//! ```ignore
//! use tifomaster::canvas::{Canvas, Color, RasterCanvas, Rect};
//!
//! let mut canvas = RasterCanvas::new(RgbaImage::new(200, 100), None)?;
//! canvas.fill_rounded_rect(Rect::new(10.0, 10.0, 120.0, 40.0), 15.0, Color::rgba(15, 23, 42, 0.6));
//! let image = canvas.into_image();
//! ```

pub mod color;
pub mod font;
pub mod mock;
pub mod path;
pub mod raster;

pub use color::{parse_hex_color, Color};
pub use font::{FontFace, FontLibrary};
pub use path::{Path, PathCommand, Point, Rect};
pub use raster::{RasterCanvas, RasterCanvasFactory};

use image::RgbaImage;
use thiserror::Error;

/// Errors raised by canvas backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("no font face available")]
    NoFontFace,

    #[error("surface has zero area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("surface of {pixels} pixels exceeds the budget of {max_pixels}")]
    SurfaceTooLarge { pixels: u64, max_pixels: u64 },

    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },
}

/// Font request for text drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size: f32,
    pub italic: bool,
    pub bold: bool,
}

impl FontSpec {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            italic: false,
            bold: false,
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Stroke parameters. Strokes always use round caps and round joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
}

impl StrokeStyle {
    pub fn new(width: f32) -> Self {
        Self { width }
    }
}

/// 2D drawing surface.
///
/// Coordinates are in pixels with the origin at the top-left corner.
/// Drawing outside the surface is clipped.
pub trait Canvas {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Fill a path using the non-zero winding rule.
    fn fill_path(&mut self, path: &Path, color: Color);

    /// Stroke every subpath of a path.
    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle, color: Color);

    /// Advance width of `text` at the requested font, in pixels.
    fn measure_text(&self, text: &str, font: &FontSpec) -> Result<f32, CanvasError>;

    /// Draw `text` starting at `x`, vertically centred on `y` (middle baseline).
    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        color: Color,
    ) -> Result<(), CanvasError>;

    /// Release the surface and return its pixels.
    fn into_image(self) -> RgbaImage
    where
        Self: Sized;

    /// Fill a rounded rectangle.
    ///
    /// The default builds the portable quadratic-corner path. Backends with a
    /// native primitive may override it.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.fill_path(&Path::rounded_rect(rect, radius), color);
    }

    /// Fill a full circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        let mut path = Path::new();
        path.circle(center, radius);
        self.fill_path(&path, color);
    }
}

/// Creates canvases over decoded rasters.
///
/// The compositor is generic over this so the same pipeline runs on the
/// software rasterizer in production and on a recording canvas in tests.
pub trait CanvasFactory: Send + Sync {
    type Canvas: Canvas;

    fn create(&self, image: RgbaImage) -> Result<Self::Canvas, CanvasError>;
}
