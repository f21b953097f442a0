//! Watermark compositor for stamping the TifoMaster badge onto images.
//!
//! The badge is drawn bottom-right in four layers, in this order:
//!
//! 1. Translucent navy rounded pill
//! 2. Emerald icon disc
//! 3. White flag glyph stroked inside the disc
//! 4. Two-tone wordmark: `TIFO` in white, then `MASTER` in emerald,
//!    starting exactly where `TIFO` ends
//!
//! The source raster is never resampled; the output has the input's
//! dimensions and is always PNG.
//!
//! # Example
//!
//! ```ignore
//! use tifomaster::canvas::{FontLibrary, RasterCanvasFactory};
//! use tifomaster::watermark::Compositor;
//!
//! let compositor = Compositor::new(RasterCanvasFactory::new(FontLibrary::load(None)));
//! let watermarked = compositor.composite(&generated_bytes)?;
//! std::fs::write("tifo.png", watermarked.png())?;
//! ```

use super::geometry::BadgeGeometry;
use super::WatermarkError;
use crate::canvas::{
    Canvas, CanvasError, CanvasFactory, Color, FontSpec, Path, RasterCanvasFactory, StrokeStyle,
};
use image::{DynamicImage, ImageEncoder, RgbaImage};
use std::io::Cursor;

pub use crate::constants::DEFAULT_MAX_PIXELS;

/// Translucent dark navy, `rgba(15, 23, 42, 0.6)`.
pub const BADGE_BACKGROUND: Color = Color {
    r: 15,
    g: 23,
    b: 42,
    a: 153,
};

/// Emerald, `#10b981`.
pub const EMERALD: Color = Color::rgb(0x10, 0xb9, 0x81);

/// First wordmark segment, drawn in white.
pub const WORDMARK_LEAD: &str = "TIFO";

/// Second wordmark segment, drawn in emerald right after the first.
pub const WORDMARK_TAIL: &str = "MASTER";

/// A finished watermarked image, PNG-encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct WatermarkedImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for WatermarkedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkedImage")
            .field("dimensions", &(self.width, self.height))
            .field("bytes", &self.png.len())
            .finish()
    }
}

impl WatermarkedImage {
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn content_type(&self) -> &'static str {
        "image/png"
    }
}

/// Composites the badge through a canvas backend.
#[derive(Debug, Clone)]
pub struct Compositor<F: CanvasFactory = RasterCanvasFactory> {
    factory: F,
    max_pixels: u64,
}

impl<F: CanvasFactory> Compositor<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }

    /// Cap the surface size. Larger images fail with `WatermarkError::Surface`.
    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn max_pixels(&self) -> u64 {
        self.max_pixels
    }

    /// Decode, stamp the badge, and re-encode as PNG.
    ///
    /// # Errors
    ///
    /// - `Decode` if the bytes are not a readable image
    /// - `Surface` if the image is empty, over the pixel budget, or the
    ///   canvas cannot draw text
    /// - `Encode` if PNG encoding fails
    pub fn composite(&self, bytes: &[u8]) -> Result<WatermarkedImage, WatermarkError> {
        let (width, height) = read_dimensions(bytes)?;
        self.check_surface(width, height)?;

        let source = decode_image(bytes)?;
        let stamped = self.composite_image(&source)?;
        let png = encode_png(&stamped)?;

        tracing::debug!(
            width = stamped.width(),
            height = stamped.height(),
            input_bytes = bytes.len(),
            output_bytes = png.len(),
            "Watermark composited"
        );

        Ok(WatermarkedImage {
            png,
            width: stamped.width(),
            height: stamped.height(),
        })
    }

    /// Stamp the badge onto an already decoded image.
    pub fn composite_image(&self, source: &DynamicImage) -> Result<RgbaImage, WatermarkError> {
        self.check_surface(source.width(), source.height())?;

        let geometry = BadgeGeometry::for_dimensions(source.width(), source.height());
        if !geometry.fits_within() {
            tracing::debug!(
                width = source.width(),
                height = source.height(),
                "Badge extends past the image edges and will be clipped"
            );
        }

        let mut canvas = self.factory.create(source.to_rgba8())?;
        draw_badge(&mut canvas, &geometry)?;
        Ok(canvas.into_image())
    }

    fn check_surface(&self, width: u32, height: u32) -> Result<(), WatermarkError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptySurface { width, height }.into());
        }
        let pixels = width as u64 * height as u64;
        if pixels > self.max_pixels {
            return Err(CanvasError::SurfaceTooLarge {
                pixels,
                max_pixels: self.max_pixels,
            }
            .into());
        }
        Ok(())
    }
}

/// Draw the badge layers onto a canvas.
pub fn draw_badge<C: Canvas + ?Sized>(
    canvas: &mut C,
    geometry: &BadgeGeometry,
) -> Result<(), WatermarkError> {
    canvas.fill_rounded_rect(
        geometry.background(),
        geometry.corner_radius(),
        BADGE_BACKGROUND,
    );

    canvas.fill_circle(geometry.icon_center(), geometry.icon_radius(), EMERALD);
    canvas.stroke_path(
        &Path::polyline(&geometry.flag_points()),
        &StrokeStyle::new(geometry.flag_stroke_width()),
        Color::white(),
    );

    let font = FontSpec::new(geometry.font_size()).italic().bold();
    let origin = geometry.text_origin();
    canvas.fill_text(WORDMARK_LEAD, origin.x, origin.y, &font, Color::white())?;
    let lead_width = canvas.measure_text(WORDMARK_LEAD, &font)?;
    canvas.fill_text(WORDMARK_TAIL, origin.x + lead_width, origin.y, &font, EMERALD)?;

    Ok(())
}

/// Decode image bytes of any supported format.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, WatermarkError> {
    let format = image::guess_format(bytes)
        .map_err(|e| WatermarkError::Decode(format!("unrecognised image format: {}", e)))?;
    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| WatermarkError::Decode(e.to_string()))
}

/// Read the dimensions from the image header without decoding pixels.
fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), WatermarkError> {
    image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| WatermarkError::Decode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| WatermarkError::Decode(e.to_string()))
}

/// Encode an RGBA raster as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, WatermarkError> {
    use image::codecs::png::PngEncoder;

    let mut output = Cursor::new(Vec::new());
    PngEncoder::new(&mut output)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ColorType::Rgba8,
        )
        .map_err(|e| WatermarkError::Encode(e.to_string()))?;

    Ok(output.into_inner())
}
