// Watermark compositor on the software rasterizer with real glyphs

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use tifomaster::canvas::{FontLibrary, RasterCanvasFactory};
use tifomaster::watermark::{BadgeGeometry, Compositor, WatermarkError};

const SKY: Rgba<u8> = Rgba([40, 90, 200, 255]);

fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let image = RgbaImage::from_pixel(width, height, SKY);
    match format {
        ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(image)
            .to_rgb8()
            .write_to(&mut buffer, format)
            .unwrap(),
        _ => image.write_to(&mut buffer, format).unwrap(),
    }
    buffer.into_inner()
}

#[test]
fn test_raster_compositor_draws_wordmark_with_embedded_font() {
    let font = FontLibrary::embedded().unwrap();
    let compositor = Compositor::new(RasterCanvasFactory::new(Some(font)));

    let output = compositor
        .composite(&encoded(1280, 720, ImageFormat::Png))
        .unwrap();
    assert_eq!(output.dimensions(), (1280, 720));

    let decoded = image::load_from_memory(output.png()).unwrap().to_rgba8();
    let g = BadgeGeometry::for_dimensions(1280, 720);
    let origin = g.text_origin();

    // Some pixel along the wordmark's middle line is not the pill colour
    // any more, so glyphs were rasterized.
    let row = origin.y as u32;
    let pill = *decoded.get_pixel(g.x as u32 - 4, row);
    let start = origin.x as u32;
    let end = (g.x + g.badge_width) as u32;
    assert!((start..end).any(|x| *decoded.get_pixel(x, row) != pill));

    // Far corner untouched
    assert_eq!(*decoded.get_pixel(0, 0), SKY);
}

#[test]
fn test_raster_compositor_without_font_fails() {
    let compositor = Compositor::new(RasterCanvasFactory::new(None));
    let err = compositor
        .composite(&encoded(640, 360, ImageFormat::Png))
        .unwrap_err();
    assert!(matches!(err, WatermarkError::Surface(_)));
}

#[test]
fn test_default_font_lookup_always_draws_text() {
    // No configured path: system faces or the embedded one
    let compositor = Compositor::new(RasterCanvasFactory::new(FontLibrary::load(None)));
    let output = compositor
        .composite(&encoded(640, 360, ImageFormat::Png))
        .unwrap();
    assert_eq!(output.dimensions(), (640, 360));
}

#[test]
fn test_jpeg_input_becomes_png() {
    let font = FontLibrary::embedded().unwrap();
    let compositor = Compositor::new(RasterCanvasFactory::new(Some(font)));

    let output = compositor
        .composite(&encoded(800, 600, ImageFormat::Jpeg))
        .unwrap();
    assert_eq!(
        image::guess_format(output.png()).unwrap(),
        ImageFormat::Png
    );
    assert_eq!(output.content_type(), "image/png");
}

#[test]
fn test_geometry_of_square_image() {
    let g = BadgeGeometry::for_dimensions(1000, 1000);
    assert!((g.padding - 30.0).abs() < 1e-3);
    assert!((g.badge_height - 80.0).abs() < 1e-3);
    assert!((g.x - 650.0).abs() < 1e-3);
    assert!((g.y - 890.0).abs() < 1e-3);
    assert!(g.fits_within());
}

#[test]
fn test_narrow_image_overflows() {
    assert!(!BadgeGeometry::for_dimensions(200, 200).fits_within());
    assert!(BadgeGeometry::for_dimensions(400, 300).fits_within());
}
