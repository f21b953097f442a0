//! Badge geometry.
//!
//! Everything is derived from the target image's dimensions. Sizes scale
//! with the image, but the background inset (10/5 px) and corner radius
//! (15 px) are absolute, so the pill looks proportionally heavier on small
//! images and lighter on large ones.
//!
//! # Example
//!
//! ```ignore
//! use tifomaster::watermark::BadgeGeometry;
//!
//! let g = BadgeGeometry::for_dimensions(1920, 1080);
//! assert!((g.x - 1516.8).abs() < 0.01); // 1920 - 4*86.4 - 57.6
//! ```

use crate::canvas::{Point, Rect};

/// Right/bottom padding as a fraction of image width.
pub const PADDING_RATIO: f32 = 0.03;
/// Badge height as a fraction of image height.
pub const BADGE_HEIGHT_RATIO: f32 = 0.08;
/// Badge width to height.
pub const BADGE_ASPECT: f32 = 4.0;
/// Horizontal inset of the background pill beyond the badge, in pixels.
pub const BACKGROUND_INSET_X: f32 = 10.0;
/// Vertical inset of the background pill beyond the badge, in pixels.
pub const BACKGROUND_INSET_Y: f32 = 5.0;
/// Corner radius of the background pill, in pixels.
pub const CORNER_RADIUS: f32 = 15.0;
/// Icon diameter as a fraction of badge height.
pub const ICON_RATIO: f32 = 0.8;
/// Wordmark font size as a fraction of badge height.
pub const FONT_RATIO: f32 = 0.7;
/// Gap between the icon and the wordmark, in pixels.
pub const TEXT_GAP: f32 = 15.0;
/// Flag stroke width as a fraction of icon size.
pub const FLAG_STROKE_RATIO: f32 = 0.08;

/// Badge layout for one image size. The anchor `(x, y)` is the badge's
/// top-left corner, bottom-right aligned against the padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeGeometry {
    pub image_width: f32,
    pub image_height: f32,
    pub padding: f32,
    pub badge_width: f32,
    pub badge_height: f32,
    pub x: f32,
    pub y: f32,
}

impl BadgeGeometry {
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        let image_width = width as f32;
        let image_height = height as f32;
        let padding = image_width * PADDING_RATIO;
        let badge_height = image_height * BADGE_HEIGHT_RATIO;
        let badge_width = badge_height * BADGE_ASPECT;

        Self {
            image_width,
            image_height,
            padding,
            badge_width,
            badge_height,
            x: image_width - badge_width - padding,
            y: image_height - badge_height - padding,
        }
    }

    /// The translucent pill behind the badge. Also the badge's bounding box.
    pub fn background(&self) -> Rect {
        Rect::new(
            self.x - BACKGROUND_INSET_X,
            self.y - BACKGROUND_INSET_Y,
            self.badge_width + 2.0 * BACKGROUND_INSET_X,
            self.badge_height + 2.0 * BACKGROUND_INSET_Y,
        )
    }

    pub fn corner_radius(&self) -> f32 {
        CORNER_RADIUS
    }

    pub fn icon_size(&self) -> f32 {
        self.badge_height * ICON_RATIO
    }

    pub fn icon_center(&self) -> Point {
        Point::new(
            self.x + self.icon_size() / 2.0,
            self.y + self.badge_height / 2.0,
        )
    }

    pub fn icon_radius(&self) -> f32 {
        self.icon_size() / 2.0
    }

    pub fn flag_stroke_width(&self) -> f32 {
        self.icon_size() * FLAG_STROKE_RATIO
    }

    /// The stylised flag drawn inside the icon disc: a pole with a
    /// swallow-tailed pennant.
    pub fn flag_points(&self) -> [Point; 9] {
        let icon = self.icon_size();
        let center = self.icon_center();
        let fx = center.x - icon * 0.25;
        let fy = center.y - icon * 0.25;
        let fs = icon * 0.5;

        [
            Point::new(fx, fy + fs),
            Point::new(fx, fy),
            Point::new(fx + fs * 0.6, fy),
            Point::new(fx + fs * 0.7, fy + fs * 0.2),
            Point::new(fx + fs, fy + fs * 0.2),
            Point::new(fx + fs * 0.8, fy + fs * 0.6),
            Point::new(fx + fs, fy + fs),
            Point::new(fx + fs * 0.5, fy + fs * 0.8),
            Point::new(fx, fy + fs * 0.8),
        ]
    }

    pub fn font_size(&self) -> f32 {
        self.badge_height * FONT_RATIO
    }

    /// Start of the wordmark: left edge, vertical middle line.
    pub fn text_origin(&self) -> Point {
        Point::new(
            self.x + self.icon_size() + TEXT_GAP,
            self.y + self.badge_height / 2.0,
        )
    }

    /// Whether the whole pill lands inside the image.
    ///
    /// Nothing is clamped. With the fixed 10 px inset the right edge sits at
    /// `W - 0.03·W + 10`, so images narrower than about 334 px overflow.
    pub fn fits_within(&self) -> bool {
        Rect::new(0.0, 0.0, self.image_width, self.image_height).contains_rect(&self.background())
    }
}
