//! Brand watermark stamped onto every generated tifo.
//!
//! The badge sits in the bottom-right corner and scales with the image:
//! a translucent navy pill, an emerald disc carrying a white flag, and the
//! `TIFO`/`MASTER` wordmark in white and emerald.
//!
//! # Layout
//!
//! For an image of width `W` and height `H`:
//!
//! - padding `p = 0.03·W`
//! - badge height `bh = 0.08·H`, badge width `bw = 4·bh`
//! - anchor `x = W - bw - p`, `y = H - bh - p`
//!
//! See [`geometry::BadgeGeometry`] for the derived layer positions.

pub mod compositor;
pub mod error;
pub mod geometry;

pub use compositor::{
    decode_image, draw_badge, encode_png, Compositor, WatermarkedImage, BADGE_BACKGROUND,
    DEFAULT_MAX_PIXELS, EMERALD, WORDMARK_LEAD, WORDMARK_TAIL,
};
pub use error::WatermarkError;
pub use geometry::BadgeGeometry;
