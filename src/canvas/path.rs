//! Vector paths built from lines, quadratic curves, and circles.
//!
//! A [`Path`] records drawing commands and is lowered to a
//! `tiny_skia::Path` for rasterization.

use tiny_skia::PathBuilder;

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Same rectangle with non-negative width and height.
    pub fn normalized(&self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self::new(x, y, width, height)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic Bézier: control point, end point.
    QuadTo(Point, Point),
    /// A full closed circle as its own subpath.
    Circle { center: Point, radius: f32 },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        if !self.has_current_point() {
            return self.move_to(x, y);
        }
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        if !self.has_current_point() {
            self.move_to(cx, cy);
        }
        self.commands
            .push(PathCommand::QuadTo(Point::new(cx, cy), Point::new(x, y)));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        if !self.commands.is_empty() {
            self.commands.push(PathCommand::Close);
        }
        self
    }

    /// Append a full circle. Non-positive radii add nothing.
    pub fn circle(&mut self, center: Point, radius: f32) -> &mut Self {
        if radius > 0.0 {
            self.commands.push(PathCommand::Circle { center, radius });
        }
        self
    }

    /// Rounded rectangle made of four straight edges joined by quadratic
    /// corner curves.
    ///
    /// The radius is capped at half of the shorter side.
    pub fn rounded_rect(rect: Rect, radius: f32) -> Self {
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = rect.normalized();
        let r = radius.max(0.0).min(w / 2.0).min(h / 2.0);

        let mut path = Path::new();
        path.move_to(x + r, y)
            .line_to(x + w - r, y)
            .quad_to(x + w, y, x + w, y + r)
            .line_to(x + w, y + h - r)
            .quad_to(x + w, y + h, x + w - r, y + h)
            .line_to(x + r, y + h)
            .quad_to(x, y + h, x, y + h - r)
            .line_to(x, y + r)
            .quad_to(x, y, x + r, y)
            .close();
        path
    }

    /// Open polyline through the given points.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Path::new();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                path.move_to(p.x, p.y);
            } else {
                path.line_to(p.x, p.y);
            }
        }
        path
    }

    /// Lower to a `tiny_skia` path. `None` if the path draws nothing.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
                PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
                PathCommand::QuadTo(c, p) => builder.quad_to(c.x, c.y, p.x, p.y),
                PathCommand::Circle { center, radius } => {
                    builder.push_circle(center.x, center.y, radius)
                }
                PathCommand::Close => builder.close(),
            }
        }
        builder.finish()
    }

    /// Bounding box of all points, control points included.
    pub fn bounds(&self) -> Option<Rect> {
        let bounds = self.to_skia()?.bounds();
        Some(Rect::new(
            bounds.left(),
            bounds.top(),
            bounds.width(),
            bounds.height(),
        ))
    }

    fn has_current_point(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, PathCommand::MoveTo(_)))
    }
}
