// Integer geometry helpers shared by the game and the renderer

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Intersection of two rectangles, `None` when they do not overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

/// Clamp an x coordinate so that a box of `width` stays inside `[0, bound)`.
///
/// When the box is wider than the bound the left edge wins and the result is 0.
pub fn clamp_span(x: i32, width: u32, bound: u32) -> i32 {
    let max_x = bound as i32 - width as i32;
    if x > max_x {
        max_x.max(0)
    } else {
        x.max(0)
    }
}
