use serde::{Deserialize, Serialize};

/// Integer rectangle in root-window coordinates.
///
/// `right()` and `bottom()` are inclusive: a 10 pixel wide rectangle at
/// x = 0 has `right() == 9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    /// Set the right edge, keeping the left edge fixed.
    pub fn set_right(&mut self, right: i32) {
        self.width = right - self.x + 1;
    }

    /// Set the bottom edge, keeping the top edge fixed.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.height = bottom - self.y + 1;
    }

    /// Build a rectangle from inclusive edge coordinates.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left + 1, bottom - top + 1)
    }

    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    /// True when `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left().max(other.left()) <= self.right().min(other.right())
            && self.top().max(other.top()) <= self.bottom().min(other.bottom())
    }

    /// Overlap of two rectangles. Disjoint inputs produce an invalid
    /// (zero or negative sized) rectangle.
    pub fn intersection(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Residual regions of `self` once `obstacle` is cut out of it.
    ///
    /// Each residual is a full-height or full-width sliver (left, top,
    /// right, bottom), so the pieces overlap each other; this is what the
    /// free-space search wants, since every sliver is a maximal candidate.
    /// Returns `[self]` when the two do not intersect.
    pub fn subtract(&self, obstacle: &Rect) -> Vec<Rect> {
        if !self.intersects(obstacle) {
            return vec![*self];
        }

        let mut out = Vec::with_capacity(4);
        if obstacle.left() > self.left() {
            out.push(Rect::from_edges(
                self.left(),
                self.top(),
                obstacle.left() - 1,
                self.bottom(),
            ));
        }
        if obstacle.top() > self.top() {
            out.push(Rect::from_edges(
                self.left(),
                self.top(),
                self.right(),
                obstacle.top() - 1,
            ));
        }
        if obstacle.right() < self.right() {
            out.push(Rect::from_edges(
                obstacle.right() + 1,
                self.top(),
                self.right(),
                self.bottom(),
            ));
        }
        if obstacle.bottom() < self.bottom() {
            out.push(Rect::from_edges(
                self.left(),
                obstacle.bottom() + 1,
                self.right(),
                self.bottom(),
            ));
        }
        out
    }
}
