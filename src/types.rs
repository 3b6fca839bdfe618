//! Shared geometry types.
//!
//! Terminal coordinates are cell-based: `x` is the column, `y` is the line.
//! An [`Area`] is a pair of inclusive corners, which is what the renderer
//! and clear operations work in.

/// A position on the terminal grid (column, line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub x: u16,
    pub y: u16,
}

impl Pos {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A rectangular region described by two inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Area {
    pub first: Pos,
    pub second: Pos,
}

impl Area {
    pub const fn new(first: Pos, second: Pos) -> Self {
        Self { first, second }
    }

    /// Full area from the origin to `size - 1` in both axes.
    pub fn of_size(size: Pos) -> Self {
        Self {
            first: Pos::new(0, 0),
            second: Pos::new(size.x.saturating_sub(1), size.y.saturating_sub(1)),
        }
    }

    /// Reorder the corners so `first` is the top-left one.
    pub fn normalized(self) -> Self {
        let mut a = self;
        if a.first.x > a.second.x {
            core::mem::swap(&mut a.first.x, &mut a.second.x);
        }
        if a.first.y > a.second.y {
            core::mem::swap(&mut a.first.y, &mut a.second.y);
        }
        a
    }

    /// Check whether `pos` falls inside the (normalized) area.
    pub fn contains(&self, pos: Pos) -> bool {
        let a = self.normalized();
        pos.x >= a.first.x && pos.x <= a.second.x && pos.y >= a.first.y && pos.y <= a.second.y
    }
}
