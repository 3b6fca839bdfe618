//! Display grid and diff renderer.
//!
//! The display keeps two full character+style grids: the draw grid, which
//! `set_char` and friends write into, and a screen model recording what the
//! terminal currently shows. `render_area` diffs the two and emits a
//! cursor-addressed write for changed cells only, updating the screen model
//! cell by cell as it goes. Rendering the same frame twice in a row
//! therefore emits nothing, and a draw outside one render's area is still
//! pending for the next render that covers it.
//!
//! Grids are allocated once at the fixed maximum size; a terminal resize
//! only moves the logical bounds and forces one full repaint. The resize
//! signal handler itself just sets a flag — the size query and repaint
//! happen synchronously inside the next `render` call.

use std::borrow::Cow;
use std::io::{self, Write};

use tracing::trace;

use super::ansi;
use crate::types::{Area, Pos};

/// Widest terminal the grids accommodate.
pub const MAX_WIDTH: u16 = 256;
/// Tallest terminal the grids accommodate.
pub const MAX_HEIGHT: u16 = 256;

/// A styling escape sequence applied to a cell.
///
/// Equality is by sequence text, which is what drives the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style(Cow<'static, str>);

impl Style {
    pub const fn from_static(seq: &'static str) -> Self {
        Self(Cow::Borrowed(seq))
    }

    pub fn new(seq: impl Into<Cow<'static, str>>) -> Self {
        Self(seq.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One terminal cell: a glyph and an optional style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Option<Style>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: None,
        }
    }
}

/// Styled-character grid with minimal-update rendering.
#[derive(Debug)]
pub struct Display {
    /// The grid draw calls write into.
    grid: Vec<Cell>,
    /// What the terminal currently shows, updated per emitted cell.
    screen: Vec<Cell>,
    /// Current terminal bounds; cells beyond them are ignored.
    size: Pos,
    force_repaint: bool,
}

impl Display {
    /// Create a display for a terminal of `size`. Bounds are clamped to the
    /// fixed maximum grid dimensions; the backing grids never grow.
    pub fn new(size: Pos) -> Self {
        let cells = MAX_WIDTH as usize * MAX_HEIGHT as usize;
        Self {
            grid: vec![Cell::default(); cells],
            screen: vec![Cell::default(); cells],
            size: clamp_size(size),
            force_repaint: true,
        }
    }

    /// Current terminal bounds.
    pub fn size(&self) -> Pos {
        self.size
    }

    /// Update the bounds after a terminal resize and schedule one
    /// unconditional full repaint.
    pub fn resize(&mut self, size: Pos) {
        self.size = clamp_size(size);
        self.force_repaint = true;
    }

    /// Force the next render to repaint every cell regardless of the diff.
    pub fn invalidate(&mut self) {
        self.force_repaint = true;
    }

    /// Set the glyph at `pos` in the draw grid. Out-of-bounds writes are
    /// silently ignored.
    pub fn set_char(&mut self, pos: Pos, ch: char) {
        if let Some(idx) = self.index(pos) {
            self.grid[idx].ch = ch;
        }
    }

    /// Set the style at `pos` in the draw grid. Out-of-bounds writes are
    /// silently ignored.
    pub fn set_style(&mut self, pos: Pos, style: Style) {
        if let Some(idx) = self.index(pos) {
            self.grid[idx].style = Some(style);
        }
    }

    /// Reset every cell of `area` in the draw grid to a blank glyph and
    /// default style.
    pub fn clear_area(&mut self, area: Area) {
        let area = area.normalized();
        for y in area.first.y..=area.second.y.min(self.size.y.saturating_sub(1)) {
            for x in area.first.x..=area.second.x.min(self.size.x.saturating_sub(1)) {
                if let Some(idx) = self.index(Pos::new(x, y)) {
                    self.grid[idx] = Cell::default();
                }
            }
        }
    }

    /// Clear the whole current bounds.
    pub fn clear(&mut self) {
        self.clear_area(Area::of_size(self.size));
    }

    /// Diff-render `area` (intersected with the current bounds) to `out`.
    ///
    /// Emits, per changed cell: the style sequence if the cell is styled, a
    /// cursor-position escape, the glyph, and a style reset. Only emitted
    /// cells update the screen model, so draws falling outside `area` stay
    /// pending until a later render covers them. Clears the forced-repaint
    /// flag. Returns the number of cells written.
    pub fn render_area<W: Write>(&mut self, out: &mut W, area: Area) -> io::Result<usize> {
        let area = area.normalized();
        let mut written = 0usize;

        for y in area.first.y..=area.second.y {
            if y >= self.size.y {
                break;
            }
            for x in area.first.x..=area.second.x {
                if x >= self.size.x {
                    break;
                }
                let idx = y as usize * MAX_WIDTH as usize + x as usize;
                let cell = &self.grid[idx];
                if self.force_repaint || *cell != self.screen[idx] {
                    if let Some(style) = &cell.style {
                        out.write_all(style.as_str().as_bytes())?;
                    }
                    ansi::cursor_to(out, Pos::new(x, y))?;
                    let mut glyph = [0u8; 4];
                    out.write_all(cell.ch.encode_utf8(&mut glyph).as_bytes())?;
                    out.write_all(ansi::RESET_STYLE.as_bytes())?;
                    self.screen[idx] = cell.clone();
                    written += 1;
                }
            }
        }

        self.force_repaint = false;

        trace!(cells = written, "rendered area");
        Ok(written)
    }

    /// Render the full screen area.
    ///
    /// Consumes a pending resize notification first: the terminal size is
    /// re-queried, bounds updated, and the whole new area repainted once.
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        #[cfg(unix)]
        if crate::term::take_resize() {
            self.resize(crate::term::window_size()?);
        }
        let written = self.render_area(out, Area::of_size(self.size))?;
        out.flush()?;
        Ok(written)
    }

    #[inline]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x < self.size.x && pos.y < self.size.y {
            Some(pos.y as usize * MAX_WIDTH as usize + pos.x as usize)
        } else {
            None
        }
    }
}

fn clamp_size(size: Pos) -> Pos {
    Pos::new(size.x.min(MAX_WIDTH), size.y.min(MAX_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOLD: Style = Style::from_static("\x1b[1m");

    fn display() -> Display {
        let mut d = Display::new(Pos::new(20, 10));
        // Flush the initial forced repaint so tests start from a clean diff.
        let mut sink = Vec::new();
        d.render_area(&mut sink, Area::of_size(d.size())).unwrap();
        d
    }

    #[test]
    fn only_changed_cells_are_written() {
        let mut d = display();
        d.set_char(Pos::new(3, 2), 'x');

        let mut out = Vec::new();
        let written = d.render_area(&mut out, Area::of_size(d.size())).unwrap();
        assert_eq!(written, 1);
        assert_eq!(out, b"\x1b[3;4Hx\x1b[0m");
    }

    #[test]
    fn diff_is_idempotent() {
        let mut d = display();
        d.set_char(Pos::new(0, 0), 'a');

        let mut out = Vec::new();
        d.render_area(&mut out, Area::of_size(d.size())).unwrap();
        assert!(!out.is_empty());

        out.clear();
        let written = d.render_area(&mut out, Area::of_size(d.size())).unwrap();
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn draws_outside_partial_area_stay_pending() {
        let mut d = display();
        d.set_char(Pos::new(8, 4), 'Z');

        // A render over a corner that excludes the draw emits nothing and
        // must not absorb it.
        let mut out = Vec::new();
        let corner = Area::new(Pos::new(0, 0), Pos::new(2, 2));
        assert_eq!(d.render_area(&mut out, corner).unwrap(), 0);
        assert!(out.is_empty());

        // The next full render still owes the terminal that cell.
        let written = d.render_area(&mut out, Area::of_size(d.size())).unwrap();
        assert_eq!(written, 1);
        assert_eq!(out, b"\x1b[5;9HZ\x1b[0m");
    }

    #[test]
    fn invalidate_forces_full_repaint() {
        let mut d = display();
        let area = Area::new(Pos::new(0, 0), Pos::new(4, 1));

        let mut out = Vec::new();
        assert_eq!(d.render_area(&mut out, area).unwrap(), 0);

        d.invalidate();
        out.clear();
        // 5 columns x 2 lines, all unchanged, all repainted anyway.
        assert_eq!(d.render_area(&mut out, area).unwrap(), 10);
    }

    #[test]
    fn resize_updates_bounds_and_repaints() {
        let mut d = display();
        d.resize(Pos::new(2, 2));
        let mut out = Vec::new();
        assert_eq!(d.render_area(&mut out, Area::of_size(Pos::new(50, 50))).unwrap(), 4);
        assert_eq!(d.size(), Pos::new(2, 2));
    }

    #[test]
    fn styled_cell_wraps_glyph_in_style_and_reset() {
        let mut d = display();
        d.set_char(Pos::new(0, 0), 'S');
        d.set_style(Pos::new(0, 0), BOLD);

        let mut out = Vec::new();
        d.render_area(&mut out, Area::of_size(d.size())).unwrap();
        assert_eq!(out, b"\x1b[1m\x1b[1;1HS\x1b[0m");
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut d = display();
        d.set_char(Pos::new(100, 100), 'x');
        d.set_style(Pos::new(25, 0), BOLD);

        let mut out = Vec::new();
        assert_eq!(d.render_area(&mut out, Area::of_size(Pos::new(300, 300))).unwrap(), 0);
    }

    #[test]
    fn clear_area_blanks_cells() {
        let mut d = display();
        d.set_char(Pos::new(1, 1), 'x');
        d.set_char(Pos::new(2, 1), 'y');
        let mut out = Vec::new();
        d.render_area(&mut out, Area::of_size(d.size())).unwrap();

        d.clear_area(Area::new(Pos::new(1, 1), Pos::new(2, 1)));
        out.clear();
        // Both cells changed back to blanks.
        assert_eq!(d.render_area(&mut out, Area::of_size(d.size())).unwrap(), 2);
    }

    #[test]
    fn size_is_clamped_to_grid_maximum() {
        let d = Display::new(Pos::new(10_000, 10_000));
        assert_eq!(d.size(), Pos::new(MAX_WIDTH, MAX_HEIGHT));
    }
}
