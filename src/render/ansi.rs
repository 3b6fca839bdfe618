//! ANSI escape sequences for terminal control.
//!
//! The crate assumes a fixed VT100/xterm-compatible dialect; these are the
//! exact byte strings it emits. No terminfo lookup anywhere.

use std::io::{self, Write};

use crate::types::Pos;

/// Escape character.
pub const ESC: &str = "\x1b";

/// Clear the whole screen.
pub const CLEAR: &str = "\x1b[2J";

/// Move the cursor to the top-left corner.
pub const HOME: &str = "\x1b[H";

/// Reset all styling.
pub const RESET_STYLE: &str = "\x1b[0m";

/// Erase from the cursor to the end of the line.
pub const ERASE_LINE: &str = "\x1b[K";

pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Any-motion mouse tracking (press, release, move, scroll).
pub const MOUSE_ON: &str = "\x1b[?1003h";
pub const MOUSE_OFF: &str = "\x1b[?1003l";

/// Bracketed paste mode.
pub const PASTE_ON: &str = "\x1b[?2004h";
pub const PASTE_OFF: &str = "\x1b[?2004l";

/// Move the cursor to `pos` (0-based; the wire format is 1-based).
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, pos: Pos) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", pos.y + 1, pos.x + 1)
}
