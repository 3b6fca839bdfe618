//! Mouse event types and the consumer hook surface.

use crate::types::Pos;

/// A pressed mouse button. Events carry `Option<MouseButton>`; the raw
/// protocol's "no button" code (0b11) maps to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Decode the low two bits of the raw button byte.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x3 {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Motion classification of a raw mouse sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Static = 1,
    Moving = 2,
    Scrolling = 3,
}

impl Motion {
    /// Decode bits 5..7 of the raw button byte.
    ///
    /// Terminals encode plain button transitions as 1; a zero field only
    /// shows up for sub-0x20 button bytes and is treated as `Static` too.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            2 => Self::Moving,
            3 => Self::Scrolling,
            _ => Self::Static,
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during a mouse sample.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifier: u8 {
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
    }
}

/// A decoded mouse sample.
///
/// `pos` is in 1-based terminal coordinates, as reported by the terminal
/// after the fixed protocol offset has been subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub button: Option<MouseButton>,
    pub modifiers: Modifier,
    pub motion: Motion,
    pub pos: Pos,
}

impl Default for MouseEvent {
    fn default() -> Self {
        Self {
            button: None,
            modifiers: Modifier::empty(),
            motion: Motion::Static,
            pos: Pos::default(),
        }
    }
}

/// Callbacks the input layer invokes as it decodes and classifies input.
///
/// Consumer state lives in the implementor; every hook has a no-op default
/// so consumers only write the ones they care about.
pub trait InputHooks {
    /// A plain (non-escape) keyboard byte.
    fn on_key(&mut self, _byte: u8) {}

    /// Text delivered through a bracketed paste.
    fn on_paste(&mut self, _text: &str) {}

    /// Pointer moved with no button held.
    fn on_hover(&mut self, _hover: &MouseEvent) {}

    /// A button went down.
    fn on_press(&mut self, _press: &MouseEvent) {}

    /// A button came up without any drag in between.
    fn on_release(&mut self, _press: &MouseEvent) {}

    /// A held button started moving.
    fn on_drag_begin(&mut self, _begin: &MouseEvent) {}

    /// Drag in progress; `begin` is the sample captured at press time.
    fn on_drag(&mut self, _begin: &MouseEvent, _moved: &MouseEvent) {}

    /// Drag finished; `end` is the sample that released the button.
    fn on_drag_end(&mut self, _begin: &MouseEvent, _end: &MouseEvent) {}

    /// Scroll wheel sample, independent of press/drag bookkeeping.
    fn on_scroll(&mut self, _scroll: &MouseEvent) {}
}
