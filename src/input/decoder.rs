//! Byte-driven escape sequence decoder.
//!
//! An explicit finite state machine over the bytes coming out of the ring
//! buffer. It recognizes exactly two escape dialect features — the
//! `ESC [ M` three-byte mouse triplet and bracketed paste markers
//! (`ESC [ 2 0 0 ~` ... `ESC [ 2 0 1 ~`) — and passes every other byte
//! through as plain keyboard input.
//!
//! # Error recovery
//!
//! A byte with no transition out of the current state is a protocol error,
//! not a fatal one: [`Decoder::feed`] reports it and the driver drops the
//! partial sequence, resets to [`State::Idle`], and keeps consuming. This
//! resynchronizes after garbage instead of abandoning the rest of the
//! buffered bytes.

use thiserror::Error;

use super::events::{Modifier, Motion, MouseButton, MouseEvent};
use crate::types::Pos;

/// Escape byte.
pub const ESC: u8 = 0x1b;

/// Offset the terminal adds to mouse coordinate bytes.
const MOUSE_OFFSET: u8 = 0x20;

/// Begin-paste marker tail, after `ESC [ 2` has been consumed.
const PASTE_BEGIN_TAIL: &[u8] = b"00~";
/// End-paste marker tail, after `ESC [` inside a paste body.
const PASTE_END_TAIL: &[u8] = b"201~";

/// Decoder state: how much of a partial sequence has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    /// Saw ESC.
    Escape,
    /// Saw ESC `[`.
    Csi,
    /// Collecting the mouse triplet's button byte.
    MouseButton,
    /// Collecting the column byte.
    MouseCol { b0: u8 },
    /// Collecting the line byte.
    MouseRow { b0: u8, b1: u8 },
    /// Matching the begin-paste marker, `matched` bytes of `"00~"` seen.
    PasteBegin { matched: u8 },
    /// Inside a bracketed paste, accumulating text.
    PasteBody,
    /// Saw ESC inside a paste body.
    PasteEsc,
    /// Saw ESC `[` inside a paste body.
    PasteCsi,
    /// Matching the end-paste marker, `matched` bytes of `"201~"` seen.
    PasteEnd { matched: u8 },
}

/// A byte with no transition out of the current state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unexpected byte {byte:#04x} in decoder state {state:?}")]
pub struct DecodeError {
    pub state: State,
    pub byte: u8,
}

/// A completed unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEvent {
    /// A plain keyboard byte, dispatched immediately from `Idle`.
    Key(u8),
    /// A complete raw mouse sample.
    Mouse(MouseEvent),
    /// The full text of a bracketed paste.
    Paste(String),
}

/// The input state machine.
#[derive(Debug, Default)]
pub struct Decoder {
    state: State,
    paste: Vec<u8>,
}

impl Default for State {
    fn default() -> Self {
        Self::Idle
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            paste: Vec::new(),
        }
    }

    /// Current state, mainly for diagnostics.
    pub fn state(&self) -> State {
        self.state
    }

    /// Drop any partial sequence and return to `Idle`.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.paste.clear();
    }

    /// Consume one byte. Returns a completed event, nothing (sequence still
    /// in progress), or a protocol error. On error the decoder keeps its
    /// state; the caller decides whether to [`reset`](Self::reset).
    pub fn feed(&mut self, byte: u8) -> Result<Option<DecodedEvent>, DecodeError> {
        match self.state {
            State::Idle => match byte {
                ESC => {
                    self.state = State::Escape;
                    Ok(None)
                }
                b => Ok(Some(DecodedEvent::Key(b))),
            },

            State::Escape => match byte {
                // Two consecutive escapes cancel each other out.
                ESC => {
                    self.state = State::Idle;
                    Ok(None)
                }
                b'[' => {
                    self.state = State::Csi;
                    Ok(None)
                }
                b => self.fail(b),
            },

            State::Csi => match byte {
                b'M' => {
                    self.state = State::MouseButton;
                    Ok(None)
                }
                b'2' => {
                    self.state = State::PasteBegin { matched: 0 };
                    Ok(None)
                }
                b => self.fail(b),
            },

            State::MouseButton => {
                self.state = State::MouseCol { b0: byte };
                Ok(None)
            }
            State::MouseCol { b0 } => {
                self.state = State::MouseRow { b0, b1: byte };
                Ok(None)
            }
            State::MouseRow { b0, b1 } => {
                self.state = State::Idle;
                Ok(Some(DecodedEvent::Mouse(decode_mouse(b0, b1, byte))))
            }

            State::PasteBegin { matched } => {
                if byte != PASTE_BEGIN_TAIL[matched as usize] {
                    return self.fail(byte);
                }
                let matched = matched + 1;
                self.state = if matched as usize == PASTE_BEGIN_TAIL.len() {
                    State::PasteBody
                } else {
                    State::PasteBegin { matched }
                };
                Ok(None)
            }

            State::PasteBody => {
                if byte == ESC {
                    self.state = State::PasteEsc;
                } else {
                    self.paste.push(byte);
                }
                Ok(None)
            }
            State::PasteEsc => match byte {
                b'[' => {
                    self.state = State::PasteCsi;
                    Ok(None)
                }
                b => self.fail(b),
            },
            State::PasteCsi => self.feed_paste_end(0, byte),
            State::PasteEnd { matched } => self.feed_paste_end(matched, byte),
        }
    }

    fn feed_paste_end(
        &mut self,
        matched: u8,
        byte: u8,
    ) -> Result<Option<DecodedEvent>, DecodeError> {
        if byte != PASTE_END_TAIL[matched as usize] {
            return self.fail(byte);
        }
        let matched = matched + 1;
        if matched as usize == PASTE_END_TAIL.len() {
            self.state = State::Idle;
            let text = String::from_utf8_lossy(&self.paste).into_owned();
            self.paste.clear();
            Ok(Some(DecodedEvent::Paste(text)))
        } else {
            self.state = State::PasteEnd { matched };
            Ok(None)
        }
    }

    fn fail(&self, byte: u8) -> Result<Option<DecodedEvent>, DecodeError> {
        Err(DecodeError {
            state: self.state,
            byte,
        })
    }
}

/// Decode a completed three-byte mouse triplet.
fn decode_mouse(b0: u8, b1: u8, b2: u8) -> MouseEvent {
    MouseEvent {
        button: MouseButton::from_bits(b0 & 0x3),
        modifiers: Modifier::from_bits_truncate((b0 >> 2) & 0x7),
        motion: Motion::from_bits((b0 >> 5) & 0x3),
        pos: Pos::new(
            b1.wrapping_sub(MOUSE_OFFSET) as u16,
            b2.wrapping_sub(MOUSE_OFFSET) as u16,
        ),
    }
}
