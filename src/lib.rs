//! # cinder-tui
//!
//! Runtime core for terminal canvas UIs. Three reused-everywhere
//! subsystems, each usable on its own:
//!
//! - [`store`] — sparse-set keyed stores: O(1) insert/lookup/remove over
//!   densely packed values, with stable entity ids.
//! - [`input`] — a backpressured byte queue feeding an explicit escape
//!   sequence state machine, plus derivation of pointer gestures
//!   (hover, press, drag, release, scroll) from consecutive raw samples.
//! - [`render`] — a styled-character grid diffed against a retained screen
//!   model, reconciling the terminal with cursor-addressed writes for
//!   changed cells only.
//!
//! [`term`] holds the unix plumbing around them: raw mode, mouse and
//! bracketed-paste toggles, size queries, and signal flags.
//!
//! # Data flow
//!
//! ```text
//! terminal bytes → RingBuffer → Decoder → GestureTracker → InputHooks
//!                                                             │
//!                              consumer mutates SparseSet stores
//!                                                             │
//!                  Display (set_char/set_style) → diff render → terminal
//! ```
//!
//! Everything is single-threaded and synchronous; the only blocking point
//! belongs to the host's event loop, which waits for input readiness and
//! drives [`input::Input::process`] and [`render::Display::render`] from
//! there. The scene model, layout, and loop composition live outside this
//! crate.

pub mod input;
pub mod render;
pub mod store;
pub mod term;
pub mod types;

pub use input::{Input, InputHooks, Modifier, Motion, MouseButton, MouseEvent};
pub use render::{Cell, Display, Style};
pub use store::{EntityId, SparseSet};
pub use types::{Area, Pos};
