//! Pointer gesture derivation.
//!
//! Raw mouse samples say nothing about intent; gestures fall out of
//! comparing each sample against the previous one. The tracker keeps the
//! pair plus the samples captured at press and release time, and fires at
//! most one press / drag-begin / drag-or-hover / release hook per sample,
//! evaluated in that fixed order. Scroll is stateless and fires on top of
//! whatever else the sample triggered.

use super::events::{InputHooks, Motion, MouseEvent};

/// Per-pointer gesture state. Created once, lives for the whole session.
#[derive(Debug, Default)]
pub struct GestureTracker {
    prev: MouseEvent,
    last: MouseEvent,
    pressed: MouseEvent,
    released: MouseEvent,
    dragging: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is currently in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The sample captured when the current (or most recent) press began.
    pub fn pressed(&self) -> &MouseEvent {
        &self.pressed
    }

    /// The sample that most recently released a button.
    pub fn released(&self) -> &MouseEvent {
        &self.released
    }

    /// Advance the tracker with a freshly decoded sample, firing hooks.
    pub fn advance<H: InputHooks>(&mut self, event: MouseEvent, hooks: &mut H) {
        self.prev = self.last;
        self.last = event;

        let prev = self.prev;
        let cur = self.last;

        if prev.button.is_none()
            && matches!(prev.motion, Motion::Static | Motion::Moving)
            && cur.button.is_some()
        {
            // Press: a button went down on an idle pointer.
            self.pressed = cur;
            hooks.on_press(&cur);
        } else if prev.motion == Motion::Static
            && prev.button.is_some()
            && cur.motion == Motion::Moving
            && cur.button == prev.button
        {
            // Drag begin: the held button started moving.
            self.dragging = true;
            hooks.on_drag_begin(&self.pressed);
        } else if self.dragging && cur.button.is_some() {
            hooks.on_drag(&self.pressed, &cur);
        } else if cur.motion == Motion::Moving && cur.button.is_none() {
            hooks.on_hover(&cur);
        } else if prev.button.is_some() && cur.motion == Motion::Static && cur.button.is_none() {
            if self.dragging {
                self.dragging = false;
                hooks.on_drag_end(&self.pressed, &cur);
            } else {
                hooks.on_release(&self.pressed);
            }
            self.released = cur;
        }

        if cur.motion == Motion::Scrolling {
            hooks.on_scroll(&cur);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::{Modifier, MouseButton};
    use crate::types::Pos;

    #[derive(Default)]
    struct Recorder {
        hovers: usize,
        presses: usize,
        releases: usize,
        drag_begins: usize,
        drags: usize,
        drag_ends: usize,
        scrolls: usize,
        last_drag_end: Option<(Pos, Pos)>,
    }

    impl InputHooks for Recorder {
        fn on_hover(&mut self, _: &MouseEvent) {
            self.hovers += 1;
        }
        fn on_press(&mut self, _: &MouseEvent) {
            self.presses += 1;
        }
        fn on_release(&mut self, _: &MouseEvent) {
            self.releases += 1;
        }
        fn on_drag_begin(&mut self, _: &MouseEvent) {
            self.drag_begins += 1;
        }
        fn on_drag(&mut self, _: &MouseEvent, _: &MouseEvent) {
            self.drags += 1;
        }
        fn on_drag_end(&mut self, begin: &MouseEvent, end: &MouseEvent) {
            self.drag_ends += 1;
            self.last_drag_end = Some((begin.pos, end.pos));
        }
        fn on_scroll(&mut self, _: &MouseEvent) {
            self.scrolls += 1;
        }
    }

    fn sample(button: Option<MouseButton>, motion: Motion, x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            button,
            modifiers: Modifier::empty(),
            motion,
            pos: Pos::new(x, y),
        }
    }

    #[test]
    fn press_drag_release_sequence() {
        let mut tracker = GestureTracker::new();
        let mut rec = Recorder::default();
        let left = Some(MouseButton::Left);

        tracker.advance(sample(None, Motion::Static, 1, 1), &mut rec);
        tracker.advance(sample(left, Motion::Static, 1, 1), &mut rec);
        tracker.advance(sample(left, Motion::Moving, 2, 1), &mut rec);
        tracker.advance(sample(left, Motion::Moving, 3, 1), &mut rec);
        tracker.advance(sample(None, Motion::Static, 3, 1), &mut rec);

        assert_eq!(rec.presses, 1);
        assert_eq!(rec.drag_begins, 1);
        assert_eq!(rec.drags, 1);
        assert_eq!(rec.drag_ends, 1);
        assert_eq!(rec.releases, 0);
        assert_eq!(rec.hovers, 0);
        // Drag end reports the press origin and the release point.
        assert_eq!(rec.last_drag_end, Some((Pos::new(1, 1), Pos::new(3, 1))));
    }

    #[test]
    fn click_without_motion_releases() {
        let mut tracker = GestureTracker::new();
        let mut rec = Recorder::default();
        let left = Some(MouseButton::Left);

        tracker.advance(sample(None, Motion::Static, 5, 5), &mut rec);
        tracker.advance(sample(left, Motion::Static, 5, 5), &mut rec);
        tracker.advance(sample(None, Motion::Static, 5, 5), &mut rec);

        assert_eq!(rec.presses, 1);
        assert_eq!(rec.releases, 1);
        assert_eq!(rec.drag_begins, 0);
        assert_eq!(rec.drag_ends, 0);
    }

    #[test]
    fn bare_motion_hovers() {
        let mut tracker = GestureTracker::new();
        let mut rec = Recorder::default();

        tracker.advance(sample(None, Motion::Moving, 2, 2), &mut rec);
        tracker.advance(sample(None, Motion::Moving, 3, 2), &mut rec);

        assert_eq!(rec.hovers, 2);
        assert_eq!(rec.presses, 0);
    }

    #[test]
    fn scroll_fires_unconditionally() {
        let mut tracker = GestureTracker::new();
        let mut rec = Recorder::default();
        let left = Some(MouseButton::Left);

        tracker.advance(sample(None, Motion::Static, 1, 1), &mut rec);
        tracker.advance(sample(left, Motion::Static, 1, 1), &mut rec);
        // Scroll while a button is held still fires.
        tracker.advance(sample(left, Motion::Scrolling, 1, 1), &mut rec);
        tracker.advance(sample(None, Motion::Scrolling, 1, 1), &mut rec);

        assert_eq!(rec.scrolls, 2);
        assert_eq!(rec.presses, 1);
    }

    #[test]
    fn drag_state_survives_multiple_moves() {
        let mut tracker = GestureTracker::new();
        let mut rec = Recorder::default();
        let right = Some(MouseButton::Right);

        tracker.advance(sample(None, Motion::Static, 0, 0), &mut rec);
        tracker.advance(sample(right, Motion::Static, 0, 0), &mut rec);
        tracker.advance(sample(right, Motion::Moving, 1, 0), &mut rec);
        for x in 2..6 {
            tracker.advance(sample(right, Motion::Moving, x, 0), &mut rec);
        }
        assert!(tracker.is_dragging());
        tracker.advance(sample(None, Motion::Static, 5, 0), &mut rec);

        assert!(!tracker.is_dragging());
        assert_eq!(rec.drag_begins, 1);
        assert_eq!(rec.drags, 4);
        assert_eq!(rec.drag_ends, 1);
    }
}
