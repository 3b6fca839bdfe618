//! Terminal input: buffering, decoding, gesture derivation.
//!
//! Raw bytes flow through three stages, all synchronous and non-blocking:
//!
//! ```text
//! terminal fd → RingBuffer → Decoder (FSM) → GestureTracker → InputHooks
//! ```
//!
//! [`Input`] wires the stages together. The host's event loop fills the
//! queue whenever the input descriptor is readable and calls
//! [`Input::process`] to drain it; everything downstream happens in hook
//! callbacks on already-buffered data.

pub mod decoder;
pub mod events;
pub mod gesture;
pub mod ring;

pub use decoder::{DecodeError, DecodedEvent, Decoder, State};
pub use events::{InputHooks, Modifier, Motion, MouseButton, MouseEvent};
pub use gesture::GestureTracker;
pub use ring::RingBuffer;

use std::io::{self, Read};

use tracing::warn;

/// The assembled input pipeline: byte queue, decoder, gesture tracker.
#[derive(Debug, Default)]
pub struct Input {
    queue: RingBuffer,
    decoder: Decoder,
    gestures: GestureTracker,
}

impl Input {
    pub fn new() -> Self {
        Self::with_queue_capacity(RingBuffer::DEFAULT_CAPACITY)
    }

    pub fn with_queue_capacity(capacity: usize) -> Self {
        Self {
            queue: RingBuffer::new(capacity),
            decoder: Decoder::new(),
            gestures: GestureTracker::new(),
        }
    }

    /// The byte queue, for capacity queries.
    pub fn queue(&self) -> &RingBuffer {
        &self.queue
    }

    /// The gesture tracker, for press/drag state queries.
    pub fn gestures(&self) -> &GestureTracker {
        &self.gestures
    }

    /// Buffer raw bytes. Returns how many were accepted; a short count is
    /// backpressure and the caller retries the rest next cycle.
    pub fn fill(&mut self, bytes: &[u8]) -> usize {
        self.queue.write(bytes)
    }

    /// Read from `reader` into the queue, sized by the queue's free space.
    ///
    /// A full queue or an interrupted read both report 0 bytes so the
    /// caller's loop can carry on (and consult its interrupt flag).
    pub fn fill_from<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        let mut chunk = [0u8; 256];
        let want = self.queue.avail_to_write().min(chunk.len());
        if want == 0 {
            return Ok(0);
        }
        match reader.read(&mut chunk[..want]) {
            Ok(n) => Ok(self.queue.write(&chunk[..n])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Drain every buffered byte through the decoder, dispatching hooks.
    ///
    /// Decode errors drop the partial sequence and resynchronize to idle;
    /// the remaining buffered bytes are still consumed.
    pub fn process<H: InputHooks>(&mut self, hooks: &mut H) {
        while let Some(byte) = self.queue.pop() {
            match self.decoder.feed(byte) {
                Ok(Some(DecodedEvent::Key(b))) => hooks.on_key(b),
                Ok(Some(DecodedEvent::Paste(text))) => hooks.on_paste(&text),
                Ok(Some(DecodedEvent::Mouse(sample))) => {
                    self.gestures.advance(sample, hooks);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(%err, "dropping partial escape sequence");
                    self.decoder.reset();
                }
            }
        }
    }
}
