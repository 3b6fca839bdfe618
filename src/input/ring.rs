//! Fixed-capacity byte ring buffer.
//!
//! Sits between the non-blocking terminal read and the decoder. A full
//! buffer is normal backpressure, not an error: `write` stores what fits
//! and reports the count, and the caller simply leaves the rest in the OS
//! buffer until the next loop iteration.

/// FIFO byte queue with wraparound cursors and no dynamic growth.
#[derive(Debug)]
pub struct RingBuffer {
    buf: Box<[u8]>,
    read: usize,
    write: usize,
    len: usize,
}

impl RingBuffer {
    /// Default queue size, enough to absorb a burst of pasted input.
    pub const DEFAULT_CAPACITY: usize = 4 * 1024;

    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            read: 0,
            write: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes currently buffered.
    #[inline]
    pub fn avail_to_read(&self) -> usize {
        self.len
    }

    /// Free space left.
    #[inline]
    pub fn avail_to_write(&self) -> usize {
        self.buf.len() - self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Enqueue as many of `bytes` as fit; returns the count written.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.avail_to_write());
        for &b in &bytes[..n] {
            self.buf[self.write] = b;
            self.write = (self.write + 1) % self.buf.len();
        }
        self.len += n;
        n
    }

    /// Dequeue up to `out.len()` bytes in FIFO order; returns the count read.
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.len);
        for slot in out[..n].iter_mut() {
            *slot = self.buf[self.read];
            self.read = (self.read + 1) % self.buf.len();
        }
        self.len -= n;
        n
    }

    /// Dequeue a single byte.
    pub fn pop(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let b = self.buf[self.read];
        self.read = (self.read + 1) % self.buf.len();
        self.len -= 1;
        Some(b)
    }

    /// Drop all buffered bytes.
    pub fn clear(&mut self) {
        self.read = 0;
        self.write = 0;
        self.len = 0;
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
