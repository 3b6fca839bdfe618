//! Terminal setup, teardown, and asynchronous signal flags (unix).
//!
//! Entering the canvas means raw-ish input (no canonical mode, no echo,
//! byte-at-a-time delivery) plus mouse tracking and bracketed paste.
//! [`Terminal`] saves the original termios on enter and restores it on
//! exit or drop, so a panicking host still gets its shell back.
//!
//! Signal handlers here do exactly one thing: store into an `AtomicBool`.
//! No syscalls, no allocation, nothing async-signal-unsafe. The flags are
//! consumed synchronously — resize by the renderer, interrupt by the
//! host's event loop after its blocking wait returns `EINTR`.

#![cfg(unix)]

use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::render::ansi;
use crate::types::Pos;

static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);
static INTERRUPT_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_resize(_signo: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

extern "C" fn handle_interrupt(_signo: libc::c_int) {
    INTERRUPT_PENDING.store(true, Ordering::Relaxed);
}

/// Install the SIGWINCH and SIGINT flag-setting handlers.
///
/// Call once during startup, before entering the event loop.
pub fn install_signal_handlers() -> io::Result<()> {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handle_resize as extern "C" fn(libc::c_int) as libc::sighandler_t;
        if libc::sigaction(libc::SIGWINCH, &action, std::ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
        action.sa_sigaction =
            handle_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t;
        if libc::sigaction(libc::SIGINT, &action, std::ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Consume the pending-resize flag.
pub fn take_resize() -> bool {
    RESIZE_PENDING.swap(false, Ordering::Relaxed)
}

/// Consume the pending-interrupt flag.
pub fn take_interrupt() -> bool {
    INTERRUPT_PENDING.swap(false, Ordering::Relaxed)
}

/// Query the current terminal dimensions.
pub fn window_size() -> io::Result<Pos> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let fd = io::stdin().as_raw_fd();
    if unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(Pos::new(ws.ws_col, ws.ws_row))
}

/// Terminal mode guard.
///
/// `enter` switches the terminal into canvas mode; `exit` (or drop)
/// restores it. Failure during `enter` is fatal for the host, which should
/// abort with the diagnostic rather than run without input.
#[derive(Debug, Default)]
pub struct Terminal {
    saved: Option<libc::termios>,
}

impl Terminal {
    pub fn new() -> Self {
        Self { saved: None }
    }

    /// Disable canonical mode and echo, request byte-at-a-time reads, and
    /// switch on mouse tracking and bracketed paste.
    pub fn enter(&mut self) -> io::Result<()> {
        let fd = io::stdin().as_raw_fd();
        unsafe {
            let mut attr: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut attr) != 0 {
                return Err(io::Error::last_os_error());
            }
            self.saved = Some(attr);

            attr.c_lflag &= !(libc::ICANON | libc::ECHO);
            attr.c_cc[libc::VMIN] = 1;
            attr.c_cc[libc::VTIME] = 0;
            if libc::tcsetattr(fd, libc::TCSANOW, &attr) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        let mut out = io::stdout().lock();
        out.write_all(ansi::MOUSE_ON.as_bytes())?;
        out.write_all(ansi::PASTE_ON.as_bytes())?;
        out.write_all(ansi::HIDE_CURSOR.as_bytes())?;
        out.write_all(ansi::CLEAR.as_bytes())?;
        out.flush()?;

        debug!("entered canvas terminal mode");
        Ok(())
    }

    /// Restore the saved terminal attributes and switch tracking modes off.
    pub fn exit(&mut self) -> io::Result<()> {
        let Some(saved) = self.saved.take() else {
            return Ok(());
        };

        let mut out = io::stdout().lock();
        out.write_all(ansi::MOUSE_OFF.as_bytes())?;
        out.write_all(ansi::PASTE_OFF.as_bytes())?;
        out.write_all(ansi::SHOW_CURSOR.as_bytes())?;
        out.flush()?;

        let fd = io::stdin().as_raw_fd();
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &saved) } != 0 {
            return Err(io::Error::last_os_error());
        }

        debug!("restored terminal mode");
        Ok(())
    }

    /// Whether `enter` has been called without a matching `exit`.
    pub fn is_entered(&self) -> bool {
        self.saved.is_some()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
