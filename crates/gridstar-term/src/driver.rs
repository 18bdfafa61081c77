//! The [`Driver`] seam between the application and a terminal, and the
//! [`Context`] cancellation token.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::canvas::Frame;
use crate::messages::Msg;

/// Shared stop flag. Clones observe the same flag, so the input side can
/// stop a running search or the whole loop.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True once any clone has called [`cancel`](Context::cancel).
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Raise the flag for every clone.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Back-end driver (a real terminal, or a scripted stand-in for tests).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait up to `timeout` for input and send whatever arrived through
    /// `tx`. Returns early once `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Write a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Restore the terminal.
    fn close(&mut self);
}
