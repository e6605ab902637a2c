//! Process termination used by Panic and Fatal
//!
//! Raising a panic and exiting the process are kept behind the
//! [`Terminator`] trait so that loggers can be exercised without killing the
//! process under test.

use parking_lot::Mutex;
use std::sync::Arc;

/// Exit status used by Fatal
pub const FATAL_EXIT_CODE: i32 = 1;

/// Performs the terminal action after a Panic or Fatal message was recorded
pub trait Terminator: Send + Sync {
    /// Raise an unrecoverable panic carrying `message`
    fn panic(&self, message: &str);

    /// Exit the process with `code`
    fn exit(&self, code: i32);
}

/// Terminates for real: `panic!` and `std::process::exit`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTerminator;

impl ProcessTerminator {
    #[must_use]
    pub fn shared() -> Arc<dyn Terminator> {
        Arc::new(ProcessTerminator)
    }
}

impl Terminator for ProcessTerminator {
    fn panic(&self, message: &str) {
        panic!("{}", message);
    }

    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}

/// A terminal action requested from a [`RecordingTerminator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    Panic(String),
    Exit(i32),
}

/// Records termination requests instead of acting on them
///
/// # Example
///
/// ```
/// use rust_tee_logger::core::{RecordingTerminator, Termination, Terminator};
///
/// let terminator = RecordingTerminator::new();
/// terminator.exit(1);
/// assert_eq!(terminator.requests(), vec![Termination::Exit(1)]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingTerminator {
    requests: Mutex<Vec<Termination>>,
}

impl RecordingTerminator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every request so far, oldest first
    pub fn requests(&self) -> Vec<Termination> {
        self.requests.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Terminator for RecordingTerminator {
    fn panic(&self, message: &str) {
        self.requests.lock().push(Termination::Panic(message.to_string()));
    }

    fn exit(&self, code: i32) {
        self.requests.lock().push(Termination::Exit(code));
    }
}
