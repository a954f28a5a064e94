use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ToolError;

pub const INTERRUPT_MESSAGE: &str = "User pressed CTL+C to close out the program";

/// Shared flag raised by the Ctrl-C handler and polled between pipeline stages.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    /// Create a flag and hook it up to the process Ctrl-C handler.
    ///
    /// The handler does not wait for the running stage: it raises the flag,
    /// prints the interrupt notice and `closing`, then exits with status 130.
    /// If the handler cannot be installed (e.g. one is already registered)
    /// the flag still works, it just never gets raised by a signal.
    pub fn install(closing: &'static str) -> Self {
        let flag = Self::default();
        let raised = Arc::clone(&flag.raised);
        let handler = move || {
            raised.store(true, Ordering::SeqCst);
            println!("{INTERRUPT_MESSAGE}");
            println!("{closing}");
            std::process::exit(i32::from(ToolError::UserInterrupt.exit_status()));
        };
        if let Err(e) = ctrlc::set_handler(handler) {
            log::warn!("Ctrl-C handler not installed: {e}");
        }
        flag
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Bail out with [`ToolError::UserInterrupt`] once the flag is raised.
    pub fn checkpoint(&self) -> Result<(), ToolError> {
        if self.is_raised() {
            Err(ToolError::UserInterrupt)
        } else {
            Ok(())
        }
    }
}
