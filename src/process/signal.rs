use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::{SIGINT, SIGTSTP};

/// Turns terminal signals aimed at the interpreter into flags.
///
/// The handlers only store `true`; printing the notice is left to the
/// read loop, which checks [`SignalBridge::take_stop`] between commands.
/// Children get default dispositions back when they exec.
#[derive(Debug, Clone)]
pub struct SignalBridge {
    stop_requested: Arc<AtomicBool>,
    interrupted: Arc<AtomicBool>,
}

impl SignalBridge {
    /// Registers the SIGTSTP handler. Call once at startup.
    pub fn install() -> Result<Self, std::io::Error> {
        let bridge = Self {
            stop_requested: Arc::new(AtomicBool::new(false)),
            interrupted: Arc::new(AtomicBool::new(false)),
        };
        signal_hook::flag::register(SIGTSTP, Arc::clone(&bridge.stop_requested))?;
        Ok(bridge)
    }

    /// Keeps Ctrl-C from killing the interpreter while a child runs in
    /// the foreground. Only wanted when attached to a terminal.
    pub fn guard_interrupts(&self) -> Result<(), std::io::Error> {
        signal_hook::flag::register(SIGINT, Arc::clone(&self.interrupted))?;
        Ok(())
    }

    pub fn take_stop(&self) -> bool {
        self.stop_requested.swap(false, Ordering::Relaxed)
    }

    pub fn take_interrupt(&self) -> bool {
        self.interrupted.swap(false, Ordering::Relaxed)
    }

    pub fn stop_notice() -> String {
        format!(
            "Caught signal {} (SIGTSTP). Use 'exit' to quit the shell.",
            SIGTSTP
        )
    }
}
