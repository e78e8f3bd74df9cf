//! Session-level interrupt handling.
//!
//! Animations can run for a long time, so the render loops poll a flag
//! set by SIGINT instead of relying on the runtime's default behavior.
//! This is configured explicitly at session start
//! rather than as an import-time side effect.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use signal_hook::consts::SIGINT;

/// A flag raised by SIGINT, polled by the render loops.
///
/// The first interrupt raises the flag and lets the running animation
/// wind down cleanly (releasing the scratch directory on the way out);
/// a second interrupt falls through to the default termination
/// so the process never becomes unresponsive.
#[derive(Clone, Debug)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Register the SIGINT handlers. Call once at session start.
    pub fn install() -> Result<Self, std::io::Error> {
        let flag = Arc::new(AtomicBool::new(false));
        // order matters: the conditional default must be registered first
        // so that a second SIGINT (flag already raised) terminates
        signal_hook::flag::register_conditional_default(SIGINT, Arc::clone(&flag))?;
        signal_hook::flag::register(SIGINT, Arc::clone(&flag))?;
        Ok(Self { flag })
    }

    /// A flag that no signal is wired to. Useful for tests
    /// and embedding contexts that manage signals themselves.
    pub fn unwired() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an interrupt has been received.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn unwired_flag_stays_down() {
        let interrupt = Interrupt::unwired();
        assert!(!interrupt.is_raised());
        interrupt.flag.store(true, Ordering::Relaxed);
        assert!(interrupt.is_raised());
    }
}
