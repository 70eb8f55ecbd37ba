//! Interruptible waits for the long-running hardware loops.

use std::cell::Cell;
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, Sender};

/// Requests shutdown of the loop holding the matching [`Shutdown`].
#[derive(Clone)]
pub struct ShutdownTrigger(Sender<()>);

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.0.try_send(()).ok();
    }
}

pub struct Shutdown {
    rx: Receiver<()>,
    requested: Cell<bool>,
}

impl Shutdown {
    pub fn channel() -> (ShutdownTrigger, Shutdown) {
        let (tx, rx) = flume::bounded(1);
        (
            ShutdownTrigger(tx),
            Shutdown {
                rx,
                requested: Cell::new(false),
            },
        )
    }

    /// Route SIGINT/SIGTERM to a new shutdown channel.
    pub fn install() -> Result<Shutdown, ctrlc::Error> {
        let (trigger, shutdown) = Shutdown::channel();
        ctrlc::set_handler(move || {
            log::debug!("Interrupt received");
            trigger.trigger();
        })?;
        Ok(shutdown)
    }

    /// Wait up to `period`. Returns true once shutdown has been requested.
    pub fn wait(&self, period: Duration) -> bool {
        if self.requested.get() {
            return true;
        }
        match self.rx.recv_timeout(period) {
            Ok(()) => self.requested.set(true),
            Err(RecvTimeoutError::Timeout) => {}
            // No trigger left; nothing can interrupt us anymore
            Err(RecvTimeoutError::Disconnected) => std::thread::sleep(period),
        }
        self.requested.get()
    }

    pub fn is_requested(&self) -> bool {
        if !self.requested.get() && self.rx.try_recv().is_ok() {
            self.requested.set(true);
        }
        self.requested.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_times_out_without_trigger() {
        let (_trigger, shutdown) = Shutdown::channel();
        assert!(!shutdown.wait(Duration::from_millis(5)));
        assert!(!shutdown.is_requested());
    }

    #[test]
    fn test_trigger_latches() {
        let (trigger, shutdown) = Shutdown::channel();
        trigger.trigger();
        trigger.trigger();
        assert!(shutdown.wait(Duration::from_secs(60)));
        assert!(shutdown.is_requested());
        assert!(shutdown.wait(Duration::from_secs(60)));
    }
}
