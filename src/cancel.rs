use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::error::{DatasetError, Result};

/// Shared stop flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Cancel `token` when the user presses Ctrl+C.
///
/// The signal is awaited on a background thread running a single-threaded
/// runtime; the thread exits after the first interrupt.
pub fn register_interrupt_handler(token: &CancellationToken) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| DatasetError::Configuration(format!("interrupt runtime: {e}")))?;

    let mut interrupt = runtime
        .block_on(async { backend::listen() })
        .map_err(|e| DatasetError::Configuration(format!("cannot watch for Ctrl+C: {e}")))?;

    let token = token.clone();
    thread::Builder::new()
        .name("interrupt".into())
        .spawn(move || {
            if runtime.block_on(interrupt.recv()).is_some() {
                log::warn!("Ctrl+C detected, finishing the current image and saving what was collected...");
                token.cancel();
            }
        })
        .map_err(|e| DatasetError::Configuration(format!("cannot spawn interrupt thread: {e}")))?;

    Ok(())
}

#[cfg(unix)]
mod backend {
    use tokio::signal::unix::{signal, Signal, SignalKind};

    pub struct Interrupt(Signal);

    pub fn listen() -> std::io::Result<Interrupt> {
        signal(SignalKind::interrupt()).map(Interrupt)
    }

    impl Interrupt {
        pub async fn recv(&mut self) -> Option<()> {
            self.0.recv().await
        }
    }
}

#[cfg(windows)]
mod backend {
    use tokio::signal::windows::{ctrl_c, CtrlC};

    pub struct Interrupt(CtrlC);

    pub fn listen() -> std::io::Result<Interrupt> {
        ctrl_c().map(Interrupt)
    }

    impl Interrupt {
        pub async fn recv(&mut self) -> Option<()> {
            self.0.recv().await
        }
    }
}
