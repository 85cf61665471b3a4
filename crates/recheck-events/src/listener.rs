use std::thread;

use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::bus::EventStream;
use crate::event::ProgressEvent;

/// Background thread consuming one event stream.
///
/// The thread runs until the stream closes, which happens when the owning
/// [`EventBus`](crate::EventBus) is shut down (or dropped). Joining the
/// listener after shutdown therefore always terminates; there is no detached
/// thread left behind at process exit.
pub struct ProgressListener {
    handle: thread::JoinHandle<usize>,
}

impl ProgressListener {
    /// Start a listener thread feeding each received event to `sink`.
    ///
    /// A lagged receiver skips the missed events and keeps consuming.
    pub fn spawn<F>(mut stream: EventStream, mut sink: F) -> Self
    where
        F: FnMut(ProgressEvent) + Send + 'static,
    {
        let handle = thread::spawn(move || {
            let mut received = 0usize;
            loop {
                match stream.blocking_recv() {
                    Ok(event) => {
                        sink(event);
                        received += 1;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "progress listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            received
        });
        Self { handle }
    }

    /// Returns `true` if the listener thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the stream closes and the thread exits.
    ///
    /// Returns the number of events the listener received. A listener whose
    /// sink panicked counts as zero.
    pub fn join(self) -> usize {
        self.handle.join().unwrap_or(0)
    }
}

/// Sink that renders each event as a console line.
pub fn console_sink(event: ProgressEvent) {
    println!(
        "  -> event received: msg = {} status = {} progress = {}%",
        event.message,
        event.state,
        event.percent()
    );
}
