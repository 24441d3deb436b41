//! Wiring a state-change notifier into a recorder

use crate::shared::SharedRecorder;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Record every token broadcast on `events`
///
/// Spawns a task on the current Tokio runtime that feeds each received
/// token to `recorder`. A lagging receiver skips the overwritten tokens and
/// keeps going; the task ends once every sender is dropped.
///
/// # Panics
/// Panics when called outside a Tokio runtime.
pub fn record_from<T>(recorder: SharedRecorder<T>, mut events: broadcast::Receiver<T>) -> JoinHandle<()>
where
    T: PartialEq + Clone + Send + 'static,
{
    tokio::spawn(async move {
        let mut received = 0u64;

        loop {
            match events.recv().await {
                Ok(token) => {
                    received += 1;
                    recorder.on_event(token);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(target: "history", skipped, "State change feed lagged, tokens skipped");
                }
                Err(RecvError::Closed) => {
                    debug!(target: "history", received, "State change feed closed");
                    break;
                }
            }
        }
    })
}
