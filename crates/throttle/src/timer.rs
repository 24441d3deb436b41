//! Timer facilities the throttler schedules against
//!
//! A facility hands out a handle per scheduled callback and can cancel by
//! handle. Scheduling never fails.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Work run when a timer expires
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Schedule-after-delay and cancel-by-handle
pub trait TimerFacility: Send + Sync + 'static {
    type Handle: Send + 'static;

    /// Run `callback` once after `delay`
    fn schedule(&self, delay: Duration, callback: Callback) -> Self::Handle;

    /// Prevent a scheduled callback from running
    ///
    /// Cancelling a timer that already fired is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Timers backed by tasks on a Tokio runtime
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime of the calling context
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl TimerFacility for TokioTimer {
    type Handle = JoinHandle<()>;

    fn schedule(&self, delay: Duration, callback: Callback) -> JoinHandle<()> {
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        })
    }

    fn cancel(&self, handle: JoinHandle<()>) {
        handle.abort();
    }
}

/// Handle for a callback scheduled on a [`ManualTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManualHandle {
    deadline: Duration,
    seq: u64,
}

impl ManualHandle {
    /// Virtual time at which the callback is due
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<ManualHandle, Callback>,
}

/// Explicitly driven timer with a virtual clock
///
/// Nothing fires until [`ManualTimer::advance`] moves the clock past a
/// deadline. Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualTimer {
    state: Arc<Mutex<ManualState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of callbacks waiting to fire
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Move the clock forward, firing every callback that falls due
    ///
    /// Callbacks run in deadline order, ties in scheduling order, with the
    /// clock set to their deadline. Callbacks scheduled while advancing fire
    /// in the same call if they fall due before the target time. Returns the
    /// number of callbacks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now.saturating_add(by);
        let mut fired = 0;

        loop {
            let due = {
                let mut state = self.state.lock();
                let next = state
                    .queue
                    .keys()
                    .next()
                    .copied()
                    .filter(|handle| handle.deadline <= target);

                match next {
                    Some(handle) => {
                        state.now = handle.deadline;
                        state.queue.remove(&handle)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };

            // Run without the lock so the callback can schedule again
            match due {
                Some(callback) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }

        fired
    }
}

impl std::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualTimer")
            .field("now", &state.now)
            .field("pending", &state.queue.len())
            .finish()
    }
}

impl TimerFacility for ManualTimer {
    type Handle = ManualHandle;

    fn schedule(&self, delay: Duration, callback: Callback) -> ManualHandle {
        let mut state = self.state.lock();
        let handle = ManualHandle {
            deadline: state.now.checked_add(delay).unwrap_or(Duration::MAX),
            seq: state.next_seq,
        };
        state.next_seq += 1;
        state.queue.insert(handle, callback);
        handle
    }

    fn cancel(&self, handle: ManualHandle) {
        let removed = self.state.lock().queue.remove(&handle);
        drop(removed);
    }
}
