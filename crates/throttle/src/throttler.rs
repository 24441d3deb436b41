//! Debouncing of rapid action submissions
//!
//! Only the most recently submitted action runs, and only once submissions
//! have stopped for the configured delay.

use crate::timer::{TimerFacility, TokioTimer};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::debug;
use ui_core::{Delay, LogSwitches, Result, ThrottleConfig, UtilError};

const COMPONENT: &str = "throttle";

/// Unit of work submitted to a [`Throttler`]
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// Coalesces a burst of submissions into one deferred execution
///
/// Every [`submit`](Throttler::submit) cancels the outstanding timer,
/// replaces the pending action and starts a new timer. When a timer expires
/// without being superseded, its action runs exactly once. Dropping the
/// throttler discards the pending action without running it.
pub struct Throttler<T: TimerFacility = TokioTimer> {
    shared: Arc<Shared<T>>,
}

struct Shared<T: TimerFacility> {
    delay: Delay,
    timer: T,
    log: bool,
    state: Mutex<State<T::Handle>>,
}

/// Invariant: `action.is_some()` implies `timer.is_some()`
struct State<H> {
    /// Bumped on every submission; a firing timer must match it
    generation: u64,
    action: Option<Action>,
    timer: Option<H>,
}

impl<T: TimerFacility> Throttler<T> {
    /// Create with an already validated delay
    pub fn new(delay: Delay, timer: T) -> Self {
        Self::build(delay, timer, false)
    }

    /// Create with a delay in milliseconds
    ///
    /// Fails with `InvalidConfiguration` when `delay_ms <= 0`.
    pub fn with_millis(delay_ms: i64, timer: T) -> Result<Self> {
        Ok(Self::new(Delay::from_millis(delay_ms)?, timer))
    }

    /// Create with debug logging controlled by `switches`
    pub fn with_switches(delay: Delay, timer: T, switches: &LogSwitches) -> Self {
        Self::build(delay, timer, switches.is_enabled(COMPONENT))
    }

    /// Create from configuration, validating the delay
    pub fn from_config(config: &ThrottleConfig, timer: T, switches: &LogSwitches) -> Result<Self> {
        let delay = Delay::from_millis(config.delay_ms)?;
        Ok(Self::with_switches(delay, timer, switches))
    }

    fn build(delay: Delay, timer: T, log: bool) -> Self {
        Self {
            shared: Arc::new(Shared {
                delay,
                timer,
                log,
                state: Mutex::new(State {
                    generation: 0,
                    action: None,
                    timer: None,
                }),
            }),
        }
    }

    /// Quiet period before the pending action fires
    pub fn delay(&self) -> Delay {
        self.shared.delay
    }

    /// True while an action is waiting for its timer
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().action.is_some()
    }

    /// Replace the pending action and restart the quiet period
    ///
    /// Returns immediately. The superseded action, if any, is dropped
    /// without running.
    pub fn submit<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit_action(Box::new(action));
    }

    /// Nullable form of [`submit`](Throttler::submit)
    ///
    /// `None` fails with `NullArgument` and leaves any pending action alone.
    pub fn try_submit<F>(&self, action: Option<F>) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        match action {
            Some(action) => {
                self.submit(action);
                Ok(())
            }
            None => Err(UtilError::null(COMPONENT, "action")),
        }
    }

    fn submit_action(&self, action: Action) {
        let shared = &self.shared;
        let mut state = shared.state.lock();

        if let Some(handle) = state.timer.take() {
            shared.timer.cancel(handle);
        }

        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        let superseded = state.action.replace(action);

        let weak: Weak<Shared<T>> = Arc::downgrade(shared);
        let handle = shared.timer.schedule(
            shared.delay.as_duration(),
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.fire(generation);
                }
            }),
        );
        state.timer = Some(handle);
        drop(state);

        if shared.log {
            debug!(
                target: COMPONENT,
                generation,
                superseded = superseded.is_some(),
                delay = ?shared.delay.as_duration(),
                "Action scheduled"
            );
        }
        drop(superseded);
    }
}

impl<T: TimerFacility> Shared<T> {
    fn fire(&self, generation: u64) {
        let action = {
            let mut state = self.state.lock();
            if state.generation != generation {
                // Superseded after this timer slipped past cancellation
                return;
            }
            state.timer = None;
            state.action.take()
        };

        if let Some(action) = action {
            if self.log {
                debug!(target: COMPONENT, generation, "Firing pending action");
            }
            action();
        }
    }
}

impl Throttler<TokioTimer> {
    /// Create on the Tokio runtime of the calling context
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn on_current_runtime(delay_ms: i64) -> Result<Self> {
        Self::with_millis(delay_ms, TokioTimer::current())
    }
}

impl<T: TimerFacility> Drop for Throttler<T> {
    fn drop(&mut self) {
        let (handle, action) = {
            let mut state = self.shared.state.lock();
            (state.timer.take(), state.action.take())
        };

        if let Some(handle) = handle {
            self.shared.timer.cancel(handle);
        }
        if action.is_some() && self.shared.log {
            debug!(target: COMPONENT, "Dropped with a pending action");
        }
    }
}

impl<T: TimerFacility> std::fmt::Debug for Throttler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttler")
            .field("delay", &self.shared.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
