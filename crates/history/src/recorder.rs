//! Bounded, most-recent-first record of admitted tokens
//!
//! Tokens that pass the admission predicate are moved (or inserted) to the
//! front; the oldest are dropped once capacity is exceeded. Equal tokens
//! never appear twice.

use std::fmt;
use std::sync::Arc;
use tracing::debug;
use ui_core::{LogSwitches, RecentsConfig, Result, UtilError};

const COMPONENT: &str = "history";

/// Admission test applied to every observed token
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Recently used tokens, most recent first
///
/// Invariants: `items().len() <= capacity()` and no two items are equal.
pub struct HistoryTokenRecorder<T> {
    predicate: Predicate<T>,
    capacity: usize,
    items: Vec<T>,
    log: bool,
}

impl<T: PartialEq> HistoryTokenRecorder<T> {
    /// Create an empty recorder
    ///
    /// Fails with `InvalidConfiguration` when `capacity` is zero.
    pub fn new<P>(predicate: P, capacity: usize) -> Result<Self>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::builder().predicate(predicate).capacity(capacity).build()
    }

    /// Start a builder with no predicate and no capacity
    pub fn builder() -> RecorderBuilder<T> {
        RecorderBuilder::default()
    }

    /// Create from configuration; negative capacities are rejected too
    pub fn from_config<P>(config: &RecentsConfig, predicate: P, switches: &LogSwitches) -> Result<Self>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let capacity = usize::try_from(config.capacity).map_err(|_| {
            UtilError::invalid(
                COMPONENT,
                format!("capacity must be positive, got {}", config.capacity),
            )
        })?;

        Self::builder()
            .predicate(predicate)
            .capacity(capacity)
            .log_switches(switches)
            .build()
    }

    /// Observe a state change
    ///
    /// Tokens rejected by the predicate are ignored. Admitted tokens move to
    /// the front, replacing any equal entry, and the tail is trimmed to
    /// capacity. Returns whether the token was admitted.
    pub fn on_event(&mut self, token: T) -> bool {
        if !(self.predicate)(&token) {
            return false;
        }

        match self.items.iter().position(|item| *item == token) {
            Some(index) => {
                self.items[..=index].rotate_right(1);
                self.items[0] = token;

                if self.log {
                    debug!(target: COMPONENT, from = index, len = self.items.len(), "Promoted token");
                }
            }
            None => {
                self.items.insert(0, token);
                let evicted = self.items.len().saturating_sub(self.capacity);
                self.items.truncate(self.capacity);

                if self.log {
                    debug!(target: COMPONENT, evicted, len = self.items.len(), "Recorded token");
                }
            }
        }

        true
    }

    /// Retained tokens, most recent first
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// True when an equal token is retained
    pub fn contains(&self, token: &T) -> bool {
        self.items.contains(token)
    }

    /// Forget every retained token
    pub fn clear(&mut self) {
        if self.log && !self.items.is_empty() {
            debug!(target: COMPONENT, cleared = self.items.len(), "Cleared tokens");
        }
        self.items.clear();
    }

    /// Maximum number of retained tokens
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained tokens
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is retained
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for HistoryTokenRecorder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryTokenRecorder")
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

/// Builder for [`HistoryTokenRecorder`]
pub struct RecorderBuilder<T> {
    predicate: Option<Predicate<T>>,
    capacity: Option<usize>,
    log: bool,
}

impl<T> Default for RecorderBuilder<T> {
    fn default() -> Self {
        Self {
            predicate: None,
            capacity: None,
            log: false,
        }
    }
}

impl<T: PartialEq> RecorderBuilder<T> {
    /// Set the admission predicate
    pub fn predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Share an existing predicate
    pub fn shared_predicate(mut self, predicate: Predicate<T>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Set the maximum number of retained tokens
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Enable debug logging when the `history` switch is on
    pub fn log_switches(mut self, switches: &LogSwitches) -> Self {
        self.log = switches.is_enabled(COMPONENT);
        self
    }

    /// Validate and build
    ///
    /// A missing predicate fails with `NullArgument`; a missing or zero
    /// capacity fails with `InvalidConfiguration`.
    pub fn build(self) -> Result<HistoryTokenRecorder<T>> {
        let capacity = match self.capacity {
            Some(0) => {
                return Err(UtilError::invalid(COMPONENT, "capacity must be positive, got 0"));
            }
            Some(capacity) => capacity,
            None => return Err(UtilError::invalid(COMPONENT, "capacity is required")),
        };

        let predicate = self
            .predicate
            .ok_or_else(|| UtilError::null(COMPONENT, "predicate"))?;

        Ok(HistoryTokenRecorder {
            predicate,
            capacity,
            items: Vec::new(),
            log: self.log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always() -> impl Fn(&&'static str) -> bool + Send + Sync + 'static {
        |_| true
    }

    fn admit_all(recorder: &mut HistoryTokenRecorder<&'static str>, tokens: &[&'static str]) {
        for token in tokens {
            recorder.on_event(*token);
        }
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let mut recorder = HistoryTokenRecorder::new(always(), 2).unwrap();
        admit_all(&mut recorder, &["A", "B", "C"]);
        assert_eq!(recorder.items(), &["C", "B"]);
    }

    #[test]
    fn test_readmission_promotes_without_duplicate() {
        let mut recorder = HistoryTokenRecorder::new(always(), 3).unwrap();
        admit_all(&mut recorder, &["A", "B", "A"]);
        assert_eq!(recorder.items(), &["A", "B"]);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_promotion_from_tail_keeps_size() {
        let mut recorder = HistoryTokenRecorder::new(always(), 3).unwrap();
        admit_all(&mut recorder, &["A", "B", "C"]);
        assert!(recorder.on_event("A"));
        assert_eq!(recorder.items(), &["A", "C", "B"]);

        // Already at the front
        assert!(recorder.on_event("A"));
        assert_eq!(recorder.items(), &["A", "C", "B"]);
    }

    #[test]
    fn test_rejected_tokens_change_nothing() {
        let mut recorder = HistoryTokenRecorder::new(|t: &&str| t.starts_with("cell"), 3).unwrap();
        assert!(recorder.on_event("cell/A1"));
        assert!(!recorder.on_event("column/B"));
        assert!(!recorder.on_event("row/3"));
        assert_eq!(recorder.items(), &["cell/A1"]);
        assert!(!recorder.contains(&"column/B"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut recorder = HistoryTokenRecorder::new(always(), 3).unwrap();
        admit_all(&mut recorder, &["A", "B"]);
        recorder.clear();
        assert!(recorder.items().is_empty());
        recorder.clear();
        assert!(recorder.is_empty());

        // Still usable afterwards
        recorder.on_event("C");
        assert_eq!(recorder.items(), &["C"]);
    }

    #[test]
    fn test_huge_capacity_grows_on_demand() {
        let mut recorder = HistoryTokenRecorder::new(always(), usize::MAX).unwrap();
        admit_all(&mut recorder, &["A", "B", "C", "A"]);
        assert_eq!(recorder.items(), &["A", "C", "B"]);
        assert_eq!(recorder.capacity(), usize::MAX);

        let recorder = HistoryTokenRecorder::from_config(
            &RecentsConfig { capacity: i64::MAX },
            always(),
            &LogSwitches::new(),
        )
        .unwrap();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = HistoryTokenRecorder::new(always(), 0).unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_builder_requires_predicate_and_capacity() {
        let err = HistoryTokenRecorder::<&str>::builder().capacity(3).build().unwrap_err();
        assert!(err.is_null_argument());

        let err = HistoryTokenRecorder::builder().predicate(always()).build().unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_from_config() {
        let switches = LogSwitches::new().with("history", true);

        let recorder =
            HistoryTokenRecorder::from_config(&RecentsConfig { capacity: 4 }, always(), &switches).unwrap();
        assert_eq!(recorder.capacity(), 4);

        for capacity in [0, -5] {
            let err = HistoryTokenRecorder::from_config(&RecentsConfig { capacity }, always(), &switches)
                .unwrap_err();
            assert!(err.is_invalid_configuration());
        }
    }

    #[test]
    fn test_promoted_token_replaces_stored_instance() {
        #[derive(Debug, Clone)]
        struct Visit {
            path: &'static str,
            seq: u32,
        }

        impl PartialEq for Visit {
            fn eq(&self, other: &Self) -> bool {
                self.path == other.path
            }
        }

        let mut recorder = HistoryTokenRecorder::new(|_: &Visit| true, 3).unwrap();
        recorder.on_event(Visit { path: "/a", seq: 1 });
        recorder.on_event(Visit { path: "/b", seq: 2 });
        recorder.on_event(Visit { path: "/a", seq: 3 });

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.items()[0].seq, 3);
        assert_eq!(recorder.items()[1].path, "/b");
    }
}
