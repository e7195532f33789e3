//! Transition log for auditing where an entity has been.
//!
//! Every completed state change appends one record. The log stores state
//! names rather than handles, so it serializes cleanly and survives into
//! snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed state change.
///
/// Records are appended by the machine after the current-state pointer has
/// moved, so a record exists even if a later entry hook panics.
///
/// # Example
///
/// ```rust
/// use demeanor::{State, StateMachine};
///
/// let patrol = State::new("PATROL");
/// let attack = State::new("ATTACK");
///
/// let mut machine = StateMachine::new(&patrol, &mut ());
/// machine.change_state(&attack, &mut ());
///
/// let record = &machine.log().records()[0];
/// assert_eq!(record.from, "PATROL");
/// assert_eq!(record.to, "ATTACK");
/// assert_eq!(record.tick, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the state being left
    pub from: String,
    /// Name of the state being entered
    pub to: String,
    /// Machine tick count at the moment of the change
    pub tick: u64,
    /// Wall-clock time of the change
    pub at: DateTime<Utc>,
}

/// Ordered log of every state change a machine has made.
///
/// The machine appends in place; readers get slices and derived views. A
/// fresh machine has an empty log: the initial state is not a transition.
///
/// # Example
///
/// ```rust
/// use demeanor::{State, StateMachine};
///
/// let patrol = State::new("PATROL");
/// let attack = State::new("ATTACK");
/// let flee = State::new("FLEE");
///
/// let mut machine = StateMachine::new(&patrol, &mut ());
/// assert!(machine.log().is_empty());
///
/// machine.change_state(&attack, &mut ());
/// machine.change_state(&flee, &mut ());
///
/// assert_eq!(machine.log().path(), ["PATROL", "ATTACK", "FLEE"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: TransitionRecord) {
        self.records.push(record);
    }

    /// Get all records in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Get the sequence of state names traversed.
    ///
    /// The first element is the `from` of the first record, followed by the
    /// `to` of every record. Empty while no change has happened.
    ///
    /// # Example
    ///
    /// ```rust
    /// use demeanor::{State, StateMachine};
    ///
    /// let calm = State::new("CALM");
    /// let wary = State::new("WARY");
    ///
    /// let mut machine = StateMachine::new(&calm, &mut ());
    /// assert!(machine.log().path().is_empty());
    ///
    /// machine.change_state(&wary, &mut ());
    /// machine.change_state(&calm, &mut ());
    ///
    /// assert_eq!(machine.log().path(), ["CALM", "WARY", "CALM"]);
    /// ```
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Calculate wall-clock time from the first change to the last.
    ///
    /// Returns `None` while the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.at.signed_duration_since(first.at);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of recorded changes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether any change has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
