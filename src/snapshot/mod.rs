//! Snapshot and resume for entity machines.
//!
//! A machine's position is its current state name, its counters, and its
//! transition log. Hooks are closures and do not serialize; a snapshot
//! records names only, and restoring re-attaches behavior by looking the
//! names up among live states the caller provides.

use crate::core::{StateHandle, TransitionLog};
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable record of a machine's position.
/// Does NOT include hooks (not serializable); states are stored by name.
///
/// # Example
///
/// ```rust
/// use demeanor::{Snapshot, State, StateMachine};
///
/// let patrol = State::new("PATROL");
/// let attack = State::new("ATTACK");
///
/// let mut machine = StateMachine::new(&patrol, &mut ());
/// machine.change_state(&attack, &mut ());
///
/// let snapshot = machine.snapshot();
/// let json = snapshot.to_json().unwrap();
///
/// let decoded = Snapshot::from_json(&json).unwrap();
/// assert_eq!(decoded.current, "ATTACK");
/// assert_eq!(decoded.initial, "PATROL");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Name of the state the machine started in
    pub initial: String,

    /// Name of the state the machine is currently in
    pub current: String,

    /// Ticks the machine had been updated when the snapshot was taken
    pub ticks: u64,

    /// Seconds accumulated in the current state
    pub time_in_state: f32,

    /// Complete transition log
    pub log: TransitionLog,
}

impl Snapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from binary, rejecting unsupported versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

impl<Ctx> StateMachine<Ctx> {
    /// Take a snapshot of the machine's position.
    ///
    /// The initial state name is recovered from the first log record; for a
    /// machine that has never changed state it is the current state.
    pub fn snapshot(&self) -> Snapshot {
        let initial = self
            .log
            .records()
            .first()
            .map(|record| record.from.clone())
            .unwrap_or_else(|| self.current.name().to_string());

        Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            initial,
            current: self.current.name().to_string(),
            ticks: self.ticks,
            time_in_state: self.time_in_state,
            log: self.log.clone(),
        }
    }

    /// Rebuild a machine from a snapshot, re-attaching live states by name.
    ///
    /// `states` must contain exactly one state per name the snapshot can
    /// refer to. No hooks fire: the entity is assumed to already be in the
    /// shape the recorded state left it in.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::UnsupportedVersion`] for a foreign format version
    /// - [`SnapshotError::DuplicateStateName`] if two states share a name
    /// - [`SnapshotError::UnknownState`] if the current state is missing
    ///   from `states`
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
    /// let snapshot = machine.snapshot();
    ///
    /// let restored =
    ///     StateMachine::restore(&snapshot, &[patrol.clone(), attack.clone()]).unwrap();
    /// assert!(restored.is_in(&attack));
    /// assert_eq!(restored.log().path(), ["PATROL", "ATTACK"]);
    /// ```
    pub fn restore(
        snapshot: &Snapshot,
        states: &[StateHandle<Ctx>],
    ) -> Result<Self, SnapshotError> {
        snapshot.check_version()?;

        let mut by_name: HashMap<&str, &StateHandle<Ctx>> = HashMap::new();
        for state in states {
            if by_name.insert(state.name(), state).is_some() {
                return Err(SnapshotError::DuplicateStateName(state.name().to_string()));
            }
        }

        let current = by_name
            .get(snapshot.current.as_str())
            .ok_or_else(|| SnapshotError::UnknownState(snapshot.current.clone()))?;

        Ok(Self {
            current: (*current).clone(),
            log: snapshot.log.clone(),
            ticks: snapshot.ticks,
            time_in_state: snapshot.time_in_state,
        })
    }
}
