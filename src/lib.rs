//! Demeanor: a tick-driven entity state machine with lifecycle hooks
//!
//! Demeanor keeps the judgement outside the machine. States describe what
//! happens on the way in, on each tick, and on the way out; the owning
//! entity's logic decides when to move. The machine's only jobs are holding
//! the current state, running hooks in a fixed order, and remembering where
//! it has been.
//!
//! # Core Concepts
//!
//! - **State**: Named behavior with optional lifecycle hooks, shared through
//!   cheap [`StateHandle`] clones that compare by instance identity
//! - **StateMachine**: Exactly one current state per entity, changed
//!   explicitly via [`StateMachine::change_state`], ticked via
//!   [`StateMachine::update`]
//! - **TransitionLog**: Append-only record of every completed change
//! - **Snapshot**: Serializable machine position for save and resume
//!
//! # Example
//!
//! ```rust
//! use demeanor::builder::StateBuilder;
//! use demeanor::StateMachine;
//!
//! struct Npc {
//!     speed: f32,
//!     position: f32,
//! }
//!
//! let patrol = StateBuilder::new("PATROL")
//!     .on_entering(|npc: &mut Npc| npc.speed = 80.0)
//!     .on_update(|npc: &mut Npc, dt| npc.position += npc.speed * dt)
//!     .build();
//!
//! let attack = StateBuilder::new("ATTACK")
//!     .on_entering(|npc: &mut Npc| npc.speed = 160.0)
//!     .build();
//!
//! let mut npc = Npc { speed: 0.0, position: 0.0 };
//! let mut machine = StateMachine::new(&patrol, &mut npc);
//! assert_eq!(npc.speed, 80.0);
//!
//! machine.update(0.5, &mut npc);
//! assert_eq!(npc.position, 40.0);
//!
//! machine.change_state(&attack, &mut npc);
//! assert!(machine.is_in(&attack));
//! assert_eq!(npc.speed, 160.0);
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod snapshot;

// Re-export commonly used types
pub use builder::StateBuilder;
pub use core::{State, StateHandle, TransitionLog, TransitionRecord, DEFAULT_IDLE};
pub use machine::StateMachine;
pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};
