//! Core state types and the transition log.
//!
//! This module contains the building blocks the machine is made of:
//! - Named states with lifecycle hooks via [`State`] and [`StateHandle`]
//! - The append-only [`TransitionLog`] of completed changes
//!
//! States carry behavior but never drive it; dispatch and ordering live in
//! [`crate::machine`].

mod log;
mod state;

pub use log::{TransitionLog, TransitionRecord};
pub use state::{State, StateHandle, DEFAULT_IDLE};

pub(crate) use state::{LifecycleFn, TransitionFn, UpdateFn};
