//! Builder API for ergonomic state construction.
//!
//! This module provides a fluent builder and macros for declaring states
//! with minimal boilerplate while keeping hook signatures type checked.

pub mod macros;
pub mod state;

pub use state::StateBuilder;

use crate::core::StateHandle;

/// Create a state whose only hook is `on_entering`.
///
/// # Example
///
/// ```
/// use demeanor::builder::entry_state;
/// use demeanor::StateMachine;
///
/// let armed = entry_state("ARMED", |ready: &mut bool| *ready = true);
///
/// let mut ready = false;
/// let machine = StateMachine::new(&armed, &mut ready);
/// assert!(ready);
/// # let _ = machine;
/// ```
pub fn entry_state<Ctx, F>(name: impl Into<String>, hook: F) -> StateHandle<Ctx>
where
    F: Fn(&mut Ctx) + Send + Sync + 'static,
{
    StateBuilder::new(name).on_entering(hook).build()
}

/// Create a state whose only hook is `on_update`.
///
/// # Example
///
/// ```
/// use demeanor::builder::update_state;
/// use demeanor::StateMachine;
///
/// let drift = update_state("DRIFT", |x: &mut f32, dt| *x += 2.0 * dt);
///
/// let mut x = 0.0;
/// let mut machine = StateMachine::new(&drift, &mut x);
/// machine.update(0.5, &mut x);
/// assert_eq!(x, 1.0);
/// ```
pub fn update_state<Ctx, F>(name: impl Into<String>, hook: F) -> StateHandle<Ctx>
where
    F: Fn(&mut Ctx, f32) + Send + Sync + 'static,
{
    StateBuilder::new(name).on_update(hook).build()
}
