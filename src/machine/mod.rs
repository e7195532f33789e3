//! The component that owns a current state and runs its hooks.

mod component;

pub use component::StateMachine;
