//! Builder for constructing states with a fluent API.

use crate::core::{LifecycleFn, State, StateHandle, TransitionFn, UpdateFn};

/// Builder for states with a fluent API.
///
/// Every hook is optional; a builder with no hooks produces a bare named
/// state equivalent to [`State::new`]. `build` cannot fail because the name
/// is required up front.
///
/// # Example
///
/// ```rust
/// use demeanor::builder::StateBuilder;
///
/// struct Wolf {
///     stamina: f32,
/// }
///
/// let chase = StateBuilder::new("CHASE")
///     .on_entering(|wolf: &mut Wolf| wolf.stamina = 100.0)
///     .on_update(|wolf: &mut Wolf, dt| wolf.stamina -= 12.0 * dt)
///     .on_exiting(|wolf: &mut Wolf| wolf.stamina = wolf.stamina.max(0.0))
///     .build();
///
/// assert_eq!(chase.name(), "CHASE");
/// ```
pub struct StateBuilder<Ctx> {
    name: String,
    on_entering: Option<LifecycleFn<Ctx>>,
    on_entered_from: Option<TransitionFn<Ctx>>,
    on_update: Option<UpdateFn<Ctx>>,
    on_exiting: Option<LifecycleFn<Ctx>>,
    on_exiting_to: Option<TransitionFn<Ctx>>,
}

impl<Ctx> StateBuilder<Ctx> {
    /// Create a builder for a state with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_entering: None,
            on_entered_from: None,
            on_update: None,
            on_exiting: None,
            on_exiting_to: None,
        }
    }

    /// Set the hook fired when the state becomes current.
    pub fn on_entering<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Ctx) + Send + Sync + 'static,
    {
        self.on_entering = Some(Box::new(hook));
        self
    }

    /// Set the hook fired after `on_entering`, passed the previous state.
    pub fn on_entered_from<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Ctx, &StateHandle<Ctx>) + Send + Sync + 'static,
    {
        self.on_entered_from = Some(Box::new(hook));
        self
    }

    /// Set the hook fired once per tick while the state is current.
    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Ctx, f32) + Send + Sync + 'static,
    {
        self.on_update = Some(Box::new(hook));
        self
    }

    /// Set the hook fired when the state stops being current.
    pub fn on_exiting<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Ctx) + Send + Sync + 'static,
    {
        self.on_exiting = Some(Box::new(hook));
        self
    }

    /// Set the hook fired before `on_exiting`, passed the next state.
    pub fn on_exiting_to<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Ctx, &StateHandle<Ctx>) + Send + Sync + 'static,
    {
        self.on_exiting_to = Some(Box::new(hook));
        self
    }

    /// Build the state and hand back its sharing handle.
    pub fn build(self) -> StateHandle<Ctx> {
        StateHandle::new(State {
            name: self.name,
            on_entering: self.on_entering,
            on_entered_from: self.on_entered_from,
            on_update: self.on_update,
            on_exiting: self.on_exiting,
            on_exiting_to: self.on_exiting_to,
        })
    }
}
