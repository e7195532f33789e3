//! Named states with lifecycle hooks.
//!
//! A state is a named record of optional hook closures. It carries no
//! reference to other states; during a transition it briefly observes the
//! state it is entered from or exited to through a borrowed handle, and that
//! handle is only valid for the duration of the hook call.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Name of the canonical default idle state.
///
/// A machine built without an explicit initial state starts in a fresh state
/// with this name and no hooks. See [`State::idle`].
pub const DEFAULT_IDLE: &str = "DEFAULT_IDLE";

/// Hook fired on entering or exiting a state.
pub(crate) type LifecycleFn<Ctx> = Box<dyn Fn(&mut Ctx) + Send + Sync>;

/// Hook fired with the other end of a transition (the state being left when
/// entering, the destination when exiting).
pub(crate) type TransitionFn<Ctx> = Box<dyn Fn(&mut Ctx, &StateHandle<Ctx>) + Send + Sync>;

/// Hook fired once per simulation tick while the state is current.
pub(crate) type UpdateFn<Ctx> = Box<dyn Fn(&mut Ctx, f32) + Send + Sync>;

/// A named unit of entity behavior.
///
/// Each hook is optional and defaults to a no-op. Hooks receive the owning
/// entity's context (`&mut Ctx`) and nothing else: they cannot reach the
/// machine, so every state change goes through
/// [`StateMachine::change_state`](crate::StateMachine::change_state).
///
/// States are built once and shared through [`StateHandle`]s. Equality of
/// handles is instance identity, not name equality: two states built with the
/// same name are different states.
///
/// # Per-state data
///
/// Mutable data private to a state lives inside its hook closures as captured
/// state. Hooks are `Fn`, so captured scratch needs interior mutability
/// (`Mutex`, atomics). It persists across re-entries unless a hook resets it,
/// and it is shared by every machine the handle is installed in; a state with
/// captured scratch should normally drive exactly one entity.
///
/// # Example
///
/// ```rust
/// use demeanor::builder::StateBuilder;
/// use demeanor::State;
///
/// struct Sentry {
///     speed: f32,
/// }
///
/// let patrol = StateBuilder::new("PATROL")
///     .on_entering(|sentry: &mut Sentry| sentry.speed = 80.0)
///     .build();
///
/// assert_eq!(patrol.name(), "PATROL");
///
/// // Same name, different state.
/// let other = State::<Sentry>::new("PATROL");
/// assert_ne!(patrol, other);
/// ```
pub struct State<Ctx> {
    pub(crate) name: String,
    pub(crate) on_entering: Option<LifecycleFn<Ctx>>,
    pub(crate) on_entered_from: Option<TransitionFn<Ctx>>,
    pub(crate) on_update: Option<UpdateFn<Ctx>>,
    pub(crate) on_exiting: Option<LifecycleFn<Ctx>>,
    pub(crate) on_exiting_to: Option<TransitionFn<Ctx>>,
}

impl<Ctx> State<Ctx> {
    /// Create a hook-less named state.
    ///
    /// Useful for states whose only job is to be distinguishable, such as
    /// markers the owner's decision logic pivots on.
    ///
    /// # Example
    ///
    /// ```rust
    /// use demeanor::State;
    ///
    /// let dead = State::<()>::new("DEAD");
    /// assert_eq!(dead.name(), "DEAD");
    /// ```
    pub fn new(name: impl Into<String>) -> StateHandle<Ctx> {
        StateHandle::new(State {
            name: name.into(),
            on_entering: None,
            on_entered_from: None,
            on_update: None,
            on_exiting: None,
            on_exiting_to: None,
        })
    }

    /// Create the canonical default idle state: named [`DEFAULT_IDLE`], no
    /// hooks.
    ///
    /// Every call returns a fresh instance with its own identity. Code that
    /// compares against the idle state must keep the handle it constructed;
    /// two idle states are not equal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use demeanor::{State, DEFAULT_IDLE};
    ///
    /// let idle = State::<()>::idle();
    /// assert_eq!(idle.name(), DEFAULT_IDLE);
    /// assert_ne!(idle, State::<()>::idle());
    /// ```
    pub fn idle() -> StateHandle<Ctx> {
        Self::new(DEFAULT_IDLE)
    }

    /// Get the state's name for display and logging.
    ///
    /// The name identifies the state in transition logs and snapshots, but
    /// it is not the state's identity; handle equality is.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn entering(&self, ctx: &mut Ctx) {
        if let Some(hook) = &self.on_entering {
            hook(ctx);
        }
    }

    pub(crate) fn entered_from(&self, ctx: &mut Ctx, previous: &StateHandle<Ctx>) {
        if let Some(hook) = &self.on_entered_from {
            hook(ctx, previous);
        }
    }

    pub(crate) fn update(&self, ctx: &mut Ctx, dt: f32) {
        if let Some(hook) = &self.on_update {
            hook(ctx, dt);
        }
    }

    pub(crate) fn exiting(&self, ctx: &mut Ctx) {
        if let Some(hook) = &self.on_exiting {
            hook(ctx);
        }
    }

    pub(crate) fn exiting_to(&self, ctx: &mut Ctx, next: &StateHandle<Ctx>) {
        if let Some(hook) = &self.on_exiting_to {
            hook(ctx, next);
        }
    }
}

// Closures are not debuggable; report which hooks are set instead.
impl<Ctx> fmt::Debug for State<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("on_entering", &self.on_entering.is_some())
            .field("on_entered_from", &self.on_entered_from.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_exiting", &self.on_exiting.is_some())
            .field("on_exiting_to", &self.on_exiting_to.is_some())
            .finish()
    }
}

impl<Ctx> fmt::Display for State<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Shared handle to a [`State`].
///
/// Handles are cheap to clone and compare by instance identity: a clone is
/// equal to the handle it was cloned from, while two states built separately
/// are never equal, even with identical names.
///
/// # Example
///
/// ```rust
/// use demeanor::State;
///
/// let patrol = State::<()>::new("PATROL");
/// let alias = patrol.clone();
/// let imposter = State::<()>::new("PATROL");
///
/// assert_eq!(patrol, alias);
/// assert_ne!(patrol, imposter);
/// ```
pub struct StateHandle<Ctx>(Arc<State<Ctx>>);

impl<Ctx> StateHandle<Ctx> {
    pub(crate) fn new(state: State<Ctx>) -> Self {
        Self(Arc::new(state))
    }
}

impl<Ctx> Clone for StateHandle<Ctx> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<Ctx> PartialEq for StateHandle<Ctx> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<Ctx> Eq for StateHandle<Ctx> {}

impl<Ctx> Deref for StateHandle<Ctx> {
    type Target = State<Ctx>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<Ctx> fmt::Debug for StateHandle<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<Ctx> fmt::Display for StateHandle<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}
