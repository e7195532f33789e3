//! The state machine component that drives hooks.

use crate::core::{State, StateHandle, TransitionLog, TransitionRecord};
use chrono::Utc;
use std::fmt;
use std::mem;
use tracing::debug;

/// A component holding exactly one current state for one entity.
///
/// The machine is deliberately small: it knows which state is current, runs
/// the lifecycle hooks in a fixed order when told to change, and dispatches
/// one `on_update` per tick. It never decides to change state on its own;
/// that judgement belongs to the owning entity's logic.
///
/// Hooks receive the entity context and nothing else. They cannot reach back
/// into the machine, so a state change in reaction to a hook is made by the
/// owner after the call returns, never from inside it.
///
/// # Example
///
/// ```rust
/// use demeanor::builder::StateBuilder;
/// use demeanor::StateMachine;
///
/// struct Guardbot {
///     alertness: u32,
/// }
///
/// let calm = StateBuilder::new("CALM")
///     .on_update(|bot: &mut Guardbot, _dt| {
///         bot.alertness = bot.alertness.saturating_sub(1);
///     })
///     .build();
/// let alert = StateBuilder::new("ALERT")
///     .on_entering(|bot: &mut Guardbot| bot.alertness = 100)
///     .build();
///
/// let mut bot = Guardbot { alertness: 5 };
/// let mut machine = StateMachine::new(&calm, &mut bot);
///
/// machine.update(0.016, &mut bot);
/// assert_eq!(bot.alertness, 4);
///
/// machine.change_state(&alert, &mut bot);
/// assert!(machine.is_in(&alert));
/// assert_eq!(bot.alertness, 100);
/// ```
pub struct StateMachine<Ctx> {
    pub(crate) current: StateHandle<Ctx>,
    pub(crate) log: TransitionLog,
    pub(crate) ticks: u64,
    pub(crate) time_in_state: f32,
}

impl<Ctx> StateMachine<Ctx> {
    /// Create a machine in `initial`, firing its `on_entering` hook.
    ///
    /// There is no previous state at construction, so `on_entered_from`
    /// does not fire and nothing is logged.
    pub fn new(initial: &StateHandle<Ctx>, ctx: &mut Ctx) -> Self {
        let machine = Self {
            current: initial.clone(),
            log: TransitionLog::new(),
            ticks: 0,
            time_in_state: 0.0,
        };
        machine.current.entering(ctx);
        machine
    }

    /// Create a machine in a fresh default idle state.
    ///
    /// The idle state has no hooks, so no entity context is needed. Keep
    /// the handle from [`current_state`](Self::current_state) if you need
    /// to compare against it later; see [`State::idle`].
    pub fn idle() -> Self {
        Self {
            current: State::idle(),
            log: TransitionLog::new(),
            ticks: 0,
            time_in_state: 0.0,
        }
    }

    /// Get the current state.
    pub fn current_state(&self) -> &StateHandle<Ctx> {
        &self.current
    }

    /// Check whether `state` is the current state.
    ///
    /// Identity comparison: a clone of the current handle matches, a
    /// different state with the same name does not.
    pub fn is_in(&self, state: &StateHandle<Ctx>) -> bool {
        self.current == *state
    }

    /// Switch to `target`, running both states' transition hooks.
    ///
    /// If `target` is the current state (identity, not name), nothing
    /// happens: no hooks run, nothing is logged.
    ///
    /// Otherwise, in order:
    /// 1. `on_exiting_to` on the current state, passed `target`
    /// 2. `on_exiting` on the current state
    /// 3. the machine now points at `target`, the change is logged, and
    ///    `time_in_state` resets to zero
    /// 4. `on_entering` on `target`
    /// 5. `on_entered_from` on `target`, passed the previous state
    ///
    /// The pointer and log are updated before the entry hooks run, so a
    /// panicking entry hook leaves the machine already in `target`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use demeanor::builder::StateBuilder;
    /// use demeanor::StateMachine;
    ///
    /// let hide = StateBuilder::new("HIDE")
    ///     .on_exiting_to(|trace: &mut Vec<String>, next| {
    ///         trace.push(format!("leaving for {next}"));
    ///     })
    ///     .build();
    /// let strike = StateBuilder::new("STRIKE")
    ///     .on_entered_from(|trace: &mut Vec<String>, previous| {
    ///         trace.push(format!("came from {previous}"));
    ///     })
    ///     .build();
    ///
    /// let mut trace = Vec::new();
    /// let mut machine = StateMachine::new(&hide, &mut trace);
    /// machine.change_state(&strike, &mut trace);
    ///
    /// assert_eq!(trace, ["leaving for STRIKE", "came from HIDE"]);
    /// ```
    pub fn change_state(&mut self, target: &StateHandle<Ctx>, ctx: &mut Ctx) {
        if self.current == *target {
            return;
        }

        self.current.exiting_to(ctx, target);
        self.current.exiting(ctx);

        let previous = mem::replace(&mut self.current, target.clone());
        self.log.push(TransitionRecord {
            from: previous.name().to_string(),
            to: self.current.name().to_string(),
            tick: self.ticks,
            at: Utc::now(),
        });
        self.time_in_state = 0.0;
        debug!(from = previous.name(), to = self.current.name(), "state changed");

        self.current.entering(ctx);
        self.current.entered_from(ctx, &previous);
    }

    /// Advance one tick.
    ///
    /// Counts the tick, adds `dt` to [`time_in_state`](Self::time_in_state),
    /// then runs `on_update` on the current state. Only the current state is
    /// dispatched to. `dt` is the simulation step in seconds.
    pub fn update(&mut self, dt: f32, ctx: &mut Ctx) {
        self.ticks += 1;
        self.time_in_state += dt;
        self.current.update(ctx, dt);
    }

    /// Get the log of completed state changes.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// Total ticks this machine has been updated.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seconds accumulated since the current state was entered.
    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }
}

/// A default machine starts in a fresh default idle state.
impl<Ctx> Default for StateMachine<Ctx> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<Ctx> fmt::Debug for StateMachine<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current.name())
            .field("ticks", &self.ticks)
            .field("time_in_state", &self.time_in_state)
            .field("changes", &self.log.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateBuilder;
    use crate::core::DEFAULT_IDLE;
    use std::sync::Mutex;

    /// A state whose hooks record their invocations in a trace context.
    fn tagged(name: &str) -> StateHandle<Vec<String>> {
        let entering = format!("{name}.entering");
        let entered = name.to_string();
        let update = format!("{name}.update");
        let exiting = format!("{name}.exiting");
        let exiting_to = name.to_string();
        StateBuilder::new(name)
            .on_entering(move |trace: &mut Vec<String>| trace.push(entering.clone()))
            .on_entered_from(move |trace: &mut Vec<String>, previous| {
                trace.push(format!("{entered}.entered_from({})", previous.name()));
            })
            .on_update(move |trace: &mut Vec<String>, _dt| trace.push(update.clone()))
            .on_exiting(move |trace: &mut Vec<String>| trace.push(exiting.clone()))
            .on_exiting_to(move |trace: &mut Vec<String>, next| {
                trace.push(format!("{exiting_to}.exiting_to({})", next.name()));
            })
            .build()
    }

    #[test]
    fn construction_fires_entering_only() {
        let patrol = tagged("PATROL");
        let mut trace = Vec::new();

        let machine = StateMachine::new(&patrol, &mut trace);

        assert_eq!(trace, ["PATROL.entering"]);
        assert!(machine.is_in(&patrol));
        assert!(machine.log().is_empty());
        assert_eq!(machine.ticks(), 0);
    }

    #[test]
    fn default_machine_is_idle() {
        let machine = StateMachine::<()>::default();
        assert_eq!(machine.current_state().name(), DEFAULT_IDLE);
        assert!(machine.log().is_empty());
    }

    #[test]
    fn change_state_runs_hooks_in_order() {
        let patrol = tagged("PATROL");
        let attack = tagged("ATTACK");
        let mut trace = Vec::new();

        let mut machine = StateMachine::new(&patrol, &mut trace);
        machine.change_state(&attack, &mut trace);

        assert_eq!(
            trace,
            [
                "PATROL.entering",
                "PATROL.exiting_to(ATTACK)",
                "PATROL.exiting",
                "ATTACK.entering",
                "ATTACK.entered_from(PATROL)",
            ]
        );
    }

    #[test]
    fn change_to_current_state_is_a_no_op() {
        let patrol = tagged("PATROL");
        let mut trace = Vec::new();

        let mut machine = StateMachine::new(&patrol, &mut trace);
        machine.change_state(&patrol, &mut trace);
        machine.change_state(&patrol.clone(), &mut trace);

        assert_eq!(trace, ["PATROL.entering"]);
        assert!(machine.log().is_empty());
    }

    #[test]
    fn same_name_is_a_different_state() {
        let patrol = tagged("PATROL");
        let imposter = tagged("PATROL");
        let mut trace = Vec::new();

        let mut machine = StateMachine::new(&patrol, &mut trace);
        machine.change_state(&imposter, &mut trace);

        assert!(machine.is_in(&imposter));
        assert!(!machine.is_in(&patrol));
        assert_eq!(machine.log().path(), ["PATROL", "PATROL"]);
    }

    #[test]
    fn reentry_reports_fresh_provenance_and_keeps_scratch() {
        let visits = Mutex::new(0u32);
        let patrol = StateBuilder::new("PATROL")
            .on_entering(move |trace: &mut Vec<String>| {
                let mut visits = visits.lock().unwrap();
                *visits += 1;
                trace.push(format!("PATROL.visit{visits}"));
            })
            .on_entered_from(|trace: &mut Vec<String>, previous| {
                trace.push(format!("PATROL.entered_from({})", previous.name()));
            })
            .build();
        let attack = tagged("ATTACK");
        let mut trace = Vec::new();

        let mut machine = StateMachine::new(&patrol, &mut trace);
        machine.change_state(&attack, &mut trace);
        machine.change_state(&patrol, &mut trace);

        assert_eq!(trace.first().map(String::as_str), Some("PATROL.visit1"));
        assert!(trace.contains(&"PATROL.visit2".to_string()));
        assert_eq!(
            trace.last().map(String::as_str),
            Some("PATROL.entered_from(ATTACK)")
        );
    }

    #[test]
    fn update_dispatches_to_current_state_only() {
        let patrol = tagged("PATROL");
        let attack = tagged("ATTACK");
        let mut trace = Vec::new();

        let mut machine = StateMachine::new(&patrol, &mut trace);
        trace.clear();
        machine.update(0.016, &mut trace);

        machine.change_state(&attack, &mut trace);
        trace.clear();
        machine.update(0.016, &mut trace);

        assert_eq!(trace, ["ATTACK.update"]);
    }

    #[test]
    fn update_counts_ticks_and_time() {
        let idle = State::new("IDLE");
        let mut machine = StateMachine::new(&idle, &mut ());

        machine.update(0.25, &mut ());
        machine.update(0.25, &mut ());
        machine.update(0.25, &mut ());

        assert_eq!(machine.ticks(), 3);
        assert_eq!(machine.time_in_state(), 0.75);
    }

    #[test]
    fn change_resets_time_in_state_but_not_ticks() {
        let idle = State::new("IDLE");
        let busy = State::new("BUSY");
        let mut machine = StateMachine::new(&idle, &mut ());

        machine.update(0.5, &mut ());
        machine.update(0.5, &mut ());

        // A no-op change does not reset the clock.
        machine.change_state(&idle, &mut ());
        assert_eq!(machine.time_in_state(), 1.0);

        machine.change_state(&busy, &mut ());
        assert_eq!(machine.time_in_state(), 0.0);
        assert_eq!(machine.ticks(), 2);
        assert_eq!(machine.log().records()[0].tick, 2);
    }

    #[test]
    fn log_records_every_change() {
        let a = State::<()>::new("A");
        let b = State::<()>::new("B");
        let c = State::<()>::new("C");
        let mut machine = StateMachine::new(&a, &mut ());

        machine.change_state(&b, &mut ());
        machine.change_state(&c, &mut ());
        machine.change_state(&a, &mut ());

        assert_eq!(machine.log().len(), 3);
        assert_eq!(machine.log().path(), ["A", "B", "C", "A"]);
    }

    #[test]
    fn entered_from_sees_log_already_updated() {
        // The record is appended before the entry hooks run, so a hook that
        // inspects shared state observes the machine already in the target.
        let patrol = tagged("PATROL");
        let attack = tagged("ATTACK");
        let mut trace = Vec::new();

        let mut machine = StateMachine::new(&patrol, &mut trace);
        machine.change_state(&attack, &mut trace);

        assert!(machine.is_in(&attack));
        assert_eq!(machine.log().records()[0].to, "ATTACK");
    }

    #[test]
    fn panicking_entry_hook_leaves_machine_in_target() {
        let calm = tagged("CALM");
        let faulty = StateBuilder::new("FAULTY")
            .on_entering(|_: &mut Vec<String>| panic!("rigged entry"))
            .build();
        let mut trace = Vec::new();

        let mut machine = StateMachine::new(&calm, &mut trace);
        trace.clear();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            machine.change_state(&faulty, &mut trace);
        }));

        assert!(result.is_err());
        assert!(machine.is_in(&faulty));
        assert_eq!(machine.log().path(), ["CALM", "FAULTY"]);
        // Exit hooks completed before the panic.
        assert_eq!(trace, ["CALM.exiting_to(FAULTY)", "CALM.exiting"]);
    }

    #[test]
    fn is_in_matches_clones_not_names() {
        let patrol = State::<()>::new("PATROL");
        let machine = StateMachine::new(&patrol, &mut ());

        assert!(machine.is_in(&patrol.clone()));
        assert!(!machine.is_in(&State::new("PATROL")));
    }

    #[test]
    fn debug_shows_current_name_and_counters() {
        let patrol = State::<()>::new("PATROL");
        let mut machine = StateMachine::new(&patrol, &mut ());
        machine.update(0.25, &mut ());

        let rendered = format!("{machine:?}");
        assert!(rendered.contains("\"PATROL\""));
        assert!(rendered.contains("ticks: 1"));
    }
}
