//! Macros for ergonomic state declaration.

/// Declare a family of hook-less states as local bindings.
///
/// Each entry becomes a `let` binding holding a fresh [`StateHandle`]
/// (`crate::StateHandle`). Give a name explicitly with `= "NAME"`, or omit
/// it to use the binding identifier as the name. States that need hooks are
/// built with [`StateBuilder`](crate::builder::StateBuilder) instead.
///
/// # Example
///
/// ```
/// use demeanor::states;
///
/// struct Npc;
///
/// states! {
///     Npc:
///     patrol = "PATROL",
///     attack = "ATTACK",
///     dead,
/// }
///
/// assert_eq!(patrol.name(), "PATROL");
/// assert_eq!(dead.name(), "dead");
/// assert_ne!(patrol, attack);
/// ```
#[macro_export]
macro_rules! states {
    (
        $ctx:ty :
        $($binding:ident $(= $name:expr)?),+ $(,)?
    ) => {
        $(
            let $binding: $crate::StateHandle<$ctx> =
                $crate::State::new($crate::states!(@name $binding $($name)?));
        )+
    };

    (@name $binding:ident $name:expr) => { $name };
    (@name $binding:ident) => { stringify!($binding) };
}
