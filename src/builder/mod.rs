//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and label macros for setting up state
//! machines with minimal boilerplate. Building is the setup phase: all rules
//! and documentation are registered before the machine is used.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionRuleBuilder;

use crate::core::{State, TransitionType};
use crate::engine::TransitionRule;

/// Create an unconditional rule with no actions.
///
/// # Example
///
/// ```
/// use turnstile::builder::simple_rule;
/// use turnstile::core::State;
/// use turnstile::engine::TransitionRule;
///
/// struct Host;
///
/// let rule: TransitionRule<Host> =
///     simple_rule("Register", [State::INITIAL], State::new("Discovering"));
/// assert!(rule.is_initial_rule());
/// ```
pub fn simple_rule<E, A>(
    transition_type: impl Into<TransitionType>,
    sources: impl IntoIterator<Item = State>,
    destination: impl Into<State>,
) -> TransitionRule<E, A>
where
    E: ?Sized,
    A: ?Sized,
{
    TransitionRule::new(transition_type, sources, destination)
}

/// Create a rule guarded by a predicate, with no actions.
///
/// # Example
///
/// ```
/// use turnstile::builder::guarded_rule;
/// use turnstile::core::State;
/// use turnstile::engine::TransitionRule;
///
/// struct Host {
///     cores: u32,
/// }
///
/// let rule: TransitionRule<Host> = guarded_rule(
///     "SetHwInfo",
///     [State::new("Discovering")],
///     State::new("Known"),
///     |h: &Host, _: &()| h.cores >= 4,
/// );
/// assert!(rule.matches(&State::new("Discovering"), &Host { cores: 8 }, &()));
/// ```
pub fn guarded_rule<E, A, F>(
    transition_type: impl Into<TransitionType>,
    sources: impl IntoIterator<Item = State>,
    destination: impl Into<State>,
    predicate: F,
) -> TransitionRule<E, A>
where
    E: ?Sized + 'static,
    A: ?Sized + 'static,
    F: Fn(&E, &A) -> bool + Send + Sync + 'static,
{
    let mut rule = TransitionRule::new(transition_type, sources, destination);
    rule.condition = Some(crate::core::Condition::new(predicate));
    rule
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Host {
        cores: u32,
    }

    #[test]
    fn simple_rule_builds() {
        let rule: TransitionRule<Host> = simple_rule(
            "SetHwInfo",
            [State::new("Discovering")],
            State::new("Known"),
        );

        let discovering = State::new("Discovering");
        assert_eq!(rule.transition_type, "SetHwInfo");
        assert!(rule.condition.is_none());
        assert!(rule.matches(&discovering, &Host { cores: 0 }, &()));
    }

    #[test]
    fn guarded_rule_respects_guard() {
        let rule: TransitionRule<Host> = guarded_rule(
            "SetHwInfo",
            [State::new("Discovering")],
            State::new("Known"),
            |h: &Host, _: &()| h.cores >= 4,
        );

        let discovering = State::new("Discovering");
        assert!(rule.matches(&discovering, &Host { cores: 4 }, &()));
        assert!(!rule.matches(&discovering, &Host { cores: 3 }, &()));
    }
}
