//! Transition rules and the actions they run.

use crate::core::{BoxError, Condition, State, TransitionType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

type ActionFn<E, A> = dyn Fn(&mut E, &A) -> Result<(), BoxError> + Send + Sync;

/// Fallible action run against an entity while a rule fires.
///
/// Used both for the transition phase, which may veto the state change by
/// failing, and for the post-transition phase, which runs after the state
/// change has been committed.
pub struct Action<E: ?Sized, A: ?Sized = ()> {
    action: Arc<ActionFn<E, A>>,
}

impl<E: ?Sized + 'static, A: ?Sized + 'static> Action<E, A> {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut E, &A) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Action {
            action: Arc::new(action),
        }
    }
}

impl<E: ?Sized, A: ?Sized> Action<E, A> {
    pub fn call(&self, entity: &mut E, args: &A) -> Result<(), BoxError> {
        (self.action)(entity, args)
    }
}

impl<E: ?Sized, A: ?Sized> Clone for Action<E, A> {
    fn clone(&self) -> Self {
        Action {
            action: Arc::clone(&self.action),
        }
    }
}

impl<E: ?Sized, A: ?Sized> fmt::Debug for Action<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// Human-readable documentation of a rule. Never affects matching.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDoc {
    /// A short name for the rule
    pub name: String,
    /// A more verbose description of the rule
    pub description: String,
}

impl RuleDoc {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The atomic unit of behavior: when an entity in one of `source_states`
/// receives `transition_type` and `condition` holds, run `transition`, move the
/// entity to `destination_state`, then run `post_transition`.
pub struct TransitionRule<E: ?Sized, A: ?Sized = ()> {
    pub transition_type: TransitionType,
    pub source_states: Vec<State>,
    pub destination_state: State,
    pub condition: Option<Condition<E, A>>,
    pub transition: Option<Action<E, A>>,
    pub post_transition: Option<Action<E, A>>,
    pub documentation: RuleDoc,
}

impl<E: ?Sized, A: ?Sized> TransitionRule<E, A> {
    /// Create an unconditional rule with no actions and no documentation.
    pub fn new(
        transition_type: impl Into<TransitionType>,
        source_states: impl IntoIterator<Item = State>,
        destination_state: impl Into<State>,
    ) -> Self {
        Self {
            transition_type: transition_type.into(),
            source_states: source_states.into_iter().collect(),
            destination_state: destination_state.into(),
            condition: None,
            transition: None,
            post_transition: None,
            documentation: RuleDoc::default(),
        }
    }

    /// Whether the rule only fires from the reserved empty state.
    pub fn is_initial_rule(&self) -> bool {
        !self.source_states.is_empty() && self.source_states.iter().all(State::is_initial)
    }

    /// Whether an entity in `current` is in this rule's source set.
    ///
    /// The reserved empty state is only matched by rules whose source set is
    /// exactly `{""}`.
    pub fn source_matches(&self, current: &State) -> bool {
        if current.is_initial() {
            self.is_initial_rule()
        } else {
            self.source_states.contains(current)
        }
    }

    /// Check if this rule can fire for the entity (pure).
    pub fn matches(&self, current: &State, entity: &E, args: &A) -> bool {
        if !self.source_matches(current) {
            return false;
        }

        self.condition
            .as_ref()
            .is_none_or(|c| c.check(entity, args))
    }

    /// Source states as rendered in exported documents.
    pub fn export_sources(&self) -> Vec<String> {
        if self.is_initial_rule() {
            return vec![State::INITIAL.export_label().to_string()];
        }
        self.source_states
            .iter()
            .map(|s| s.export_label().to_string())
            .collect()
    }
}

impl<E: ?Sized, A: ?Sized> Clone for TransitionRule<E, A> {
    fn clone(&self) -> Self {
        Self {
            transition_type: self.transition_type.clone(),
            source_states: self.source_states.clone(),
            destination_state: self.destination_state.clone(),
            condition: self.condition.clone(),
            transition: self.transition.clone(),
            post_transition: self.post_transition.clone(),
            documentation: self.documentation.clone(),
        }
    }
}

impl<E: ?Sized, A: ?Sized> fmt::Debug for TransitionRule<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRule")
            .field("transition_type", &self.transition_type)
            .field("source_states", &self.source_states)
            .field("destination_state", &self.destination_state)
            .field("condition", &self.condition.is_some())
            .field("transition", &self.transition.is_some())
            .field("post_transition", &self.post_transition.is_some())
            .field("documentation", &self.documentation)
            .finish()
    }
}

/// Identifies the rule that fired: its position among the rules registered
/// for the same transition type, and its documented name if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleRef {
    pub index: usize,
    pub name: Option<String>,
}

impl RuleRef {
    pub(crate) fn of<E: ?Sized, A: ?Sized>(index: usize, rule: &TransitionRule<E, A>) -> Self {
        let name = &rule.documentation.name;
        Self {
            index,
            name: (!name.is_empty()).then(|| name.clone()),
        }
    }
}

impl fmt::Display for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "#{} ({})", self.index, name),
            None => write!(f, "#{}", self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Host {
        cores: u32,
    }

    fn discovering() -> State {
        State::new("Discovering")
    }

    fn known() -> State {
        State::new("Known")
    }

    #[test]
    fn source_matches_listed_states() {
        let rule: TransitionRule<Host> =
            TransitionRule::new("SetHwInfo", [discovering(), known()], known());

        assert!(rule.source_matches(&discovering()));
        assert!(rule.source_matches(&known()));
        assert!(!rule.source_matches(&State::new("Insufficient")));
        assert!(!rule.source_matches(&State::INITIAL));
    }

    #[test]
    fn initial_state_only_matches_initial_rules() {
        let initial: TransitionRule<Host> =
            TransitionRule::new("Register", [State::INITIAL], discovering());
        let mixed: TransitionRule<Host> =
            TransitionRule::new("Register", [State::INITIAL, known()], discovering());

        assert!(initial.is_initial_rule());
        assert!(initial.source_matches(&State::INITIAL));
        assert!(!mixed.is_initial_rule());
        assert!(!mixed.source_matches(&State::INITIAL));
        assert!(mixed.source_matches(&known()));
    }

    #[test]
    fn matches_respects_condition() {
        let mut rule: TransitionRule<Host> =
            TransitionRule::new("SetHwInfo", [discovering()], known());
        rule.condition = Some(Condition::new(|h: &Host, _: &()| h.cores >= 4));

        assert!(rule.matches(&discovering(), &Host { cores: 8 }, &()));
        assert!(!rule.matches(&discovering(), &Host { cores: 2 }, &()));
        assert!(!rule.matches(&known(), &Host { cores: 8 }, &()));
    }

    #[test]
    fn export_sources_renders_initial_token() {
        let rule: TransitionRule<Host> =
            TransitionRule::new("Register", [State::INITIAL], discovering());
        assert_eq!(rule.export_sources(), vec!["initial".to_string()]);

        let rule: TransitionRule<Host> =
            TransitionRule::new("Register", [discovering(), known()], discovering());
        assert_eq!(rule.export_sources(), vec!["Discovering", "Known"]);
    }

    #[test]
    fn actions_can_fail() {
        let action: Action<Host> = Action::new(|h: &mut Host, _: &()| {
            if h.cores == 0 {
                return Err("no cores reported".into());
            }
            h.cores += 1;
            Ok(())
        });

        let mut host = Host { cores: 1 };
        action.call(&mut host, &()).unwrap();
        assert_eq!(host.cores, 2);

        let mut empty = Host { cores: 0 };
        let err = action.call(&mut empty, &()).unwrap_err();
        assert_eq!(err.to_string(), "no cores reported");
    }

    fn apply<E: ?Sized, A: ?Sized>(
        action: &Action<E, A>,
        entity: &mut E,
        args: &A,
    ) -> Result<(), BoxError> {
        action.call(entity, args)
    }

    #[test]
    fn call_is_callable_from_unbounded_generic_code() {
        let add: Action<Host, u32> = Action::new(|h: &mut Host, extra: &u32| {
            h.cores += *extra;
            Ok(())
        });

        let mut host = Host { cores: 1 };
        apply(&add, &mut host, &3).unwrap();
        assert_eq!(host.cores, 4);
    }

    #[test]
    fn rule_ref_displays_name_when_documented() {
        let mut rule: TransitionRule<Host> =
            TransitionRule::new("Register", [State::INITIAL], discovering());
        assert_eq!(RuleRef::of(0, &rule).to_string(), "#0");

        rule.documentation = RuleDoc::new("Initial registration", "");
        let fired = RuleRef::of(2, &rule);
        assert_eq!(fired.to_string(), "#2 (Initial registration)");
    }
}
