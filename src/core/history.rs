//! State change history for audited entities.
//!
//! The engine itself keeps no record of what it did. [`Recorded`] wraps any
//! [`Stateful`] entity and appends a [`StateChange`] each time the wrapped
//! entity accepts a new state, so callers can inspect the path an entity took.

use super::entity::{BoxError, Stateful};
use super::label::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single accepted state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateChange {
    /// The state being left
    pub from: State,
    /// The state being entered
    pub to: State,
    /// When the entity accepted the new state
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    changes: Vec<StateChange>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a change.
    pub fn record(&mut self, change: StateChange) {
        self.changes.push(change);
    }

    /// Get the path of states traversed: the first `from`, then every `to`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::core::{State, StateChange, StateHistory};
    /// use chrono::Utc;
    ///
    /// let mut history = StateHistory::new();
    /// history.record(StateChange {
    ///     from: State::INITIAL,
    ///     to: State::new("Discovering"),
    ///     timestamp: Utc::now(),
    /// });
    /// history.record(StateChange {
    ///     from: State::new("Discovering"),
    ///     to: State::new("Known"),
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// let path = history.path();
    /// assert_eq!(path, vec![&State::INITIAL, &State::new("Discovering"), &State::new("Known")]);
    /// ```
    pub fn path(&self) -> Vec<&State> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(first) = self.changes.first() {
            path.push(&first.from);
        }
        for change in &self.changes {
            path.push(&change.to);
        }
        path
    }

    /// Time between the first and last recorded change, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.first()?, self.changes.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Entity adapter that records every state change the inner entity accepts.
///
/// Rejected state changes are not recorded.
#[derive(Debug)]
pub struct Recorded<E> {
    inner: E,
    history: StateHistory,
}

impl<E: Stateful> Recorded<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            history: StateHistory::new(),
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn into_parts(self) -> (E, StateHistory) {
        (self.inner, self.history)
    }
}

impl<E: Stateful> Stateful for Recorded<E> {
    fn state(&self) -> State {
        self.inner.state()
    }

    fn set_state(&mut self, state: State) -> Result<(), BoxError> {
        let from = self.inner.state();
        self.inner.set_state(state.clone())?;
        self.history.record(StateChange {
            from,
            to: state,
            timestamp: Utc::now(),
        });
        Ok(())
    }
}
