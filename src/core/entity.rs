//! Capability contract for entities driven by a state machine.
//!
//! The engine never owns entities. It reads the current state, and after a
//! rule has matched and its transition action succeeded, asks the entity to
//! accept the destination state.

use super::label::State;

/// Boxed error returned by entities and caller-supplied actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Trait for caller-owned values that hold a current [`State`].
///
/// # Example
///
/// ```rust
/// use turnstile::core::{BoxError, State, Stateful};
///
/// struct Host {
///     status: State,
/// }
///
/// impl Stateful for Host {
///     fn state(&self) -> State {
///         self.status.clone()
///     }
///
///     fn set_state(&mut self, state: State) -> Result<(), BoxError> {
///         self.status = state;
///         Ok(())
///     }
/// }
///
/// let mut host = Host { status: State::INITIAL };
/// host.set_state(State::new("Discovering")).unwrap();
/// assert_eq!(host.state(), "Discovering");
/// ```
pub trait Stateful {
    /// Current state of the entity.
    fn state(&self) -> State;

    /// Accept a new state. Entities may reject it with an error, in which case
    /// the engine reports the failure and runs no post-transition action.
    fn set_state(&mut self, state: State) -> Result<(), BoxError>;
}

impl<T: Stateful + ?Sized> Stateful for Box<T> {
    fn state(&self) -> State {
        (**self).state()
    }

    fn set_state(&mut self, state: State) -> Result<(), BoxError> {
        (**self).set_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Locked {
        state: State,
        frozen: bool,
    }

    impl Stateful for Locked {
        fn state(&self) -> State {
            self.state.clone()
        }

        fn set_state(&mut self, state: State) -> Result<(), BoxError> {
            if self.frozen {
                return Err(format!("entity is frozen in '{}'", self.state).into());
            }
            self.state = state;
            Ok(())
        }
    }

    #[test]
    fn entity_accepts_new_state() {
        let mut entity = Locked {
            state: State::INITIAL,
            frozen: false,
        };

        entity.set_state(State::new("Known")).unwrap();
        assert_eq!(entity.state(), "Known");
    }

    #[test]
    fn entity_can_reject_new_state() {
        let mut entity = Locked {
            state: State::new("Known"),
            frozen: true,
        };

        let err = entity.set_state(State::new("Insufficient")).unwrap_err();
        assert_eq!(err.to_string(), "entity is frozen in 'Known'");
        assert_eq!(entity.state(), "Known");
    }

    #[test]
    fn boxed_trait_objects_are_stateful() {
        let mut entity: Box<dyn Stateful> = Box::new(Locked {
            state: State::INITIAL,
            frozen: false,
        });

        entity.set_state(State::new("Discovering")).unwrap();
        assert_eq!(entity.state(), "Discovering");
    }
}
