//! Turnstile: an embeddable rule-driven state machine engine
//!
//! Callers declare states and transition types, register an ordered set of
//! transition rules, and then drive any number of independent entities by
//! running transitions by name against them. Each run selects at most one
//! rule, the first registered rule whose source states contain the entity's
//! state and whose condition holds, and applies it.
//!
//! # Core Concepts
//!
//! - **State / TransitionType**: opaque string labels. The empty state is
//!   reserved for entities that have no state yet
//! - **Stateful**: the capability an entity exposes, get and set its state
//! - **Condition**: pure predicates, composable with `not`, `and`, `or`
//! - **TransitionRule**: sources, condition, transition action, destination,
//!   post-transition action
//! - **StateMachine**: the rule table and the three-phase execution protocol
//! - **Export**: a deterministic JSON description of rules and documentation
//!
//! # Example
//!
//! ```rust
//! use turnstile::builder::{StateMachineBuilder, TransitionRuleBuilder};
//! use turnstile::core::{BoxError, State, Stateful};
//!
//! struct Host {
//!     state: State,
//!     cores: u32,
//! }
//!
//! impl Stateful for Host {
//!     fn state(&self) -> State {
//!         self.state.clone()
//!     }
//!
//!     fn set_state(&mut self, state: State) -> Result<(), BoxError> {
//!         self.state = state;
//!         Ok(())
//!     }
//! }
//!
//! let machine = StateMachineBuilder::<Host, u32>::new()
//!     .rule(
//!         TransitionRuleBuilder::new()
//!             .on("SetHwInfo")
//!             .from_states(["Discovering", "Known", "Insufficient"])
//!             .when(|_, cores: &u32| *cores >= 4)
//!             .transition(|host: &mut Host, cores: &u32| {
//!                 host.cores = *cores;
//!                 Ok(())
//!             })
//!             .to("Known"),
//!     )?
//!     .rule(
//!         TransitionRuleBuilder::new()
//!             .on("SetHwInfo")
//!             .from_states(["Discovering", "Known", "Insufficient"])
//!             .to("Insufficient"),
//!     )?
//!     .build();
//!
//! let mut host = Host { state: State::new("Discovering"), cores: 0 };
//! machine.run("SetHwInfo", &mut host, &8)?;
//! assert_eq!(host.state, "Known");
//! assert_eq!(host.cores, 8);
//!
//! machine.run("SetHwInfo", &mut host, &2)?;
//! assert_eq!(host.state, "Insufficient");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod docs;
pub mod engine;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{and, not, or, BoxError, Condition, State, Stateful, TransitionType};
pub use builder::{BuildError, StateMachineBuilder, TransitionRuleBuilder};
pub use docs::{ExportDocument, StateDoc, TransitionTypeDoc};
pub use engine::{Action, RegistrationError, RuleDoc, RunError, StateMachine, TransitionRule};
