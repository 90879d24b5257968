//! Rule selection and execution.
//!
//! # Key Concepts
//!
//! - **Rules**: source states, an optional condition, optional transition and
//!   post-transition actions, and a destination state
//! - **Rule store**: rules partitioned by transition type, in registration order
//! - **State machine**: picks the first matching rule for an invocation and runs
//!   it in three phases: transition action, state change, post-transition action
//!
//! # Error Contract
//!
//! A failing transition action leaves the entity untouched. A failing state
//! assignment skips the post-transition action. A failing post-transition
//! action is reported, but the state change has already been committed.

mod error;
mod machine;
mod rule;
mod store;

pub use error::{RegistrationError, RunError};
pub use machine::StateMachine;
pub use rule::{Action, RuleDoc, RuleRef, TransitionRule};
pub use store::RuleStore;
