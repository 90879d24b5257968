//! Core vocabulary of the engine.
//!
//! - State and transition-type labels
//! - The `Stateful` capability entities implement
//! - Condition predicates and their combinators
//! - Optional history tracking for audited entities

mod condition;
mod entity;
mod history;
mod label;

pub use condition::{and, not, or, Condition};
pub use entity::{BoxError, Stateful};
pub use history::{Recorded, StateChange, StateHistory};
pub use label::{State, TransitionType, INITIAL_EXPORT_TOKEN};
