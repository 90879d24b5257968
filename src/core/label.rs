//! Opaque string labels for states and transition types.
//!
//! Both label types wrap a `Cow<'static, str>` so that well-known labels can be
//! declared as `const` items while labels built at runtime stay owned.

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

/// Token used in exported documents in place of the reserved empty state.
///
/// Rules may not name a real state `"initial"`; registration rejects them so
/// the token stays unambiguous.
pub const INITIAL_EXPORT_TOKEN: &str = "initial";

macro_rules! label_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Create a label from a static string. Usable in `const` items.
            pub const fn from_static(label: &'static str) -> Self {
                Self(Cow::Borrowed(label))
            }

            /// Create a label from any owned or borrowed string.
            pub fn new(label: impl Into<String>) -> Self {
                Self(Cow::Owned(label.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&'static str> for $name {
            fn from(label: &'static str) -> Self {
                Self::from_static(label)
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                Self(Cow::Owned(label))
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

label_type! {
    /// Label identifying the state an entity is in.
    ///
    /// The empty label is reserved: it means "no prior state" and is only
    /// matched by rules whose source set is exactly `{""}`. It is never a valid
    /// destination.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::core::State;
    ///
    /// const DISCOVERING: State = State::from_static("Discovering");
    ///
    /// assert_eq!(DISCOVERING, "Discovering");
    /// assert!(State::INITIAL.is_initial());
    /// assert!(!DISCOVERING.is_initial());
    /// ```
    State
}

label_type! {
    /// Label identifying a category of triggering event, such as `Register`.
    TransitionType
}

impl State {
    /// The reserved empty state.
    pub const INITIAL: State = State::from_static("");

    /// Whether this is the reserved empty state.
    pub fn is_initial(&self) -> bool {
        self.0.is_empty()
    }

    /// The label as it appears in exported documents.
    pub fn export_label(&self) -> &str {
        if self.is_initial() {
            INITIAL_EXPORT_TOKEN
        } else {
            self.as_str()
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::INITIAL
    }
}
