//! Newtype identifiers for sessions, invocations, skills, and context entries.
//!
//! Each identifier wraps a non-empty `String`. Keeping them distinct prevents
//! passing a session ID where an invocation ID is expected, even though both
//! are opaque strings supplied by the hosting service.

use serde::{Deserialize, Serialize};

/// Returned when an identifier is built from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} must not be empty")]
pub struct EmptyIdentifier(&'static str);

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdentifier;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(EmptyIdentifier(stringify!($name)))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifies a caller session, as handed out by the hosting service.
    ///
    /// Reused unchanged for every request made on behalf of that session.
    SessionId
}

string_id! {
    /// Identifies one skill invocation within a session.
    InvocationId
}

string_id! {
    /// Name of a remotely executed skill.
    SkillName
}

string_id! {
    /// Name of a context entry attached to a session/invocation.
    ContextName
}
