//! Actors: the people, organizations, and tools named in a document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three actor forms the tag-value grammar knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Tool,
    Person,
    Organization,
}

impl ActorKind {
    /// Prefix used in tag-value actor strings (`Person:`, `Tool:`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tool => "Tool",
            Self::Person => "Person",
            Self::Organization => "Organization",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A creator, supplier, originator, annotator, or reviewer.
///
/// Constructed immutably by the actor sub-parser; a `Tool` never carries an
/// email (a parenthesized suffix stays part of the name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub name: String,
    pub email: Option<String>,
}

impl Actor {
    /// Create a tool actor.
    #[must_use]
    pub fn tool(name: impl Into<String>) -> Self {
        Self {
            kind: ActorKind::Tool,
            name: name.into(),
            email: None,
        }
    }

    /// Create a person actor.
    #[must_use]
    pub fn person(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            kind: ActorKind::Person,
            name: name.into(),
            email,
        }
    }

    /// Create an organization actor.
    #[must_use]
    pub fn organization(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            kind: ActorKind::Organization,
            name: name.into(),
            email,
        }
    }
}

impl fmt::Display for Actor {
    /// Renders the tag-value form, e.g. `Person: Jane Doe (jane@example.com)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{}: {} ({})", self.kind, self.name, email),
            None => write!(f, "{}: {}", self.kind, self.name),
        }
    }
}

/// A supplier or originator value: an actor, or `NOASSERTION`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorOrNoAssertion {
    Actor(Actor),
    NoAssertion,
}

impl fmt::Display for ActorOrNoAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor(actor) => write!(f, "{actor}"),
            Self::NoAssertion => write!(f, "NOASSERTION"),
        }
    }
}
