//! This file defines the ID type that scopes all data to its owning user.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A newtype wrapper for the opaque string IDs issued by the identity
/// provider.
///
/// User accounts themselves (sign-up, login, claims) are managed outside this
/// crate; all this crate needs is an ID to scope every read and write by.
/// Wrapping the string helps disambiguate user IDs from other strings,
/// leading to better compile time errors.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID from the identity provider's key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
