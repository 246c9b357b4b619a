use serde::{Deserialize, Serialize};
use std::fmt;

/// The already-authenticated caller a checkout is attributed to.
///
/// Authentication happens upstream; the checkout core only records the ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
}

impl AuthenticatedUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for AuthenticatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
