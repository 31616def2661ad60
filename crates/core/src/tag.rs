//! Type tags for polymorphic resolution.

use serde::{Deserialize, Serialize};

/// String tag identifying an entity's concrete kind (e.g. `"User"`,
/// `"Post"`).
///
/// Vote records reference their two ends by tag + identifier instead of a
/// foreign-key-per-kind schema, so the tag is the unit of polymorphic
/// dispatch throughout the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for TypeTag {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TypeTag {
    fn from(value: String) -> Self {
        Self(value)
    }
}
