//! Newtype handle identifying the processor that produced a scene.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-owning provenance handle naming the producer of a scene.
///
/// Scenes never own their producer; they only remember which one made them.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessorId(pub String);

impl ProcessorId {
    /// Creates a new ProcessorId.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the processor name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessorId({})", self.0)
    }
}

impl fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProcessorId {
    fn from(name: &str) -> Self {
        ProcessorId::new(name)
    }
}

impl From<String> for ProcessorId {
    fn from(name: String) -> Self {
        ProcessorId(name)
    }
}
