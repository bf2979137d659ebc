//! Group identifier linking line items with a shared lifecycle.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier linking all line items that were created together and must be
/// removed together (bundle sub-items, or one per-unit commit batch).
///
/// A fresh `GroupId` is generated for every commit; it is stored on each
/// emitted line item and treated as a first-class foreign key by the host
/// order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Generate a fresh group identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for GroupId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
