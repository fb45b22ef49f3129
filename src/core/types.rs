//! Core identifiers shared across the crate

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for host documents, chassis, and installed modifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}
