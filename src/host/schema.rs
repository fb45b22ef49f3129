//! Host schema registration and pre-commit interception
//!
//! Making the modification kind storable is a startup concern, not a
//! lifecycle: registration runs once and yields an immutable capability
//! descriptor. The interception hook runs on every document about to be
//! committed and rewrites the ones the external schema would reject.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::host::doc::{ItemDoc, MOD_KIND, STORAGE_KIND};
use crate::rig::mask::{self, ItemClass};

/// Immutable record of the extra document kind made storable at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCapability {
    /// The kind the host schema would otherwise reject
    pub modification_kind: String,
    /// The generic kind masked records are stored under
    pub storage_kind: String,
}

/// Startup step: declare the modification kind to the host system.
///
/// Call once during initialization and keep the descriptor around; there
/// is no further lifecycle to it.
pub fn register_modification_kind() -> SchemaCapability {
    SchemaCapability {
        modification_kind: MOD_KIND.to_string(),
        storage_kind: STORAGE_KIND.to_string(),
    }
}

/// Pre-commit interception point.
///
/// Runs before a new document reaches persistent storage, where the
/// external schema would reject an unsupported kind. Returns the masked
/// replacement for a modification document, or `None` when the document
/// passes through unchanged.
pub fn intercept_precreate(item: &ItemDoc) -> Result<Option<ItemDoc>> {
    match mask::classify(item) {
        ItemClass::Modification if !mask::is_masked(item) => Ok(Some(mask::mask(item)?)),
        _ => Ok(None),
    }
}
