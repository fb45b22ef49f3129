//! Chassis - the host item carrying installed modifications
//!
//! The chassis exclusively owns its installed list and every tag/effect
//! injected into it. The installed list persists under the vendor flag
//! namespace on the chassis document; tags and effects live in the
//! document's native collections where the host system displays them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{Result, RigError};
use crate::core::types::ItemId;
use crate::host::doc::ItemDoc;
use crate::rig::effects::EffectDescriptor;
use crate::rig::rarity::Rarity;

/// Flag key holding the ordered installed list on a chassis document
pub const INSTALLED_FLAG: &str = "installed";

/// One entry in a chassis's modification list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledMod {
    /// Stable identity of the source item
    pub id: ItemId,
    pub name: String,
    pub rarity: Rarity,
    /// Complete pre-install document, kept so salvage recreates an
    /// identical item
    pub original_payload: Value,
    pub injected_tags: BTreeSet<String>,
    pub injected_effects: Vec<EffectDescriptor>,
}

/// The host item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chassis {
    pub id: ItemId,
    pub name: String,
    pub rarity: Rarity,
    /// Ordered list of installed modifications
    pub installed: Vec<InstalledMod>,
    /// Externally visible tag set
    pub tags: BTreeSet<String>,
    /// Externally visible effects, host-owned once created
    pub effects: Vec<EffectDescriptor>,
}

impl Chassis {
    pub fn new(name: &str, rarity: Rarity) -> Self {
        Self {
            id: ItemId::new(),
            name: name.to_string(),
            rarity,
            installed: Vec::new(),
            tags: BTreeSet::new(),
            effects: Vec::new(),
        }
    }

    /// Current slot usage, derived from the installed list
    pub fn slot_usage(&self) -> u32 {
        self.installed.len() as u32
    }

    pub fn installed_index(&self, id: ItemId) -> Option<usize> {
        self.installed.iter().position(|entry| entry.id == id)
    }

    /// Persist the installed list under the vendor namespace on the
    /// chassis document
    pub fn save_installed(&self, doc: &mut ItemDoc) -> Result<()> {
        let value = serde_json::to_value(&self.installed).map_err(|e| {
            RigError::MalformedPayload {
                item: self.id,
                source: e,
            }
        })?;
        doc.set_flag(INSTALLED_FLAG, value);
        Ok(())
    }

    /// Read an installed list back from a chassis document; a document
    /// that never carried one yields an empty list
    pub fn load_installed(doc: &ItemDoc) -> Result<Vec<InstalledMod>> {
        match doc.flag(INSTALLED_FLAG) {
            None => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                tracing::warn!("chassis document {:?} holds a malformed installed list", doc.id);
                RigError::MalformedPayload {
                    item: doc.id,
                    source: e,
                }
            }),
        }
    }
}
