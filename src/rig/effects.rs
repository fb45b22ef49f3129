//! Passive effect descriptors and tag/effect projection
//!
//! Installing a modification injects two kinds of side effects into the
//! host chassis: descriptive tags derived from the modification, and
//! copies of its passive effects. Projection duplicates rather than moves:
//! the modification's own definitions stay in its stored payload so
//! salvage can recreate an identical item later.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::types::ItemId;
use crate::host::doc::ItemDoc;

/// Descriptive tokens recognized in modification names
pub const TAG_VOCABULARY: &[&str] = &[
    "keen",
    "vicious",
    "shielding",
    "ion",
    "armored",
    "focused",
    "reinforced",
    "overcharged",
    "lightweight",
    "surging",
];

/// How an effect combines with the stat it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectOp {
    Add,
    Multiply,
    Override,
}

/// A single externally-applied passive modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    /// Stat path this effect modifies
    pub target_key: String,
    pub operation: EffectOp,
    pub value: f64,
    /// Document the effect currently originates from
    #[serde(default)]
    pub origin: Option<ItemId>,
    /// Applies to the owning chassis rather than the item itself
    #[serde(default)]
    pub transfer: bool,
    /// Installed modification that injected this effect; non-owning,
    /// used only to find and delete effects at removal time
    #[serde(default)]
    pub source_mod: Option<ItemId>,
}

impl EffectDescriptor {
    /// Short human-readable form for listings
    pub fn summary(&self) -> String {
        match self.operation {
            EffectOp::Add => format!("{:+} {}", self.value, self.target_key),
            EffectOp::Multiply => format!("x{} {}", self.value, self.target_key),
            EffectOp::Override => format!("{} = {}", self.target_key, self.value),
        }
    }
}

/// Tags a modification contributes to its host chassis.
///
/// Two sources, unioned: vocabulary tokens found in the name
/// (case-insensitive substring match), and boolean property flags already
/// set on the modification's own system data.
pub fn project_tags(item: &ItemDoc) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    let name = item.name.to_lowercase();
    for token in TAG_VOCABULARY {
        if name.contains(token) {
            tags.insert((*token).to_string());
        }
    }

    if let Some(properties) = item.system.get("properties").and_then(Value::as_object) {
        for (key, value) in properties {
            if value.as_bool() == Some(true) {
                tags.insert(key.to_lowercase());
            }
        }
    }

    tags
}

/// Copies of the modification's passive effects, prepared for the chassis.
///
/// Each copy is marked transferable, its origin re-pointed at the chassis,
/// and stamped with the source modification id for later removal. The
/// originals on the item are left untouched.
pub fn project_effects(item: &ItemDoc, chassis: ItemId) -> Vec<EffectDescriptor> {
    item.effects
        .iter()
        .map(|effect| {
            let mut copy = effect.clone();
            copy.transfer = true;
            copy.origin = Some(chassis);
            copy.source_mod = Some(item.id);
            copy
        })
        .collect()
}
