//! Presentation-facing facade
//!
//! The panel and chat layers consume these: a classifier, slot status,
//! install/remove requests that come back with a displayable reason, and
//! read-only projections of what is installed. No presentation concern
//! reaches deeper into the crate than this module.

use serde::Serialize;
use serde_json::Value;

use crate::core::config::SlotConfig;
use crate::core::error::Result;
use crate::core::types::ItemId;
use crate::host::doc::ItemDoc;
use crate::host::roll::CheckResolver;
use crate::host::vault::ItemVault;
use crate::rig::chassis::Chassis;
use crate::rig::lifecycle::{
    InstallOutcome, Lifecycle, RemovalOptions, RemovalOutcome, Resolution,
};
use crate::rig::mask;
use crate::rig::rarity::Rarity;

/// Current and maximum slot usage for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub used: u32,
    pub max: u32,
}

/// Read-only listing entry for one installed modification
#[derive(Debug, Clone, Serialize)]
pub struct ModView {
    pub id: ItemId,
    pub name: String,
    pub rarity: Rarity,
    pub tags: Vec<String>,
    pub effect_summaries: Vec<String>,
    pub description: String,
}

/// Delegates to the tolerant boundary classifier
pub fn is_modification(item: &ItemDoc) -> bool {
    mask::looks_like_modification(item)
}

pub fn slot_status(chassis: &Chassis, config: &SlotConfig) -> SlotStatus {
    SlotStatus {
        used: chassis.slot_usage(),
        max: config.max_slots(chassis.rarity),
    }
}

/// Run an install and return the terminal state with its display reason
pub fn request_install<R: CheckResolver>(
    lifecycle: &mut Lifecycle<R>,
    chassis: &mut Chassis,
    candidate: &ItemDoc,
    resolution: Resolution,
    vault: &mut dyn ItemVault,
) -> Result<(InstallOutcome, String)> {
    let outcome = lifecycle.install(chassis, candidate, resolution, vault)?;
    let reason = outcome.to_string();
    Ok((outcome, reason))
}

/// Run a removal and return the terminal state with its display reason
pub fn request_removal<R: CheckResolver>(
    lifecycle: &mut Lifecycle<R>,
    chassis: &mut Chassis,
    mod_id: ItemId,
    resolution: Resolution,
    opts: RemovalOptions,
    vault: &mut dyn ItemVault,
) -> Result<(RemovalOutcome, String)> {
    let outcome = lifecycle.remove(chassis, mod_id, resolution, opts, vault)?;
    let reason = outcome.to_string();
    Ok((outcome, reason))
}

/// Read-only projection of the installed list
pub fn installed_view(chassis: &Chassis) -> Vec<ModView> {
    chassis
        .installed
        .iter()
        .map(|entry| ModView {
            id: entry.id,
            name: entry.name.clone(),
            rarity: entry.rarity,
            tags: entry.injected_tags.iter().cloned().collect(),
            effect_summaries: entry
                .injected_effects
                .iter()
                .map(|e| e.summary())
                .collect(),
            description: entry
                .original_payload
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}
