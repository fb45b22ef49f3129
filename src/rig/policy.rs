//! Slot admission policy - capacity and rarity gating
//!
//! Both checks are pure and run before any state mutation begins.
//! Capacity is evaluated first, then rarity; each failure carries its own
//! user-facing reason.

use serde::{Deserialize, Serialize};

use crate::core::config::SlotConfig;
use crate::rig::chassis::Chassis;
use crate::rig::rarity::Rarity;

/// Why an install was refused before any roll happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatingReason {
    /// Every slot on the chassis is occupied
    Full { used: u32, max: u32 },
    /// The modification outranks the chassis
    Incompatible {
        chassis: Rarity,
        modification: Rarity,
    },
}

impl std::fmt::Display for GatingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatingReason::Full { used, max } => {
                write!(f, "chassis modification slots are full ({used}/{max})")
            }
            GatingReason::Incompatible {
                chassis,
                modification,
            } => write!(
                f,
                "a {modification} modification cannot be installed on a {chassis} chassis"
            ),
        }
    }
}

/// Does the chassis have a free slot?
pub fn has_capacity(chassis: &Chassis, config: &SlotConfig) -> bool {
    chassis.slot_usage() < config.max_slots(chassis.rarity)
}

/// A strictly higher-rarity modification never installs on a lower-rarity
/// chassis, regardless of free capacity
pub fn is_rarity_compatible(chassis: Rarity, modification: Rarity) -> bool {
    modification.ordinal() <= chassis.ordinal()
}

/// Admission decision for installing a modification of the given rarity.
///
/// Capacity first, then rarity. Both must pass.
pub fn admit(
    chassis: &Chassis,
    modification: Rarity,
    config: &SlotConfig,
) -> std::result::Result<(), GatingReason> {
    if !has_capacity(chassis, config) {
        return Err(GatingReason::Full {
            used: chassis.slot_usage(),
            max: config.max_slots(chassis.rarity),
        });
    }
    if !is_rarity_compatible(chassis.rarity, modification) {
        return Err(GatingReason::Incompatible {
            chassis: chassis.rarity,
            modification,
        });
    }
    Ok(())
}
