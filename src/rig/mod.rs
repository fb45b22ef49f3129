//! Modification rig - rarity gating, type masking, and the install lifecycle

pub mod chassis;
pub mod effects;
pub mod lifecycle;
pub mod mask;
pub mod policy;
pub mod rarity;

pub use chassis::{Chassis, InstalledMod, INSTALLED_FLAG};
pub use effects::{
    project_effects, project_tags, EffectDescriptor, EffectOp, TAG_VOCABULARY,
};
pub use lifecycle::{
    InstallOutcome, Lifecycle, RemovalOptions, RemovalOutcome, Resolution,
};
pub use mask::{classify, is_masked, looks_like_modification, mask, unmask, ItemClass};
pub use policy::{admit, has_capacity, is_rarity_compatible, GatingReason};
pub use rarity::Rarity;
