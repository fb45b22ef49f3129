//! Install/remove/salvage state machine for chassis modifications
//!
//! Install runs `Eligible -> PendingResolution -> {Installed | Rejected}`;
//! removal runs `Installed -> PendingResolution -> {Salvaged | Destroyed |
//! Unchanged}`. Gating always happens before any roll, and no state
//! mutation begins until the transition is committed to succeed. Access to
//! a chassis is serialized by the caller: one structural mutation at a
//! time.

use serde::{Deserialize, Serialize};

use crate::core::config::SlotConfig;
use crate::core::error::{Result, RigError};
use crate::core::types::ItemId;
use crate::host::doc::ItemDoc;
use crate::host::roll::{CheckContext, CheckOutcome, CheckResolver};
use crate::host::vault::ItemVault;
use crate::rig::chassis::{Chassis, InstalledMod};
use crate::rig::effects;
use crate::rig::mask;
use crate::rig::policy::{self, GatingReason};

/// How a transition is resolved
#[derive(Debug, Clone, Copy)]
pub enum Resolution {
    /// Skip the roll; the transition always succeeds
    Direct,
    /// Roll against the modification's DC with the given modifiers
    Checked(CheckContext),
}

/// Caller choices for a removal
#[derive(Debug, Clone, Copy, Default)]
pub struct RemovalOptions {
    /// Reconstitute the removed item from its preserved payload and mask
    /// it back into generic storage
    pub salvage: bool,
    /// A failed check tears the entry out destructively instead of
    /// leaving it installed
    pub destroy_on_failure: bool,
}

/// Terminal state of an install request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstallOutcome {
    Installed {
        mod_id: ItemId,
        roll: Option<CheckOutcome>,
    },
    Rejected(GatingReason),
    CheckFailed(CheckOutcome),
}

impl std::fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallOutcome::Installed { roll: Some(r), .. } => {
                write!(f, "modification installed (rolled {} vs DC {})", r.total, r.dc)
            }
            InstallOutcome::Installed { roll: None, .. } => write!(f, "modification installed"),
            InstallOutcome::Rejected(reason) => write!(f, "{reason}"),
            InstallOutcome::CheckFailed(r) => {
                write!(f, "installation check failed ({} vs DC {})", r.total, r.dc)
            }
        }
    }
}

/// Terminal state of a removal request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RemovalOutcome {
    /// Entry removed; the item returned to generic storage
    Salvaged {
        item_id: ItemId,
        roll: Option<CheckOutcome>,
    },
    /// Entry removed; the item is gone for good
    Destroyed { roll: Option<CheckOutcome> },
    /// The check failed with no consequence; the entry stays installed
    Unchanged(CheckOutcome),
}

impl std::fmt::Display for RemovalOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalOutcome::Salvaged { .. } => {
                write!(f, "modification removed and salvaged for storage")
            }
            RemovalOutcome::Destroyed { roll: Some(r) } if !r.success => {
                write!(f, "removal check failed ({} vs DC {}); modification destroyed", r.total, r.dc)
            }
            RemovalOutcome::Destroyed { .. } => write!(f, "modification destroyed"),
            RemovalOutcome::Unchanged(r) => write!(
                f,
                "removal check failed ({} vs DC {}); modification remains installed",
                r.total, r.dc
            ),
        }
    }
}

/// The modification lifecycle engine
///
/// Holds the slot configuration and the injected check resolver; all
/// chassis state arrives by reference, so one engine serves any number of
/// chassis.
pub struct Lifecycle<R: CheckResolver> {
    config: SlotConfig,
    resolver: R,
}

impl<R: CheckResolver> Lifecycle<R> {
    pub fn new(config: SlotConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Attempt to install a candidate modification onto a chassis.
    ///
    /// Gating (capacity, then rarity) runs before any roll; a gating
    /// failure never consumes the candidate. On success the source item
    /// is consumed from the vault, the entry is appended, and the
    /// projected tags and effects are injected into the chassis. On a
    /// failed check nothing changes anywhere.
    pub fn install(
        &mut self,
        chassis: &mut Chassis,
        candidate: &ItemDoc,
        resolution: Resolution,
        vault: &mut dyn ItemVault,
    ) -> Result<InstallOutcome> {
        // A masked candidate is restored first; rarity and effects come
        // from the original record
        let source = match mask::unmask(candidate)? {
            Some(original) => original,
            None => candidate.clone(),
        };
        let rarity = source.rarity();

        if let Err(reason) = policy::admit(chassis, rarity, &self.config) {
            return Ok(InstallOutcome::Rejected(reason));
        }

        let roll = match resolution {
            Resolution::Direct => None,
            Resolution::Checked(check) => {
                let outcome = self.resolver.resolve(&check, rarity.install_dc());
                if !outcome.success {
                    return Ok(InstallOutcome::CheckFailed(outcome));
                }
                Some(outcome)
            }
        };

        let payload = serde_json::to_value(&source).map_err(|e| RigError::MalformedPayload {
            item: source.id,
            source: e,
        })?;
        let tags = effects::project_tags(&source);
        let injected = effects::project_effects(&source, chassis.id);

        // The source is consumed, not duplicated
        if vault.take(candidate.id).is_none() {
            tracing::debug!(
                "install source {:?} was not present in storage; nothing to consume",
                candidate.id
            );
        }

        chassis.installed.push(InstalledMod {
            id: source.id,
            name: source.name.clone(),
            rarity,
            original_payload: payload,
            injected_tags: tags.clone(),
            injected_effects: injected.clone(),
        });
        chassis.effects.extend(injected);
        chassis.tags.extend(tags);

        Ok(InstallOutcome::Installed {
            mod_id: source.id,
            roll,
        })
    }

    /// Attempt to remove an installed modification.
    ///
    /// A missing entry is a structural error, not a transition. Checked
    /// removal rolls against the modification's own DC. A failing check
    /// leaves everything unchanged unless `destroy_on_failure` is set, in
    /// which case the entry and its injections are torn out with no item
    /// recreated. A successful removal salvages or destroys per
    /// `opts.salvage`.
    pub fn remove(
        &mut self,
        chassis: &mut Chassis,
        mod_id: ItemId,
        resolution: Resolution,
        opts: RemovalOptions,
        vault: &mut dyn ItemVault,
    ) -> Result<RemovalOutcome> {
        let index = chassis.installed_index(mod_id).ok_or_else(|| {
            tracing::warn!(
                "removal target {:?} is not installed on chassis {:?}",
                mod_id,
                chassis.id
            );
            RigError::ModNotFound {
                chassis: chassis.id,
                mod_id,
            }
        })?;

        let dc = chassis.installed[index].rarity.install_dc();
        let roll = match resolution {
            Resolution::Direct => None,
            Resolution::Checked(check) => {
                let outcome = self.resolver.resolve(&check, dc);
                if !outcome.success {
                    if !opts.destroy_on_failure {
                        return Ok(RemovalOutcome::Unchanged(outcome));
                    }
                    tear_out(chassis, index);
                    return Ok(RemovalOutcome::Destroyed {
                        roll: Some(outcome),
                    });
                }
                Some(outcome)
            }
        };

        // Salvage reconstitutes before anything is mutated, so a malformed
        // payload leaves the chassis untouched
        let restored = if opts.salvage {
            let entry = &chassis.installed[index];
            let original: ItemDoc =
                serde_json::from_value(entry.original_payload.clone()).map_err(|e| {
                    tracing::warn!(
                        "stored payload for {:?} on chassis {:?} is malformed",
                        entry.id,
                        chassis.id
                    );
                    RigError::MalformedPayload {
                        item: entry.id,
                        source: e,
                    }
                })?;
            Some(mask::mask(&original)?)
        } else {
            None
        };

        tear_out(chassis, index);

        match restored {
            Some(item) => {
                let item_id = item.id;
                vault.put(item).map_err(|reason| {
                    tracing::warn!(
                        "storage rejected salvaged item {:?} from chassis {:?}: {}",
                        item_id,
                        chassis.id,
                        reason
                    );
                    RigError::HostRejected {
                        op: "create",
                        item: item_id,
                        reason,
                    }
                })?;
                Ok(RemovalOutcome::Salvaged { item_id, roll })
            }
            None => Ok(RemovalOutcome::Destroyed { roll }),
        }
    }
}

/// Drop an entry and reverse its injections.
///
/// Effects are matched by their stamped source id. A tag is removed only
/// if no remaining entry still contributes it; tags native to the chassis
/// are never touched.
fn tear_out(chassis: &mut Chassis, index: usize) -> InstalledMod {
    let entry = chassis.installed.remove(index);

    chassis
        .effects
        .retain(|effect| effect.source_mod != Some(entry.id));

    let surviving: std::collections::BTreeSet<&String> = chassis
        .installed
        .iter()
        .flat_map(|m| m.injected_tags.iter())
        .collect();
    for tag in &entry.injected_tags {
        if !surviving.contains(tag) {
            chassis.tags.remove(tag);
        }
    }

    entry
}
