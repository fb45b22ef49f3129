//! Skill-check resolution
//!
//! The lifecycle never touches an RNG directly: it is handed a
//! `CheckResolver` and stays deterministic on its own. The production
//! resolver rolls a d20 and adds the acting owner's modifiers; tests
//! inject a scripted resolver instead.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Modifiers the acting entity brings to a check
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CheckContext {
    /// Relevant ability modifier of the chassis owner
    pub ability_mod: i32,
    /// Proficiency bonus, zero when not proficient
    pub proficiency: i32,
}

/// Result of a resolved check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub total: i32,
    pub dc: i32,
    pub success: bool,
}

/// Single point where chance enters the system
pub trait CheckResolver {
    fn resolve(&mut self, check: &CheckContext, dc: i32) -> CheckOutcome;
}

/// d20 + ability modifier + proficiency, compared against the DC
pub struct DiceResolver {
    rng: ChaCha8Rng,
}

impl DiceResolver {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Deterministic resolver for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for DiceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckResolver for DiceResolver {
    fn resolve(&mut self, check: &CheckContext, dc: i32) -> CheckOutcome {
        let die: i32 = self.rng.gen_range(1..=20);
        let total = die + check.ability_mod + check.proficiency;
        CheckOutcome {
            total,
            dc,
            success: total >= dc,
        }
    }
}

/// Replays a fixed script of die results (test support)
pub struct ScriptedResolver {
    rolls: Vec<i32>,
    next: usize,
}

impl ScriptedResolver {
    pub fn new(rolls: &[i32]) -> Self {
        Self {
            rolls: rolls.to_vec(),
            next: 0,
        }
    }
}

impl CheckResolver for ScriptedResolver {
    fn resolve(&mut self, check: &CheckContext, dc: i32) -> CheckOutcome {
        // A short script repeats its final entry
        let die = self
            .rolls
            .get(self.next)
            .or_else(|| self.rolls.last())
            .copied()
            .unwrap_or(10);
        self.next += 1;

        let total = die + check.ability_mod + check.proficiency;
        CheckOutcome {
            total,
            dc,
            success: total >= dc,
        }
    }
}
