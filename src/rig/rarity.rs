//! Rarity scale - a total order over chassis and modification tiers
//!
//! Ordinals gate what may be installed where, and the install DC rises
//! with the tier of the modification being worked on. Label parsing is
//! lenient: unknown or missing labels resolve to the lowest tier rather
//! than failing.

use serde::{Deserialize, Serialize};

/// Canonical rarity tiers, lowest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Legendary,
    Artifact,
}

impl Rarity {
    /// All tiers in canonical order
    pub const CANONICAL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::VeryRare,
        Rarity::Legendary,
        Rarity::Artifact,
    ];

    /// Position in the canonical sequence, strictly increasing
    pub fn ordinal(&self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
            Rarity::VeryRare => 4,
            Rarity::Legendary => 5,
            Rarity::Artifact => 6,
        }
    }

    /// Difficulty threshold for install and removal checks on a
    /// modification of this tier
    pub fn install_dc(&self) -> i32 {
        match self {
            Rarity::Common => 10,
            Rarity::Uncommon => 14,
            Rarity::Rare => 18,
            Rarity::VeryRare => 22,
            Rarity::Legendary => 26,
            Rarity::Artifact => 30,
        }
    }

    /// Resolve a free-form label to a tier
    ///
    /// Case and whitespace are normalized first so "Very Rare" and
    /// "veryrare" resolve identically. Equipment-grade synonyms map onto
    /// their canonical tier. Anything unrecognized resolves to Common.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();

        match normalized.as_str() {
            "common" | "standard" => Rarity::Common,
            "uncommon" | "premium" => Rarity::Uncommon,
            "rare" | "prototype" => Rarity::Rare,
            "veryrare" | "advanced" => Rarity::VeryRare,
            "legendary" => Rarity::Legendary,
            "artifact" => Rarity::Artifact,
            _ => Rarity::Common,
        }
    }

    /// Canonical display label
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::VeryRare => "very rare",
            Rarity::Legendary => "legendary",
            Rarity::Artifact => "artifact",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
