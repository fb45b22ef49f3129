//! External item documents and vendor-namespaced flag storage
//!
//! `ItemDoc` mirrors what the host document system persists: a declared
//! kind, a free-form system payload, flag-style key/value storage, and an
//! embedded passive-effect sub-collection. Everything this crate attaches
//! to a document lives under the `FLAG_SCOPE` namespace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::types::ItemId;
use crate::rig::effects::EffectDescriptor;
use crate::rig::rarity::Rarity;

/// Vendor namespace for everything this crate stores on a document
pub const FLAG_SCOPE: &str = "gearwright";

/// The document kind the external schema does not recognize
pub const MOD_KIND: &str = "modification";

/// The generic kind external storage accepts
pub const STORAGE_KIND: &str = "loot";

/// An item document as the host system persists it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDoc {
    pub id: ItemId,
    /// Declared document kind, validated by the external schema at commit
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Source path or identifier in the host system (e.g. compendium path)
    #[serde(default)]
    pub path: String,
    /// Free-form system payload (rarity, properties, costs, ...)
    #[serde(default)]
    pub system: Value,
    /// Flag-style key/value storage, namespaced per vendor
    #[serde(default)]
    pub flags: BTreeMap<String, Value>,
    /// Embedded passive effects owned by this document
    #[serde(default)]
    pub effects: Vec<EffectDescriptor>,
}

impl ItemDoc {
    /// Create a bare document of the given kind
    pub fn new(kind: &str, name: &str) -> Self {
        Self {
            id: ItemId::new(),
            kind: kind.to_string(),
            name: name.to_string(),
            description: String::new(),
            path: String::new(),
            system: Value::Null,
            flags: BTreeMap::new(),
            effects: Vec::new(),
        }
    }

    /// Rarity declared in the system payload; missing or unknown labels
    /// resolve to Common
    pub fn rarity(&self) -> Rarity {
        self.system
            .get("rarity")
            .and_then(Value::as_str)
            .map(Rarity::from_label)
            .unwrap_or_default()
    }

    /// Read a flag from this crate's vendor namespace
    pub fn flag(&self, key: &str) -> Option<&Value> {
        self.flags.get(FLAG_SCOPE)?.get(key)
    }

    /// Write a flag into this crate's vendor namespace
    pub fn set_flag(&mut self, key: &str, value: Value) {
        let scope = self
            .flags
            .entry(FLAG_SCOPE.to_string())
            .or_insert_with(|| Value::Object(Default::default()));
        if let Value::Object(map) = scope {
            map.insert(key.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flag_roundtrip() {
        let mut item = ItemDoc::new(MOD_KIND, "Ion Coil");
        assert!(item.flag("masked").is_none());

        item.set_flag("masked", json!(true));
        assert_eq!(item.flag("masked"), Some(&json!(true)));

        // Flags from other vendors are untouched
        item.flags.insert("other-module".into(), json!({"a": 1}));
        assert_eq!(item.flag("masked"), Some(&json!(true)));
    }

    #[test]
    fn test_rarity_from_system_payload() {
        let mut item = ItemDoc::new(MOD_KIND, "Shield Booster");
        item.system = json!({"rarity": "Very Rare"});

        assert_eq!(item.rarity(), Rarity::VeryRare);
    }

    #[test]
    fn test_missing_rarity_defaults_to_common() {
        let item = ItemDoc::new(MOD_KIND, "Unlabeled");

        assert_eq!(item.rarity(), Rarity::Common);
    }

    #[test]
    fn test_doc_serde_roundtrip() {
        let mut item = ItemDoc::new(MOD_KIND, "Keen Edge");
        item.description = "Sharpens anything.".into();
        item.system = json!({"rarity": "rare", "cost": 400});
        item.set_flag("modification", json!(true));

        let encoded = serde_json::to_string(&item).unwrap();
        let decoded: ItemDoc = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, item);
    }
}
