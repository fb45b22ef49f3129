//! Type masking - disguising modifications as a storable generic kind
//!
//! The external schema rejects the modification kind at commit time, so a
//! modification document is rewritten *before* persistence: its declared
//! kind becomes the generic storage kind and the complete original record
//! is embedded under the vendor flag namespace. Unmasking restores the
//! original field-for-field.

use serde_json::Value;

use crate::core::error::{Result, RigError};
use crate::host::doc::{ItemDoc, MOD_KIND, STORAGE_KIND};

/// Flag marking a record as masked
pub const MASKED_FLAG: &str = "masked";

/// Flag holding the embedded original record
pub const ORIGINAL_FLAG: &str = "original";

/// Flag an external source may set to mark an item as a modification
pub const MARK_FLAG: &str = "modification";

/// Path token that identifies modification compendium entries
const PATH_TOKEN: &str = "modifications";

/// Free-text token matched in name and type fields
const TEXT_TOKEN: &str = "modification";

/// Boundary classification of an incoming document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemClass {
    Modification,
    Generic,
}

/// Classify an untyped external document once, at the boundary
pub fn classify(item: &ItemDoc) -> ItemClass {
    if looks_like_modification(item) {
        ItemClass::Modification
    } else {
        ItemClass::Generic
    }
}

/// Is this record currently masked?
pub fn is_masked(item: &ItemDoc) -> bool {
    item.flag(MASKED_FLAG).and_then(Value::as_bool).unwrap_or(false)
}

/// Tolerant classifier for items arriving from uncontrolled sources.
///
/// Deliberately over-inclusive: rejecting a true modification is the worse
/// failure mode, so any one of the signals below is enough.
pub fn looks_like_modification(item: &ItemDoc) -> bool {
    if is_masked(item) {
        return true;
    }
    if item.path.contains(PATH_TOKEN) {
        return true;
    }
    if item.kind == MOD_KIND {
        return true;
    }
    if item.name.to_lowercase().contains(TEXT_TOKEN) {
        return true;
    }
    if let Some(declared) = item.system.get("type").and_then(Value::as_str) {
        if declared.to_lowercase().contains(TEXT_TOKEN) {
            return true;
        }
    }
    item.flag(MARK_FLAG).and_then(Value::as_bool).unwrap_or(false)
}

/// Disguise a modification as the generic storable kind.
///
/// The full original record is embedded verbatim so every field survives
/// the round trip. Masking an already-masked record is a no-op clone; a
/// record is either fully masked or not tagged at all.
pub fn mask(item: &ItemDoc) -> Result<ItemDoc> {
    if is_masked(item) {
        return Ok(item.clone());
    }

    let original = serde_json::to_value(item).map_err(|e| RigError::MalformedPayload {
        item: item.id,
        source: e,
    })?;

    let mut masked = item.clone();
    masked.kind = STORAGE_KIND.to_string();
    masked.set_flag(MASKED_FLAG, Value::Bool(true));
    masked.set_flag(ORIGINAL_FLAG, original);
    Ok(masked)
}

/// Recover the embedded original from a masked record.
///
/// Returns `None` for a record that was never masked. A record that claims
/// to be masked but carries no decodable original is a structural defect.
pub fn unmask(record: &ItemDoc) -> Result<Option<ItemDoc>> {
    if !is_masked(record) {
        return Ok(None);
    }

    let original = record.flag(ORIGINAL_FLAG).ok_or_else(|| {
        tracing::warn!("masked record {:?} has no embedded original", record.id);
        RigError::MissingOriginal { item: record.id }
    })?;

    let item = serde_json::from_value(original.clone()).map_err(|e| {
        tracing::warn!("masked record {:?} holds an undecodable original", record.id);
        RigError::MalformedPayload {
            item: record.id,
            source: e,
        }
    })?;

    Ok(Some(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample_mod() -> ItemDoc {
        let mut item = ItemDoc::new(MOD_KIND, "Ion Capacitor");
        item.description = "Stores a surge of ion energy.".into();
        item.path = "packs.modifications.ion-capacitor".into();
        item.system = json!({"rarity": "rare", "cost": 1200, "properties": {"ion": true}});
        item
    }

    #[test]
    fn test_mask_changes_kind_and_tags() {
        let item = sample_mod();
        let masked = mask(&item).unwrap();

        assert_eq!(masked.kind, STORAGE_KIND);
        assert!(is_masked(&masked));
        assert!(!is_masked(&item));
    }

    #[test]
    fn test_unmask_restores_every_field() {
        let item = sample_mod();
        let masked = mask(&item).unwrap();
        let restored = unmask(&masked).unwrap().unwrap();

        assert_eq!(restored, item);
    }

    #[test]
    fn test_mask_is_idempotent() {
        let item = sample_mod();
        let once = mask(&item).unwrap();
        let twice = mask(&once).unwrap();

        assert_eq!(once, twice);
        assert_eq!(unmask(&twice).unwrap().unwrap(), item);
    }

    #[test]
    fn test_unmask_of_plain_item_is_none() {
        let item = ItemDoc::new("weapon", "Vibroblade");

        assert!(unmask(&item).unwrap().is_none());
    }

    #[test]
    fn test_masked_without_original_is_structural_error() {
        let mut item = ItemDoc::new(STORAGE_KIND, "Broken Record");
        item.set_flag(MASKED_FLAG, json!(true));

        let result = unmask(&item);
        assert!(matches!(result, Err(RigError::MissingOriginal { .. })));
    }

    #[test]
    fn test_masked_with_garbage_original_is_structural_error() {
        let mut item = ItemDoc::new(STORAGE_KIND, "Corrupt Record");
        item.set_flag(MASKED_FLAG, json!(true));
        item.set_flag(ORIGINAL_FLAG, json!("not a document"));

        let result = unmask(&item);
        assert!(matches!(result, Err(RigError::MalformedPayload { .. })));
    }

    #[test]
    fn test_classifier_accepts_each_signal() {
        // Declared kind
        assert!(looks_like_modification(&ItemDoc::new(MOD_KIND, "Plain")));

        // Masked flag
        let masked = mask(&sample_mod()).unwrap();
        assert!(looks_like_modification(&masked));

        // Compendium path token
        let mut by_path = ItemDoc::new("loot", "Mystery Part");
        by_path.path = "packs.modifications.mystery".into();
        assert!(looks_like_modification(&by_path));

        // Free-text name
        let by_name = ItemDoc::new("loot", "Targeting Modification MkII");
        assert!(looks_like_modification(&by_name));

        // Free-text type field on system data
        let mut by_type = ItemDoc::new("loot", "Unnamed");
        by_type.system = json!({"type": "Chassis Modification"});
        assert!(looks_like_modification(&by_type));

        // Explicit vendor tag
        let mut by_tag = ItemDoc::new("loot", "Unnamed");
        by_tag.set_flag(MARK_FLAG, json!(true));
        assert!(looks_like_modification(&by_tag));
    }

    #[test]
    fn test_classifier_rejects_ordinary_items() {
        let mut item = ItemDoc::new("weapon", "Vibroblade");
        item.system = json!({"type": "weapon", "rarity": "rare"});

        assert_eq!(classify(&item), ItemClass::Generic);
    }

    proptest! {
        #[test]
        fn prop_mask_roundtrip(
            name in "[a-zA-Z0-9 ]{0,24}",
            description in "[a-zA-Z0-9 .,]{0,48}",
            cost in 0u32..100_000,
            keen in any::<bool>(),
        ) {
            let mut item = ItemDoc::new(MOD_KIND, &name);
            item.description = description;
            item.system = json!({
                "rarity": "uncommon",
                "cost": cost,
                "properties": {"keen": keen},
            });

            let masked = mask(&item).unwrap();
            prop_assert_eq!(&masked.kind, STORAGE_KIND);

            let restored = unmask(&masked).unwrap().unwrap();
            prop_assert_eq!(restored, item);
        }
    }
}
