//! Host document system boundary - documents, storage, rolls, and the
//! presentation facade

pub mod api;
pub mod doc;
pub mod roll;
pub mod schema;
pub mod vault;

pub use api::{
    installed_view, is_modification, request_install, request_removal, slot_status, ModView,
    SlotStatus,
};
pub use doc::{ItemDoc, FLAG_SCOPE, MOD_KIND, STORAGE_KIND};
pub use roll::{CheckContext, CheckOutcome, CheckResolver, DiceResolver, ScriptedResolver};
pub use schema::{intercept_precreate, register_modification_kind, SchemaCapability};
pub use vault::{ItemVault, MemoryVault};
