use thiserror::Error;

use crate::core::types::ItemId;

/// Structural and host-boundary failures.
///
/// Gating rejections and failed skill checks are expected outcomes and are
/// returned as values by the lifecycle, never through this enum.
#[derive(Error, Debug)]
pub enum RigError {
    #[error("modification {mod_id:?} is not installed on chassis {chassis:?}")]
    ModNotFound { chassis: ItemId, mod_id: ItemId },

    #[error("masked record {item:?} carries no embedded original")]
    MissingOriginal { item: ItemId },

    #[error("malformed payload for item {item:?}: {source}")]
    MalformedPayload {
        item: ItemId,
        #[source]
        source: serde_json::Error,
    },

    #[error("host storage rejected {op} for item {item:?}: {reason}")]
    HostRejected {
        op: &'static str,
        item: ItemId,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, RigError>;
