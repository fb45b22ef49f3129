pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigLoadError, SlotConfig};
pub use error::{Result, RigError};
pub use types::ItemId;
