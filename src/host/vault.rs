//! Item storage boundary
//!
//! Where install sources are consumed from and salvaged items return to.
//! The trait stands in for the host document store; `MemoryVault` backs
//! tests and headless use. A `put` refusal is how host-side write
//! rejections reach the lifecycle.

use ahash::AHashMap;

use crate::core::types::ItemId;
use crate::host::doc::ItemDoc;

/// Document create/take primitives at the storage boundary
pub trait ItemVault {
    /// Remove and return a document; consuming the source of an install
    fn take(&mut self, id: ItemId) -> Option<ItemDoc>;

    /// Commit a document to storage
    fn put(&mut self, item: ItemDoc) -> Result<(), String>;

    fn get(&self, id: ItemId) -> Option<&ItemDoc>;
}

/// In-memory vault
#[derive(Debug, Default)]
pub struct MemoryVault {
    items: AHashMap<ItemId, ItemDoc>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: ItemDoc) {
        self.items.insert(item.id, item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemVault for MemoryVault {
    fn take(&mut self, id: ItemId) -> Option<ItemDoc> {
        self.items.remove(&id)
    }

    fn put(&mut self, item: ItemDoc) -> Result<(), String> {
        self.items.insert(item.id, item);
        Ok(())
    }

    fn get(&self, id: ItemId) -> Option<&ItemDoc> {
        self.items.get(&id)
    }
}
