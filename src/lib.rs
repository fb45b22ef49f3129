//! Gearwright - chassis modification engine
//!
//! A chassis hosts a bounded number of modification items, gated by a
//! rarity hierarchy and resolved through an optional skill check.
//! Modifications are masked as a generic storable kind so an external
//! document schema that does not recognize them still accepts, persists,
//! and displays them.

pub mod core;
pub mod host;
pub mod rig;
