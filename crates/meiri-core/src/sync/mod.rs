//! # Table Synchronization
//!
//! Mirrors checkpointed records into a remote table. The store is reached
//! through the [`RemoteTable`] trait; [`MemoryTable`] is the in-process
//! implementation used for dry runs.

pub mod memory;
pub mod seed;
pub mod synchronizer;
pub mod table;

pub use memory::MemoryTable;
pub use seed::{RADICAL_TABLE, RadicalSeeder, SeedReport};
pub use synchronizer::{CHARACTERS_TABLE, SyncReport, TableSynchronizer};
pub use table::{Filter, FilterOp, RemoteTable, Row, to_row};
