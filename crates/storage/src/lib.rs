//! Storage abstraction and implementations for Bassline.
//!
//! This crate provides trait-based repositories for the progress record and
//! for surface-owned flags, with a JSON file backend and an in-memory one.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{FlagRepository, ProgressRepository, Result, StorageError};
pub use json_storage::{JsonStorage, PROGRESS_KEY};
pub use memory::MemoryStorage;
