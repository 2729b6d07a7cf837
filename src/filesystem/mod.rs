//! In-memory directory tree with path based manipulation.
//!
//! This module provides a forest of named directories that can be listed,
//! created, deleted and moved by `/`-separated paths. Nothing is backed by
//! real storage; the tree lives as long as its owner.

mod error;
mod manager;
mod path;
mod tree;

pub use error::DirectoryTreeError;
pub use manager::DirectoryManager;
pub use tree::DirectoryForest;
