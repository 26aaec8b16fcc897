//! In-memory virtual filesystem tree.
//!
//! This module provides an arena-backed tree where nodes are either
//! directories (holding ordered children) or files (holding text content),
//! together with the structural hash used to identify a loaded tree.

mod hash;
mod tree;

pub use hash::{canonical_form, structural_hash};
pub use tree::{Node, NodeId, NodeKind, Tree, TreeError, is_document_char, is_valid_name};
