//! The trie engine: prefix-indexed string sets
//!
//! Two interchangeable representations behind one API:
//! - standard: one code point per edge
//! - radix: chains of single-child, non-terminal nodes compressed into one
//!   multi-character edge, so the radix form never uses more nodes
//!
//! Nodes are persistent values; mutation rebuilds only the root-to-change
//! path and shares everything else, which is what makes sub-tries and the
//! immutable view cheap structural views rather than copies.

mod node;
mod pretty;
mod query;
mod tree;
mod wire;

pub use node::TrieKind;
pub use query::Words;
pub use tree::{ImmutableTrie, Trie};
pub use wire::{Fingerprint, WireNode};
