//! # lextrie
//!
//! A prefix-indexed string set engine.
//!
//! lextrie stores a set of words in a trie and answers membership and
//! prefix queries in time proportional to the query length. It offers two
//! interchangeable representations, a standard trie (one character per
//! edge) and a radix trie (compressed multi-character edges), plus the
//! structural operations built on top: sub-trie extraction, merging,
//! filtering, metrics, a canonical wire format, and a shared-structure
//! read-only view.
//!
//! ## Example
//!
//! ```
//! use lextrie::Trie;
//!
//! let mut words = Trie::radix();
//! words.insert("alpha");
//! words.insert("alphabet");
//!
//! assert!(words.contains("alpha"));
//! assert!(words.starts_with("alph"));
//! assert_eq!(words.subtrie("alpha").word_count(), 2);
//! ```

pub mod trie;

mod error;

pub use error::{Error, Result};
pub use trie::{Fingerprint, ImmutableTrie, Trie, TrieKind, WireNode, Words};
