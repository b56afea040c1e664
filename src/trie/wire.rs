//! Canonical wire format
//!
//! A trie serializes to a tree of records `{ terminal, edge?, children }`;
//! the root record carries no edge. Children are emitted in code-point order
//! of their first edge character, so the encoding of a given word set is
//! canonical and can be fingerprinted. JSON (via serde_json) and a compact
//! binary form (via bincode) share the one record type.
//!
//! Decoding validates structure before any trie is handed out: a malformed
//! document fails with [`Error::MalformedTrieData`] and never yields a
//! partially-built trie.

use super::node::{Node, TrieKind};
use super::tree::{ImmutableTrie, Trie};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// One record of the serialized tree
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNode {
    /// True if this record ends a stored word
    #[serde(default)]
    pub terminal: bool,
    /// Edge label consumed to reach this record; empty on the root
    #[serde(default)]
    pub edge: String,
    /// Child records, ordered by first edge code point
    #[serde(default)]
    pub children: Vec<WireNode>,
}

/// A BLAKE3 digest of a trie's canonical binary encoding
///
/// Two tries of the same kind with the same word set fingerprint
/// identically.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get a short prefix for display (first 7 chars, like git)
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

fn encode(node: &Node, is_root: bool) -> WireNode {
    WireNode {
        terminal: node.terminal,
        // a root's incoming edge is not part of the word set
        edge: if is_root {
            String::new()
        } else {
            node.edge.iter().collect()
        },
        children: node.children.values().map(|c| encode(c, false)).collect(),
    }
}

fn decode(kind: TrieKind, record: &WireNode, is_root: bool) -> Result<Rc<Node>> {
    let edge: Vec<char> = record.edge.chars().collect();
    if is_root {
        if !edge.is_empty() {
            return Err(Error::MalformedTrieData(
                "root record must not carry an edge".to_string(),
            ));
        }
    } else {
        if edge.is_empty() {
            return Err(Error::MalformedTrieData(
                "empty edge label below the root".to_string(),
            ));
        }
        if kind == TrieKind::Standard && edge.len() != 1 {
            return Err(Error::MalformedTrieData(format!(
                "standard trie edge {:?} must be a single code point",
                record.edge
            )));
        }
        if !record.terminal && record.children.is_empty() {
            return Err(Error::MalformedTrieData(
                "childless non-terminal record".to_string(),
            ));
        }
    }

    let mut children = BTreeMap::new();
    for child_record in &record.children {
        let child = decode(kind, child_record, false)?;
        let key = child.edge[0];
        if children.insert(key, child).is_some() {
            return Err(Error::MalformedTrieData(format!(
                "sibling edges share first code point {key:?}"
            )));
        }
    }

    Ok(Rc::new(Node {
        edge,
        terminal: record.terminal,
        children,
    }))
}

impl Trie {
    /// Serialize to the canonical nested record
    pub fn to_wire(&self) -> WireNode {
        encode(&self.snapshot(), true)
    }

    /// Rebuild a trie of the given representation from a wire record
    pub fn from_wire(kind: TrieKind, record: &WireNode) -> Result<Trie> {
        let root = decode(kind, record, true)?;
        Ok(Trie::from_root(kind, root))
    }

    /// Serialize to a JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_wire())?)
    }

    /// Rebuild a trie of the given representation from a JSON document
    pub fn from_json(kind: TrieKind, json: &str) -> Result<Trie> {
        let record: WireNode = serde_json::from_str(json)?;
        Trie::from_wire(kind, &record)
    }

    /// Serialize to the compact binary encoding
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.to_wire())?)
    }

    /// Rebuild a trie of the given representation from the binary encoding
    pub fn from_bytes(kind: TrieKind, bytes: &[u8]) -> Result<Trie> {
        let record: WireNode = bincode::deserialize(bytes)?;
        Trie::from_wire(kind, &record)
    }

    /// Digest of the canonical binary encoding
    pub fn fingerprint(&self) -> Fingerprint {
        let data = bincode::serialize(&self.to_wire()).expect("serialization should not fail");
        Fingerprint(*blake3::hash(&data).as_bytes())
    }
}

impl ImmutableTrie {
    /// Serialize to the canonical nested record
    pub fn to_wire(&self) -> WireNode {
        self.inner.to_wire()
    }

    /// Serialize to a JSON document
    pub fn to_json(&self) -> Result<String> {
        self.inner.to_json()
    }

    /// Serialize to the compact binary encoding
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.inner.to_bytes()
    }

    /// Digest of the canonical binary encoding
    pub fn fingerprint(&self) -> Fingerprint {
        self.inner.fingerprint()
    }
}
