//! The trie engine
//!
//! A `Trie` is a handle onto a shared root cell over persistent nodes.
//! Mutation rebuilds the path from the root to the change, reuses every
//! untouched subtree by reference, and swaps the root pointer in the cell.
//! Every handle sharing the cell (clones, empty-prefix sub-tries, and
//! [`ImmutableTrie`] views) observes the swap.

use super::node::{suffix_node, Node, TrieKind};
use super::query;
use super::query::Words;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// State shared between every handle onto one trie
struct Shared {
    kind: TrieKind,
    root: RefCell<Rc<Node>>,
}

/// A prefix-indexed set of strings
///
/// Comes in two interchangeable representations: [`TrieKind::Standard`]
/// (one code point per edge) and [`TrieKind::Radix`] (compressed
/// multi-character edges). Both answer every query identically; the radix
/// form never uses more nodes.
///
/// `Clone` is a handle clone: both handles address the same underlying
/// trie, and a mutation through one is visible through the other. Use
/// [`Trie::filter`] with an always-true predicate to obtain an independent
/// copy.
pub struct Trie {
    shared: Rc<Shared>,
}

thread_local! {
    /// The distinguished zero-size trie, compared by identity
    static EMPTY: Trie = Trie::new(TrieKind::Radix);
}

impl Clone for Trie {
    fn clone(&self) -> Self {
        Trie {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl Trie {
    /// Create an empty trie of the given representation
    pub fn new(kind: TrieKind) -> Self {
        Trie::from_root(kind, Rc::new(Node::root()))
    }

    /// Create an empty standard trie (one code point per edge)
    pub fn standard() -> Self {
        Trie::new(TrieKind::Standard)
    }

    /// Create an empty radix trie (compressed edges)
    pub fn radix() -> Self {
        Trie::new(TrieKind::Radix)
    }

    /// The EMPTY sentinel: a single shared zero-size trie.
    ///
    /// Every call returns a handle onto the same instance, so
    /// `Trie::ptr_eq(&Trie::empty(), &Trie::empty())` holds. Mutating calls
    /// through such a handle detach it first; the sentinel itself never
    /// acquires words.
    pub fn empty() -> Self {
        EMPTY.with(Trie::clone)
    }

    pub(crate) fn from_root(kind: TrieKind, root: Rc<Node>) -> Self {
        Trie {
            shared: Rc::new(Shared {
                kind,
                root: RefCell::new(root),
            }),
        }
    }

    /// True if `a` and `b` are handles onto the same trie instance
    pub fn ptr_eq(a: &Trie, b: &Trie) -> bool {
        Rc::ptr_eq(&a.shared, &b.shared)
    }

    /// Which representation this trie uses
    pub fn kind(&self) -> TrieKind {
        self.shared.kind
    }

    /// The current root, without holding the cell borrow
    pub(crate) fn snapshot(&self) -> Rc<Node> {
        self.shared.root.borrow().clone()
    }

    fn is_sentinel(&self) -> bool {
        EMPTY.with(|e| Rc::ptr_eq(&self.shared, &e.shared))
    }

    /// Re-home a sentinel handle onto a fresh cell before mutation
    fn detach_if_sentinel(&mut self) {
        if self.is_sentinel() {
            self.shared = Rc::new(Shared {
                kind: self.shared.kind,
                root: RefCell::new(Rc::new(Node::root())),
            });
        }
    }

    /// True if no words are stored
    pub fn is_empty(&self) -> bool {
        let root = self.snapshot();
        !root.terminal && root.children.is_empty()
    }

    /// Insert a word. Idempotent: re-inserting changes nothing observable.
    /// Accepts any code-point sequence, including the empty string.
    pub fn insert(&mut self, word: &str) {
        self.detach_if_sentinel();
        let word: Vec<char> = word.chars().collect();
        let root = self.snapshot();
        let new_root = insert_into(self.kind(), &root, &word);
        *self.shared.root.borrow_mut() = new_root;
    }

    /// True if `word` is stored
    pub fn contains(&self, word: &str) -> bool {
        let root = self.snapshot();
        let word: Vec<char> = word.chars().collect();
        matches!(walk(&root, &word), Walk::Boundary(node) if node.terminal)
    }

    /// True if some walk from the root consumes all of `prefix`,
    /// on a node boundary or strictly inside an edge
    pub fn starts_with(&self, prefix: &str) -> bool {
        let root = self.snapshot();
        let prefix: Vec<char> = prefix.chars().collect();
        !matches!(walk(&root, &prefix), Walk::Miss)
    }

    /// The trie reachable after consuming `prefix`.
    ///
    /// An empty prefix returns the same instance; a non-matching prefix
    /// returns the [`Trie::empty`] sentinel. A matched prefix returns a view
    /// sharing the original subtree by reference, never a deep copy.
    /// Law: `p + s` is stored iff `s` is stored in `subtrie(p)`.
    pub fn subtrie(&self, prefix: &str) -> Trie {
        if prefix.is_empty() {
            return self.clone();
        }
        let root = self.snapshot();
        let prefix: Vec<char> = prefix.chars().collect();
        match walk(&root, &prefix) {
            Walk::Miss => Trie::empty(),
            Walk::Boundary(node) => Trie::from_root(self.kind(), Rc::clone(node)),
            Walk::MidEdge { node, consumed } => {
                // The unconsumed remainder hangs below a fresh rootlet;
                // terminal flag and children stay shared with the original.
                let tail = Node {
                    edge: node.edge[consumed..].to_vec(),
                    terminal: node.terminal,
                    children: node.children.clone(),
                };
                let mut rootlet = Node::root();
                rootlet.children.insert(tail.edge[0], Rc::new(tail));
                Trie::from_root(self.kind(), Rc::new(rootlet))
            }
        }
    }

    /// Union this trie's word set with `other`'s.
    ///
    /// Representation-agnostic: every word `other` enumerates is inserted,
    /// and duplicates are no-ops.
    pub fn merge(&mut self, other: &Trie) {
        for word in other.iter() {
            self.insert(&word);
        }
    }

    /// A new trie (same representation) of the words satisfying `predicate`.
    /// The source is untouched. Filtering the EMPTY sentinel short-circuits
    /// to the sentinel itself.
    pub fn filter<P>(&self, predicate: P) -> Trie
    where
        P: Fn(&str) -> bool,
    {
        if self.is_sentinel() {
            return Trie::empty();
        }
        let mut out = Trie::new(self.kind());
        for word in self.iter() {
            if predicate(&word) {
                out.insert(&word);
            }
        }
        out
    }

    /// Number of stored words
    pub fn word_count(&self) -> usize {
        query::word_count(&self.snapshot())
    }

    /// Number of nodes, root included; 0 when no words are stored
    pub fn node_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            query::node_count(&self.snapshot())
        }
    }

    /// Edges along the longest root-to-leaf path; 0 when no words are stored
    pub fn depth(&self) -> usize {
        query::depth(&self.snapshot())
    }

    /// Lazy enumeration of all stored words, in code-point order.
    ///
    /// Restartable: each call walks the trie as it is at call time.
    pub fn iter(&self) -> Words {
        Words::new(self.snapshot())
    }

    /// All stored words, in code-point order
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().collect()
    }

    /// All stored words as a set
    pub fn to_set(&self) -> BTreeSet<String> {
        self.iter().collect()
    }

    /// All stored words beginning with `prefix`, in code-point order
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.subtrie(prefix)
            .iter()
            .map(|suffix| format!("{prefix}{suffix}"))
            .collect()
    }

    /// Number of stored words beginning with `prefix`
    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.subtrie(prefix).word_count()
    }

    /// The prefix at every branch point (two or more children) or word
    /// boundary, the root's empty prefix included when the root qualifies
    pub fn branch_points(&self) -> Vec<String> {
        query::branch_points(&self.snapshot())
    }

    /// The longest prefix shared by every stored word
    pub fn longest_common_prefix(&self) -> String {
        query::longest_common_prefix(&self.snapshot())
    }

    /// Every distinct length-`n` window over every stored word, sorted.
    /// `n == 0` yields nothing.
    pub fn ngrams(&self, n: usize) -> Vec<String> {
        query::ngrams(&self.snapshot(), n)
    }

    /// A read-only view sharing this trie's root cell.
    ///
    /// Not a snapshot: later mutation of this trie is visible through the
    /// view, because both address the same underlying graph.
    pub fn to_immutable(&self) -> ImmutableTrie {
        ImmutableTrie {
            inner: self.clone(),
        }
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("kind", &self.kind())
            .field("word_count", &self.word_count())
            .finish()
    }
}

/// A read-only facade over a [`Trie`]
///
/// Shares the source's root cell rather than copying it: the view reflects
/// later mutation of its source. Single-threaded by construction (`Rc` is
/// not `Send`), so shared reads and writes cannot race.
pub struct ImmutableTrie {
    pub(crate) inner: Trie,
}

impl Clone for ImmutableTrie {
    fn clone(&self) -> Self {
        ImmutableTrie {
            inner: self.inner.clone(),
        }
    }
}

impl ImmutableTrie {
    /// Which representation the underlying trie uses
    pub fn kind(&self) -> TrieKind {
        self.inner.kind()
    }

    /// True if no words are stored
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// True if `word` is stored
    pub fn contains(&self, word: &str) -> bool {
        self.inner.contains(word)
    }

    /// True if some stored path consumes all of `prefix`
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.inner.starts_with(prefix)
    }

    /// The trie reachable after consuming `prefix`, sharing structure
    /// with the underlying trie
    pub fn subtrie(&self, prefix: &str) -> Trie {
        self.inner.subtrie(prefix)
    }

    /// Number of stored words
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// Number of nodes, root included; 0 when no words are stored
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Edges along the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        self.inner.depth()
    }

    /// Lazy enumeration of all stored words, in code-point order
    pub fn iter(&self) -> Words {
        self.inner.iter()
    }

    /// All stored words, in code-point order
    pub fn to_vec(&self) -> Vec<String> {
        self.inner.to_vec()
    }

    /// All stored words as a set
    pub fn to_set(&self) -> BTreeSet<String> {
        self.inner.to_set()
    }

    /// All stored words beginning with `prefix`
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.inner.words_with_prefix(prefix)
    }

    /// Number of stored words beginning with `prefix`
    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.inner.count_with_prefix(prefix)
    }

    /// The prefix at every branch point or word boundary
    pub fn branch_points(&self) -> Vec<String> {
        self.inner.branch_points()
    }

    /// The longest prefix shared by every stored word
    pub fn longest_common_prefix(&self) -> String {
        self.inner.longest_common_prefix()
    }

    /// Every distinct length-`n` window over every stored word, sorted
    pub fn ngrams(&self, n: usize) -> Vec<String> {
        self.inner.ngrams(n)
    }
}

impl fmt::Debug for ImmutableTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmutableTrie")
            .field("kind", &self.kind())
            .field("word_count", &self.word_count())
            .finish()
    }
}

/// Where a walk consuming an input ended
enum Walk<'a> {
    /// Input fully consumed, landing exactly on this node
    Boundary(&'a Rc<Node>),
    /// Input fully consumed `consumed` code points into this node's edge
    MidEdge { node: &'a Rc<Node>, consumed: usize },
    /// Input diverged from every stored path
    Miss,
}

/// Walk from `node` consuming `input` exactly. The root's own edge is never
/// consumed; matching starts at its children.
fn walk<'a>(node: &'a Rc<Node>, input: &[char]) -> Walk<'a> {
    if input.is_empty() {
        return Walk::Boundary(node);
    }
    let Some(child) = node.child(input[0]) else {
        return Walk::Miss;
    };
    let k = child.common_prefix_len(input);
    if k == child.edge.len() {
        walk(child, &input[k..])
    } else if k == input.len() {
        Walk::MidEdge { node: child, consumed: k }
    } else {
        Walk::Miss
    }
}

/// Persistent insert: returns the root of a tree containing `word`, sharing
/// every untouched subtree with `node`. Returns `node` itself (pointer-equal)
/// when the word is already stored.
fn insert_into(kind: TrieKind, node: &Rc<Node>, word: &[char]) -> Rc<Node> {
    if word.is_empty() {
        // Exhausted: this node is the word boundary
        if node.terminal {
            return Rc::clone(node);
        }
        return Rc::new(node.with_terminal());
    }
    let first = word[0];
    match node.child(first) {
        // Extending: no stored path shares the first code point
        None => Rc::new(node.with_child(first, suffix_node(kind, word))),
        Some(child) => {
            let k = child.common_prefix_len(word);
            if k == child.edge.len() {
                // Matching: the whole edge is shared, continue below
                let updated = insert_into(kind, child, &word[k..]);
                if Rc::ptr_eq(&updated, child) {
                    return Rc::clone(node);
                }
                Rc::new(node.with_child(first, updated))
            } else {
                // Diverged strictly inside the edge: split it at k
                let mut head = child.split_at(k);
                let rest = &word[k..];
                if rest.is_empty() {
                    head.terminal = true;
                } else {
                    head = head.with_child(rest[0], suffix_node(kind, rest));
                }
                Rc::new(node.with_child(first, Rc::new(head)))
            }
        }
    }
}
