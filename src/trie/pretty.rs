//! Human-readable tree renderer

use super::node::Node;
use super::tree::{ImmutableTrie, Trie};

/// Render the node tree, one edge label per line. Terminal nodes are
/// marked with `*`.
pub(crate) fn render(root: &Node) -> String {
    let mut out = String::from(".");
    if root.terminal {
        out.push_str(" *");
    }
    out.push('\n');
    let count = root.children.len();
    for (i, child) in root.children.values().enumerate() {
        render_into(child, "", i + 1 == count, &mut out);
    }
    out
}

fn render_into(node: &Node, indent: &str, last: bool, out: &mut String) {
    out.push_str(indent);
    out.push_str(if last { "└── " } else { "├── " });
    out.extend(node.edge.iter());
    if node.terminal {
        out.push_str(" *");
    }
    out.push('\n');

    let child_indent = format!("{indent}{}", if last { "    " } else { "│   " });
    let count = node.children.len();
    for (i, child) in node.children.values().enumerate() {
        render_into(child, &child_indent, i + 1 == count, out);
    }
}

impl Trie {
    /// Render the node tree as an indented listing.
    /// Non-empty for any trie, one line per node.
    pub fn to_pretty_string(&self) -> String {
        render(&self.snapshot())
    }
}

impl ImmutableTrie {
    /// Render the node tree as an indented listing
    pub fn to_pretty_string(&self) -> String {
        self.inner.to_pretty_string()
    }
}
