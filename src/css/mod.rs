//! Lossless stylesheet document model.
//!
//! The tree produced by [`Stylesheet::parse`] keeps every byte of its input:
//! whitespace lives in `before`/`after` slots, and each node remembers the raw
//! text of its prelude. Serializing an unmodified tree gives back the exact
//! source, so callers can drop nodes and re-serialize without disturbing the
//! formatting of everything else.

mod parser;

use std::fmt;

/// A parsed stylesheet: the top-level node list plus trailing whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
    /// Whitespace after the last node.
    pub after: String,
}

/// What a [`Node`] is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Comment,
    /// `@name params;` or `@name params { ... }`.
    AtRule {
        name: String,
        /// Raw prelude text, trimmed of surrounding whitespace.
        params: String,
    },
    /// `selector { ... }`.
    Rule,
    /// `property: value;` or any other token run ending in `;`.
    Declaration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Whitespace preceding the node.
    pub before: String,
    pub kind: NodeKind,
    /// Source text from the first token up to and including `{` or `;`.
    pub head: String,
    pub block: Option<Block>,
}

/// Body of a rule or block at-rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub nodes: Vec<Node>,
    /// Whitespace before the closing brace.
    pub after: String,
    /// The closing brace, or empty when the source ended inside the block.
    pub close: String,
}

impl Stylesheet {
    /// Parses `css` into a document tree. Never fails; unrecognized input is
    /// kept verbatim.
    pub fn parse(css: &str) -> Self {
        parser::parse_stylesheet(css)
    }

    /// Serializes the document, including all whitespace.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        write_nodes(&self.nodes, &mut out);
        out.push_str(&self.after);
        out
    }
}

impl Node {
    /// True for an at-rule with the given name (ASCII case-insensitive).
    pub fn is_at_rule(&self, wanted: &str) -> bool {
        matches!(&self.kind, NodeKind::AtRule { name, .. } if name.eq_ignore_ascii_case(wanted))
    }

    pub fn is_rule(&self) -> bool {
        self.kind == NodeKind::Rule
    }

    /// Prelude of an at-rule, `None` for every other kind.
    pub fn params(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::AtRule { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Child nodes, empty when the node has no block.
    pub fn children(&self) -> &[Node] {
        self.block.as_ref().map_or(&[], |block| &block.nodes)
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.head);
        if let Some(block) = &self.block {
            write_nodes(&block.nodes, out);
            out.push_str(&block.after);
            out.push_str(&block.close);
        }
    }
}

/// Serializes the node without its leading whitespace.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        out.push_str(&node.before);
        node.write_to(out);
    }
}
