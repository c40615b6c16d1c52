//! Groups rules by their enclosing `@media` condition.
//!
//! Works in two passes over an immutable [`Stylesheet`]: the first collects
//! rule text per condition, the second builds the residual document with every
//! `@media` block removed.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::css::{Block, Node, Stylesheet};

/// The at-rule whose blocks are split out.
pub const MONITORED_AT_RULE: &str = "media";

/// Name used for content outside any media block.
pub const UNCONDITIONED: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BucketKey {
    /// Raw condition text of a `@media` block.
    Condition(String),
    /// Everything left after all media blocks are removed.
    Unconditioned,
}

impl BucketKey {
    pub fn as_str(&self) -> &str {
        match self {
            BucketKey::Condition(text) => text,
            BucketKey::Unconditioned => UNCONDITIONED,
        }
    }

    pub fn is_unconditioned(&self) -> bool {
        matches!(self, BucketKey::Unconditioned)
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rules destined for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub key: BucketKey,
    /// Serialized rules in source order.
    pub rules: Vec<String>,
}

/// Buckets in first-seen order. The unconditioned bucket is always last.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    buckets: Vec<Bucket>,
    index: HashMap<BucketKey, usize>,
}

impl Buckets {
    fn slot(&mut self, key: BucketKey) -> usize {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.buckets.len();
        self.index.insert(key.clone(), idx);
        self.buckets.push(Bucket {
            key,
            rules: Vec::new(),
        });
        idx
    }

    pub fn get(&self, key: &BucketKey) -> Option<&Bucket> {
        self.index.get(key).map(|&idx| &self.buckets[idx])
    }

    /// Shorthand for looking up a media condition.
    pub fn condition(&self, text: &str) -> Option<&Bucket> {
        self.get(&BucketKey::Condition(text.to_owned()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<'a> IntoIterator for &'a Buckets {
    type Item = &'a Bucket;
    type IntoIter = std::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of the bucketing pass.
#[derive(Debug, Clone)]
pub struct Split {
    pub buckets: Buckets,
    /// Input document with every media block removed.
    pub residual: Stylesheet,
}

/// Buckets the rules of `sheet` by media condition.
///
/// Blocks with identical condition text share one bucket. The final bucket
/// holds the serialized residual document.
pub fn split(sheet: &Stylesheet) -> Split {
    let mut buckets = Buckets::default();
    collect(&sheet.nodes, None, &mut buckets);

    let residual = Stylesheet {
        nodes: strip(&sheet.nodes),
        after: sheet.after.clone(),
    };
    let idx = buckets.slot(BucketKey::Unconditioned);
    buckets.buckets[idx].rules.push(residual.to_css());

    Split { buckets, residual }
}

fn is_monitored(node: &Node) -> bool {
    node.is_at_rule(MONITORED_AT_RULE)
}

/// `current` is the bucket of the nearest enclosing media block; `None` when
/// outside any, or inside a rule already recorded whole.
fn collect(nodes: &[Node], current: Option<usize>, buckets: &mut Buckets) {
    for node in nodes {
        if is_monitored(node) {
            let condition = node.params().unwrap_or_default().to_owned();
            trace!(%condition, "bucketing media block");
            let idx = buckets.slot(BucketKey::Condition(condition));
            collect(node.children(), Some(idx), buckets);
        } else if node.is_rule() {
            if let Some(idx) = current {
                buckets.buckets[idx].rules.push(strip_node(node).to_string());
            }
            collect(node.children(), None, buckets);
        } else {
            collect(node.children(), current, buckets);
        }
    }
}

fn strip(nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .filter(|node| !is_monitored(node))
        .map(strip_node)
        .collect()
}

fn strip_node(node: &Node) -> Node {
    Node {
        block: node.block.as_ref().map(|block| Block {
            nodes: strip(&block.nodes),
            after: block.after.clone(),
            close: block.close.clone(),
        }),
        ..node.clone()
    }
}
