//! Labeled tree output type for tagged chunk views
//!
//! Tagged chunk views represent each chunk as a small tree: the sub-words
//! sit at the bottom, optionally wrapped in a POS-labeled node, optionally
//! wrapped again in a sense-key node and/or an `NE` node. The tree only
//! carries a label and ordered children; formatting and traversal are left
//! to consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A child of a [`Tree`]: either a plain word or a nested subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeChild {
    Word(String),
    Subtree(Tree),
}

/// A labeled tree with ordered children.
///
/// The label is optional: punctuation has no part of speech, so a
/// POS-labeled tree wrapping a punctuation leaf carries no label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    label: Option<String>,
    children: Vec<TreeChild>,
}

impl Tree {
    pub fn new(label: Option<String>, children: Vec<TreeChild>) -> Self {
        Tree { label, children }
    }

    /// Convenience constructor for a labeled tree.
    pub fn labeled(label: impl Into<String>, children: Vec<TreeChild>) -> Self {
        Tree::new(Some(label.into()), children)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn children(&self) -> &[TreeChild] {
        &self.children
    }

    /// The words at the leaves of this tree, left to right.
    pub fn leaf_words(&self) -> Vec<&str> {
        let mut words = Vec::new();
        let mut stack: Vec<&TreeChild> = self.children.iter().rev().collect();
        while let Some(child) = stack.pop() {
            match child {
                TreeChild::Word(w) => words.push(w.as_str()),
                TreeChild::Subtree(t) => stack.extend(t.children.iter().rev()),
            }
        }
        words
    }
}

impl fmt::Display for Tree {
    /// Bracketed notation: `(label child child)`. An absent label prints
    /// as `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label.as_deref().unwrap_or("-"))?;
        for child in &self.children {
            match child {
                TreeChild::Word(w) => write!(f, " {}", w)?,
                TreeChild::Subtree(t) => write!(f, " {}", t)?,
            }
        }
        write!(f, ")")
    }
}
