use crate::config::SearchOptions;
use crate::error::Result;
use crate::index::{Occurrence, PathIndex, Role};
use crate::node::{resolve, resolve_parent};
use crate::path::Path;
use crate::search::search_with;
use crate::types::Value;

/// A document together with the index of everything in it.
///
/// Built in index-all mode with key and set member occurrences on, so any
/// scalar, tuple, mapping key or set member found in the document can be
/// traced back to its container.
/// The index is computed once; to change the document, take it back with
/// [`Retriever::into_root`] and build a new retriever.
#[derive(Debug, Clone)]
pub struct Retriever {
    root: Value,
    index: PathIndex,
}

impl Retriever {
    pub fn new(root: Value) -> Self {
        let options = SearchOptions::default().index_keys(true).index_members(true);
        // no depth bound, so indexing cannot fail
        let index = search_with(&root, &options).unwrap_or_default();
        Self { root, index }
    }

    pub fn with_options(root: Value, options: &SearchOptions) -> Result<Self> {
        let index = search_with(&root, options)?;
        Ok(Self { root, index })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    /// Paths where `value` occurs as a node.
    pub fn track(&self, value: &Value) -> &[Path] {
        self.index.paths_for(value)
    }

    /// Paths where `value` occurs as a mapping key.
    pub fn track_keys(&self, value: &Value) -> &[Path] {
        self.index.key_paths_for(value)
    }

    /// Paths of the sets holding `value` as a member.
    pub fn track_members(&self, value: &Value) -> &[Path] {
        self.index.member_paths_for(value)
    }

    /// Every occurrence of `value`, node, key or member, in document
    /// pre-order.
    pub fn occurrences(&self, value: &Value) -> Vec<Occurrence<'_>> {
        self.index.occurrences_for(value)
    }

    /// Container holding the `nth` occurrence of `value`: the mapping or
    /// sequence for a node, the owning mapping for a key, the set for a
    /// member.
    ///
    /// `None` when `value` occurs fewer than `nth + 1` times or the
    /// occurrence is the root itself.
    pub fn parent_of(&self, value: &Value, nth: usize) -> Option<&Value> {
        let found = self.occurrences(value).into_iter().nth(nth)?;
        match found.role {
            Role::Value | Role::Key => resolve_parent(&self.root, found.path)
                .ok()
                .map(|parent| parent.container()),
            Role::Member => resolve(&self.root, found.path).ok(),
        }
    }

    /// Every occurrence of `value` rendered on its own line. Keys and
    /// members are shown at their container.
    pub fn prettyfind(&self, value: &Value) -> Option<String> {
        let lines: Vec<String> = self.occurrences(value).iter().map(Occurrence::render).collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    pub fn into_root(self) -> Value {
        self.root
    }
}
