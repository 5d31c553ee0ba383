use crate::config::SearchOptions;
use crate::error::{Error, Result};
use crate::index::{Atom, PathIndex, Role};
use crate::path::{Path, Step};
use crate::tree::{children, preview};
use crate::types::Value;

/// Index the occurrences of `target` in `root`, or of every indexable value
/// when `target` is `None`.
///
/// Walks the document depth-first in pre-order: a node is recorded before
/// its children, mapping children in insertion order, sequence children in
/// positional order. Arrays and objects are walked but never recorded
/// themselves. Never fails; an unindexable `target` yields an empty index.
pub fn search(root: &Value, target: Option<&Value>) -> PathIndex {
    let Some(filter) = Filter::new(target) else {
        return PathIndex::default();
    };
    // only a depth bound can make the walk fail
    walk(root, &filter, &SearchOptions::default()).unwrap_or_default()
}

/// [`search`] with the optional guards of [`SearchOptions`].
pub fn search_with(root: &Value, options: &SearchOptions) -> Result<PathIndex> {
    let Some(filter) = Filter::new(options.target.as_ref()) else {
        return Ok(PathIndex::default());
    };
    walk(root, &filter, options)
}

enum Filter {
    All,
    Only(Atom),
}

impl Filter {
    /// `None` when the target can never match anything.
    fn new(target: Option<&Value>) -> Option<Filter> {
        let Some(value) = target else {
            return Some(Filter::All);
        };
        let atom = Atom::from_value(value);
        if atom.is_none() {
            tracing::debug!(value = %preview(value, 80), "target is not indexable, nothing to record");
        }
        atom.map(Filter::Only)
    }

    fn accepts(&self, atom: &Atom) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(target) => target == atom,
        }
    }
}

fn walk(root: &Value, filter: &Filter, options: &SearchOptions) -> Result<PathIndex> {
    let SearchOptions {
        index_keys,
        index_members,
        max_depth,
        ..
    } = *options;
    let mut index = PathIndex::default();
    // Explicit stack instead of recursion; children go on in reverse so they
    // come off in order.
    let mut stack: Vec<(&Value, Path)> = vec![(root, Path::root())];
    let mut visited: usize = 0;

    tracing::debug!(index_keys, index_members, ?max_depth, "indexing document");

    while let Some((value, path)) = stack.pop() {
        visited += 1;

        if let Some(limit) = max_depth {
            if path.len() > limit {
                tracing::debug!(limit, %path, "depth limit exceeded");
                return Err(Error::DepthLimitExceeded { limit, path });
            }
        }

        // A key is recorded when the walk enters the entry it names, so key
        // occurrences come out in the same pre-order as values.
        if index_keys {
            if let Some(Step::Key(key)) = path.last() {
                let atom = Atom::from(key);
                if filter.accepts(&atom) {
                    tracing::trace!(%path, "key occurrence");
                    index.record(atom, Role::Key, path.clone());
                }
            }
        }

        if let Some(atom) = Atom::from_value(value) {
            if filter.accepts(&atom) {
                tracing::trace!(%path, value = %preview(value, 40), "occurrence");
                index.record(atom, Role::Value, path.clone());
            }
        }

        // Members have no step of their own; they are found at the set.
        if let Value::Set(members) = value {
            for atom in members.iter().filter(|atom| index_members && filter.accepts(atom)) {
                tracing::trace!(%path, member = %atom, "member occurrence");
                index.record(atom.clone(), Role::Member, path.clone());
            }
        }

        stack.extend(children(value).rev().map(|(step, child)| (child, path.child(step))));
    }

    tracing::debug!(
        visited,
        distinct = index.len(),
        occurrences = index.occurrences(),
        "indexing done"
    );
    Ok(index)
}
