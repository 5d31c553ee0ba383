use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::types::Key;

/// One hop from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Lookup in a mapping node.
    Key(Key),
    /// Position in a sequence node.
    Index(usize),
}

/// Root-to-node sequence of steps. The empty path is the root itself.
///
/// A path is a plain value: it outlives the document it was recorded against
/// and goes stale, not dangling, when that document changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Step>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// A new path one step deeper than `self`.
    pub fn child(&self, step: Step) -> Self {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend_from_slice(&self.0);
        steps.push(step);
        Path(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Step> {
        self.0.last()
    }

    pub fn split_last(&self) -> Option<(&Step, &[Step])> {
        self.0.split_last()
    }

    /// Path of the containing node, `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        self.split_last().map(|(_, init)| Path(init.to_vec()))
    }

    pub fn render(&self) -> String {
        render(self)
    }

    /// RFC 6901 JSON Pointer for this path (`""` for the root).
    pub fn to_pointer(&self) -> String {
        let mut pointer = String::new();
        for step in &self.0 {
            pointer.push('/');
            match step {
                Step::Key(Key::Str(s)) => pointer.push_str(&escape_pointer_token(s)),
                Step::Key(Key::Int(i)) => pointer.push_str(&i.to_string()),
                Step::Index(i) => pointer.push_str(&i.to_string()),
            }
        }
        pointer
    }
}

// JSON Pointer token escape (~0, ~1)
pub fn escape_pointer_token(raw: &str) -> String {
    raw.replace('~', "~0").replace('/', "~1")
}

/// Display form of a path, e.g. `root['authors'][2]['name']`.
pub fn render(path: &Path) -> String {
    let mut out = String::from("root");
    for step in path.steps() {
        // writing into a String cannot fail
        let _ = write!(out, "{step}");
    }
    out
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(key) => write!(f, "[{key}]"),
            Step::Index(i) => write!(f, "[{i}]"),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl From<Vec<Step>> for Path {
    fn from(steps: Vec<Step>) -> Self {
        Path(steps)
    }
}

impl FromIterator<Step> for Path {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl From<&str> for Step {
    fn from(key: &str) -> Self {
        Step::Key(key.into())
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Self {
        Step::Index(index)
    }
}
