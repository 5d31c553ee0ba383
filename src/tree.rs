use std::iter::Enumerate;
use std::slice;

use crate::path::Step;
use crate::types::{Key, Value};

pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((end, _)) => format!("{}…", &s[..end]),
    }
}

/// Short one-line rendering of a node for log output.
pub fn preview(value: &Value, max: usize) -> String {
    match value {
        Value::Object(m) => format!("{{…}} {} keys", m.len()),
        Value::Array(a) => format!("[…] {} items", a.len()),
        Value::Tuple(t) => format!("(…) {} items", t.len()),
        Value::Set(s) => format!("{{…}} {} members", s.len()),
        leaf => truncate(&leaf.to_string(), max),
    }
}

/// Direct children of a node with the step that reaches each one.
///
/// Mappings yield `Key` steps in insertion order, sequences yield `Index`
/// steps in positional order, leaves yield nothing.
pub fn children(value: &Value) -> Children<'_> {
    match value {
        Value::Object(map) => Children::Mapping(map.iter()),
        Value::Array(items) | Value::Tuple(items) => Children::Sequence(items.iter().enumerate()),
        _ => Children::Leaf,
    }
}

pub enum Children<'a> {
    Mapping(indexmap::map::Iter<'a, Key, Value>),
    Sequence(Enumerate<slice::Iter<'a, Value>>),
    Leaf,
}

impl<'a> Iterator for Children<'a> {
    type Item = (Step, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Mapping(it) => it.next().map(|(k, v)| (Step::Key(k.clone()), v)),
            Children::Sequence(it) => it.next().map(|(i, v)| (Step::Index(i), v)),
            Children::Leaf => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Children::Mapping(it) => it.size_hint(),
            Children::Sequence(it) => it.size_hint(),
            Children::Leaf => (0, Some(0)),
        }
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Children::Mapping(it) => it.next_back().map(|(k, v)| (Step::Key(k.clone()), v)),
            Children::Sequence(it) => it.next_back().map(|(i, v)| (Step::Index(i), v)),
            Children::Leaf => None,
        }
    }
}

impl ExactSizeIterator for Children<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mapping_children_keep_insertion_order() {
        let doc: Value = [("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
        let steps: Vec<Step> = children(&doc).map(|(step, _)| step).collect();
        assert_eq!(steps, vec![Step::from("z"), Step::from("a"), Step::from("m")]);
    }

    #[test]
    fn sequence_children_reverse_cleanly() {
        let doc = Value::Tuple(vec![Value::from("x"), Value::from("y")]);
        let back: Vec<(Step, &Value)> = children(&doc).rev().collect();
        assert_eq!(back, vec![(Step::Index(1), &Value::from("y")), (Step::Index(0), &Value::from("x"))]);
        assert_eq!(children(&doc).len(), 2);
    }

    #[test]
    fn leaves_have_no_children() {
        assert_eq!(children(&Value::from(3)).count(), 0);
    }

    #[test]
    fn preview_truncates_on_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé…");
        assert_eq!(truncate("hi", 5), "hi");
        assert_eq!(preview(&Value::from(vec![Value::Null]), 10), "[…] 1 items");
    }
}
