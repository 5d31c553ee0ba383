use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::path::Path;
use crate::types::{Key, Number, Value};

/// Hashable projection of a [`Value`], the key type of a [`PathIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Atom {
    Null,
    Bool(bool),
    Int(i64),
    Float(FloatBits),
    Str(String),
    Tuple(Vec<Atom>),
}

/// An `f64` compared and hashed by its bits, with `-0.0` folded into `0.0`
/// and every NaN folded into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatBits(u64);

impl FloatBits {
    pub fn new(x: f64) -> Self {
        let canonical = if x.is_nan() {
            f64::NAN
        } else if x == 0.0 {
            0.0
        } else {
            x
        };
        FloatBits(canonical.to_bits())
    }

    pub fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl Serialize for FloatBits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.get())
    }
}

impl Atom {
    /// `None` when the value cannot be an index key: arrays, objects, sets,
    /// and tuples holding any of them.
    pub fn from_value(value: &Value) -> Option<Atom> {
        match value {
            Value::Null => Some(Atom::Null),
            Value::Bool(b) => Some(Atom::Bool(*b)),
            Value::Number(Number::Int(i)) => Some(Atom::Int(*i)),
            Value::Number(Number::Float(x)) => Some(Atom::Float(FloatBits::new(*x))),
            Value::String(s) => Some(Atom::Str(s.clone())),
            Value::Tuple(items) => items
                .iter()
                .map(Atom::from_value)
                .collect::<Option<Vec<_>>>()
                .map(Atom::Tuple),
            Value::Array(_) | Value::Object(_) | Value::Set(_) => None,
        }
    }
}

impl From<&Key> for Atom {
    fn from(key: &Key) -> Self {
        match key {
            Key::Int(i) => Atom::Int(*i),
            Key::Str(s) => Atom::Str(s.clone()),
        }
    }
}

impl From<&Atom> for Value {
    fn from(atom: &Atom) -> Self {
        match atom {
            Atom::Null => Value::Null,
            Atom::Bool(b) => Value::Bool(*b),
            Atom::Int(i) => Value::Number(Number::Int(*i)),
            Atom::Float(x) => Value::Number(Number::Float(x.get())),
            Atom::Str(s) => Value::String(s.clone()),
            Atom::Tuple(items) => Value::Tuple(items.iter().map(Value::from).collect()),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self))
    }
}

/// Whether `value` can be recorded as a [`PathIndex`] key.
pub fn is_indexable(value: &Value) -> bool {
    match value {
        Value::Array(_) | Value::Object(_) | Value::Set(_) => false,
        Value::Tuple(items) => items.iter().all(is_indexable),
        _ => true,
    }
}

/// How a value takes part in the document at a recorded path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The node at the path is the value.
    Value,
    /// The value is the mapping key named by the path's last step.
    Key,
    /// The value is a member of the set at the path.
    Member,
}

/// One recorded occurrence, borrowed from its [`PathIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub role: Role,
    pub path: &'a Path,
}

impl Occurrence<'_> {
    /// Path of the node that contains the value: the parent for node and key
    /// occurrences, the set itself for members. `None` for a root value.
    pub fn container_path(&self) -> Option<Path> {
        match self.role {
            Role::Value | Role::Key => self.path.parent(),
            Role::Member => Some(self.path.clone()),
        }
    }

    /// Text locating the occurrence. Node occurrences render their own path;
    /// keys and members render the path of their container, since neither
    /// can be reached by a further step.
    pub fn render(&self) -> String {
        match self.role {
            Role::Value => self.path.render(),
            Role::Key => self.path.parent().unwrap_or_default().render(),
            Role::Member => self.path.render(),
        }
    }
}

/// Every recorded occurrence of every indexed value, in traversal order.
///
/// Node occurrences, key occurrences and set member occurrences live in
/// separate tables; `order` remembers how they interleave during the walk.
/// A key occurrence path ends in the `Key` step naming that key, so its
/// parent is the mapping that owns the key. A member occurrence path is the
/// path of the set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathIndex {
    values: IndexMap<Atom, Vec<Path>>,
    keys: IndexMap<Atom, Vec<Path>>,
    members: IndexMap<Atom, Vec<Path>>,
    order: IndexMap<Atom, Vec<(Role, usize)>>,
}

impl PathIndex {
    pub(crate) fn record(&mut self, atom: Atom, role: Role, path: Path) {
        let table = match role {
            Role::Value => &mut self.values,
            Role::Key => &mut self.keys,
            Role::Member => &mut self.members,
        };
        let paths = table.entry(atom.clone()).or_default();
        paths.push(path);
        let slot = paths.len() - 1;
        self.order.entry(atom).or_default().push((role, slot));
    }

    /// Paths at which `value` occurs as a node. Empty if it never does or
    /// cannot be indexed.
    pub fn paths_for(&self, value: &Value) -> &[Path] {
        Atom::from_value(value)
            .map(|atom| self.paths_for_atom(&atom))
            .unwrap_or_default()
    }

    pub fn paths_for_atom(&self, atom: &Atom) -> &[Path] {
        Self::slice(&self.values, atom)
    }

    /// Paths at which `value` occurs as a mapping key.
    pub fn key_paths_for(&self, value: &Value) -> &[Path] {
        Atom::from_value(value)
            .map(|atom| Self::slice(&self.keys, &atom))
            .unwrap_or_default()
    }

    /// Paths of the sets that hold `value` as a member.
    pub fn member_paths_for(&self, value: &Value) -> &[Path] {
        Atom::from_value(value)
            .map(|atom| Self::slice(&self.members, &atom))
            .unwrap_or_default()
    }

    /// Every occurrence of `value` in any role, in traversal order.
    pub fn occurrences_for(&self, value: &Value) -> Vec<Occurrence<'_>> {
        Atom::from_value(value)
            .map(|atom| self.occurrences_for_atom(&atom))
            .unwrap_or_default()
    }

    pub fn occurrences_for_atom(&self, atom: &Atom) -> Vec<Occurrence<'_>> {
        let Some(slots) = self.order.get(atom) else {
            return Vec::new();
        };
        let values = Self::slice(&self.values, atom);
        let keys = Self::slice(&self.keys, atom);
        let members = Self::slice(&self.members, atom);
        slots
            .iter()
            .filter_map(|&(role, slot)| {
                let table = match role {
                    Role::Value => values,
                    Role::Key => keys,
                    Role::Member => members,
                };
                table.get(slot).map(|path| Occurrence { role, path })
            })
            .collect()
    }

    pub fn contains(&self, value: &Value) -> bool {
        !self.paths_for(value).is_empty()
    }

    /// Number of distinct values recorded as nodes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of recorded node occurrences.
    pub fn occurrences(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &[Path])> {
        self.values.iter().map(|(atom, paths)| (atom, paths.as_slice()))
    }

    pub fn iter_keys(&self) -> impl Iterator<Item = (&Atom, &[Path])> {
        self.keys.iter().map(|(atom, paths)| (atom, paths.as_slice()))
    }

    pub fn iter_members(&self) -> impl Iterator<Item = (&Atom, &[Path])> {
        self.members.iter().map(|(atom, paths)| (atom, paths.as_slice()))
    }

    fn slice<'a>(table: &'a IndexMap<Atom, Vec<Path>>, atom: &Atom) -> &'a [Path] {
        table.get(atom).map(Vec::as_slice).unwrap_or_default()
    }
}

struct Entries<'a>(&'a IndexMap<Atom, Vec<Path>>);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Entry<'a> {
            value: &'a Atom,
            paths: &'a [Path],
        }
        serializer.collect_seq(self.0.iter().map(|(value, paths)| Entry { value, paths }))
    }
}

// Atoms are not valid JSON object keys, so entries go out as a list.
impl Serialize for PathIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PathIndex", 3)?;
        state.serialize_field("values", &Entries(&self.values))?;
        state.serialize_field("keys", &Entries(&self.keys))?;
        state.serialize_field("members", &Entries(&self.members))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Step;
    use test_case::test_case;

    #[test_case(Value::Null => true ; "null")]
    #[test_case(Value::from("s") => true ; "string")]
    #[test_case(Value::from(f64::NAN) => true ; "nan")]
    #[test_case(Value::Tuple(vec![Value::from(1), Value::from("a")]) => true ; "tuple of leaves")]
    #[test_case(Value::Tuple(vec![Value::from(vec![])]) => false ; "tuple holding an array")]
    #[test_case(Value::from(vec![Value::from(1)]) => false ; "array")]
    #[test_case(Value::Object(Default::default()) => false ; "object")]
    #[test_case(Value::Set([Atom::Int(1)].into_iter().collect()) => false ; "set")]
    fn indexability(value: Value) -> bool {
        assert_eq!(is_indexable(&value), Atom::from_value(&value).is_some());
        is_indexable(&value)
    }

    #[test]
    fn floats_group_by_canonical_bits() {
        assert_eq!(Atom::from_value(&Value::from(-0.0)), Atom::from_value(&Value::from(0.0)));
        assert_eq!(Atom::from_value(&Value::from(f64::NAN)), Atom::from_value(&Value::from(-f64::NAN)));
        assert_ne!(Atom::from_value(&Value::from(1.0)), Atom::from_value(&Value::from(1)));
    }

    #[test]
    fn keeps_duplicate_occurrences_in_order() {
        let mut index = PathIndex::default();
        let first = Path::from(vec![Step::Index(0)]);
        let second = Path::from(vec![Step::Index(3)]);
        index.record(Atom::Int(2), Role::Value, first.clone());
        index.record(Atom::Int(2), Role::Value, second.clone());

        assert_eq!(index.paths_for(&Value::from(2)), &[first, second]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.occurrences(), 2);
        assert!(index.paths_for(&Value::from(vec![])).is_empty());
        assert!(index.key_paths_for(&Value::from(2)).is_empty());
    }

    #[test]
    fn occurrences_interleave_roles_in_record_order() {
        let mut index = PathIndex::default();
        let key = Path::from(vec![Step::from("id")]);
        let node = Path::from(vec![Step::from("xs"), Step::Index(0)]);
        let set = Path::from(vec![Step::from("tags")]);
        index.record(Atom::Str("id".into()), Role::Key, key.clone());
        index.record(Atom::Str("id".into()), Role::Value, node.clone());
        index.record(Atom::Str("id".into()), Role::Member, set.clone());

        let found = index.occurrences_for(&Value::from("id"));
        assert_eq!(
            found,
            vec![
                Occurrence { role: Role::Key, path: &key },
                Occurrence { role: Role::Value, path: &node },
                Occurrence { role: Role::Member, path: &set },
            ]
        );
        let rendered: Vec<String> = found.iter().map(Occurrence::render).collect();
        assert_eq!(rendered, vec!["root", "root['xs'][0]", "root['tags']"]);
        assert_eq!(found[0].container_path(), Some(Path::root()));
        assert_eq!(found[2].container_path(), Some(set));
    }

    #[test]
    fn serializes_entries_as_lists() {
        let mut index = PathIndex::default();
        index.record(Atom::Str("x".into()), Role::Value, Path::from(vec![Step::from("a")]));
        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "values": [{ "value": "x", "paths": [[{ "key": "a" }]] }],
                "keys": [],
                "members": []
            })
        );
    }
}
