use std::fmt::{self, Write as _};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::NavigationFailure;
use crate::index::Atom;
use crate::path::Step;

/// Keyed children of an `Object` node, in insertion order.
pub type Mapping = IndexMap<Key, Value>;

/// A mapping key. Keys are always hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// One node of a nested document.
///
/// `Array` and `Tuple` are both sequences; they differ only in indexing. An
/// `Array` is never an index key itself, a `Tuple` is one whenever all of its
/// elements are (see [`crate::index::is_indexable`]). `Object` nodes are
/// never index keys.
///
/// A `Set` is a leaf as far as paths go: its members have no step of their
/// own. The set is never an index key; its members are recorded against the
/// set's path.
///
/// Deserialization is untagged, so a JSON array always becomes an `Array`
/// and `Tuple` or `Set` values can only be built in code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    #[serde(skip_deserializing)]
    Tuple(Vec<Value>),
    Object(Mapping),
    #[serde(skip_deserializing)]
    Set(IndexSet<Atom>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Leaf,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Leaf => "leaf",
        })
    }
}

impl Value {
    pub fn kind(&self) -> NodeKind {
        match self {
            Value::Object(_) => NodeKind::Mapping,
            Value::Array(_) | Value::Tuple(_) => NodeKind::Sequence,
            _ => NodeKind::Leaf,
        }
    }

    pub fn is_mapping(&self) -> bool {
        self.kind() == NodeKind::Mapping
    }

    pub fn is_sequence(&self) -> bool {
        self.kind() == NodeKind::Sequence
    }

    pub fn is_leaf(&self) -> bool {
        self.kind() == NodeKind::Leaf
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Follow a single step: `Key` only into mappings, `Index` only into sequences.
    pub fn follow(&self, step: &Step) -> Result<&Value, NavigationFailure> {
        match (self, step) {
            (Value::Object(map), Step::Key(key)) => map.get(key).ok_or(NavigationFailure::MissingKey),
            (Value::Array(items) | Value::Tuple(items), Step::Index(index)) => items
                .get(*index)
                .ok_or(NavigationFailure::IndexOutOfRange { len: items.len() }),
            (node, _) => Err(NavigationFailure::KindMismatch { found: node.kind() }),
        }
    }

    pub fn follow_mut(&mut self, step: &Step) -> Result<&mut Value, NavigationFailure> {
        match (self, step) {
            (Value::Object(map), Step::Key(key)) => map.get_mut(key).ok_or(NavigationFailure::MissingKey),
            (Value::Array(items) | Value::Tuple(items), Step::Index(index)) => {
                let len = items.len();
                items
                    .get_mut(*index)
                    .ok_or(NavigationFailure::IndexOutOfRange { len })
            }
            (node, _) => Err(NavigationFailure::KindMismatch { found: node.kind() }),
        }
    }

    pub fn get(&self, step: &Step) -> Option<&Value> {
        self.follow(step).ok()
    }

    pub fn get_mut(&mut self, step: &Step) -> Option<&mut Value> {
        self.follow_mut(step).ok()
    }
}

// Python-style string literal: single quotes, `\` and `'` escaped
pub(crate) fn write_quoted<W: fmt::Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('\'')?;
    for c in s.chars() {
        match c {
            '\\' => out.write_str("\\\\")?,
            '\'' => out.write_str("\\'")?,
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('\'')
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => write_quoted(f, s),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(x) => write_float(f, *x),
        }
    }
}

// Python float repr: `nan`, `inf`, and a signed two-digit exponent.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
    }
    let repr = format!("{x:?}");
    match repr.split_once('e') {
        None => f.write_str(&repr),
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_quoted(f, s),
            Value::Array(items) => {
                f.write_char('[')?;
                write_items(f, items)?;
                f.write_char(']')
            }
            Value::Tuple(items) => {
                f.write_char('(')?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Value::Object(map) => {
                f.write_char('{')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_char('}')
            }
            Value::Set(members) if members.is_empty() => f.write_str("set()"),
            Value::Set(members) => {
                f.write_char('{')?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(i) => Value::Number(Number::Int(i)),
            Key::Str(s) => Value::String(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Int(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Int(i64::from(i)))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(Number::Float(x))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Object(map)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
