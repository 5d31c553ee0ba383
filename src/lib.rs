//! Find every place a value occurs in a nested document, and get back to the
//! container that holds it.
//!
//! A document is a [`Value`] tree of mappings, sequences and leaves.
//! [`search`] walks it once and returns a [`PathIndex`] from each indexable
//! value to the [`Path`]s where it occurs. A path renders as
//! `root['authors'][2]['name']` and resolves back to its parent with
//! [`resolve_parent`].
//!
//! ```
//! use snappy_retriever::{from_json_str, resolve_parent, search, Step, Value};
//!
//! # fn main() -> Result<(), snappy_retriever::Error> {
//! let doc = from_json_str(r#"{ "a": [1, 2, { "b": 2 }], "c": 2 }"#)?;
//! let index = search(&doc, Some(&Value::from(2)));
//!
//! let rendered: Vec<String> = index.paths_for(&Value::from(2)).iter().map(|p| p.render()).collect();
//! assert_eq!(rendered, ["root['a'][1]", "root['a'][2]['b']", "root['c']"]);
//!
//! let parent = resolve_parent(&doc, &index.paths_for(&Value::from(2))[0])?;
//! assert_eq!(parent.container().as_sequence().map(<[Value]>::len), Some(3));
//! assert_eq!(parent.step(), &Step::Index(1));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod file;
mod index;
mod node;
mod path;
mod search;
mod state;
mod tree;
mod types;

pub use config::SearchOptions;
pub use error::{Error, NavigationError, NavigationFailure, Result};
pub use file::{from_json_reader, from_json_str};
pub use index::{is_indexable, Atom, FloatBits, Occurrence, PathIndex, Role};
pub use node::{resolve, resolve_mut, resolve_parent, resolve_parent_mut, ParentMut, ParentRef};
pub use path::{escape_pointer_token, render, Path, Step};
pub use search::{search, search_with};
pub use state::Retriever;
pub use tree::{children, preview, Children};
pub use types::{Key, Mapping, NodeKind, Number, Value};
