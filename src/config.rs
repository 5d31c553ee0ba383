use serde::Deserialize;

use crate::types::Value;

/// Knobs for [`crate::search_with`].
///
/// Deserializes from a partial JSON object; missing fields take their
/// defaults (index everything, skip keys and set members, no depth bound).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Only record occurrences equal to this value.
    pub target: Option<Value>,
    /// Also record mapping keys in the key table.
    pub index_keys: bool,
    /// Also record the members of `Set` nodes, against the set's path.
    pub index_members: bool,
    /// Fail instead of descending more than this many steps below the root.
    pub max_depth: Option<usize>,
}

impl SearchOptions {
    pub fn target(mut self, value: impl Into<Value>) -> Self {
        self.target = Some(value.into());
        self
    }

    pub fn index_keys(mut self, on: bool) -> Self {
        self.index_keys = on;
        self
    }

    pub fn index_members(mut self, on: bool) -> Self {
        self.index_members = on;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_partial_json() {
        let options: SearchOptions = serde_json::from_str(r#"{ "target": "gene", "max_depth": 8 }"#).unwrap();
        assert_eq!(options, SearchOptions::default().target("gene").max_depth(8));
        assert!(!options.index_keys);
        assert!(!options.index_members);
    }

    #[test]
    fn loads_role_switches() {
        let json = r#"{ "index_keys": true, "index_members": true }"#;
        let options: SearchOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options, SearchOptions::default().index_keys(true).index_members(true));
    }

    #[test]
    fn empty_object_is_default() {
        let options: SearchOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SearchOptions::default());
    }
}
