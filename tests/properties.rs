use std::collections::HashSet;

use proptest::prelude::*;
use snappy_retriever::{
    children, resolve, resolve_parent, search, search_with, Atom, Key, Path, Role, SearchOptions, Step, Value,
};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-4i64..4).prop_map(Value::from),
        (-4i32..4).prop_map(|i| Value::from(f64::from(i) / 2.0)),
        "[a-c]{0,2}".prop_map(Value::from),
        prop::collection::vec(-4i64..4, 0..3)
            .prop_map(|xs| Value::Set(xs.into_iter().map(Atom::Int).collect())),
    ]
}

// Keys overlap the leaf values on purpose so the same atom shows up in
// several roles.
fn key() -> impl Strategy<Value = Key> {
    prop_oneof!["[a-d]".prop_map(Key::from), (-4i64..4).prop_map(Key::from)]
}

fn document() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(6, 64, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Tuple),
            prop::collection::vec((key(), inner), 0..5)
                .prop_map(|entries| entries.into_iter().collect::<Value>()),
        ]
    })
}

fn distinct_indexable(root: &Value) -> HashSet<Atom> {
    let mut seen = HashSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Some(atom) = Atom::from_value(node) {
            seen.insert(atom);
        }
        stack.extend(children(node).map(|(_, child)| child));
    }
    seen
}

fn every_role() -> SearchOptions {
    SearchOptions::default().index_keys(true).index_members(true)
}

// Recursive restatement of the walk: node, then its members, then each entry
// key followed by the entry itself.
fn expected_occurrences(node: &Value, path: &Path, out: &mut Vec<(Atom, Role, Path)>) {
    if let Some(atom) = Atom::from_value(node) {
        out.push((atom, Role::Value, path.clone()));
    }
    if let Value::Set(members) = node {
        out.extend(members.iter().map(|atom| (atom.clone(), Role::Member, path.clone())));
    }
    for (step, child) in children(node) {
        let child_path = path.child(step.clone());
        if let Step::Key(key) = &step {
            out.push((Atom::from(key), Role::Key, child_path.clone()));
        }
        expected_occurrences(child, &child_path, out);
    }
}

proptest! {
    #[test]
    fn every_path_leads_to_its_value(doc in document()) {
        let index = search(&doc, None);
        for (atom, paths) in index.iter() {
            for path in paths {
                let found = resolve(&doc, path).unwrap();
                let found_atom = Atom::from_value(found);
                prop_assert_eq!(found_atom.as_ref(), Some(atom));
            }
        }
    }

    #[test]
    fn parents_hold_the_recorded_value(doc in document()) {
        let index = search(&doc, None);
        for (atom, paths) in index.iter() {
            for path in paths.iter().filter(|p| !p.is_empty()) {
                let parent = resolve_parent(&doc, path).unwrap();
                prop_assert!(parent.container().is_mapping() || parent.container().is_sequence());
                let held = parent.container().get(parent.step()).unwrap();
                let held_atom = Atom::from_value(held);
                prop_assert_eq!(held_atom.as_ref(), Some(atom));
            }
        }
    }

    #[test]
    fn searching_twice_gives_the_same_paths(doc in document()) {
        let first = search(&doc, None);
        let second = search(&doc, None);
        prop_assert_eq!(first.iter().collect::<Vec<_>>(), second.iter().collect::<Vec<_>>());
    }

    #[test]
    fn index_covers_every_distinct_indexable_node(doc in document()) {
        let index = search(&doc, None);
        prop_assert_eq!(index.len(), distinct_indexable(&doc).len());
    }

    #[test]
    fn targeted_search_matches_full_index(doc in document(), pick in any::<prop::sample::Index>()) {
        let full = search(&doc, None);
        let entries: Vec<_> = full.iter().collect();
        prop_assume!(!entries.is_empty());

        let (atom, paths) = entries[pick.index(entries.len())];
        let target = resolve(&doc, &paths[0]).unwrap();
        let targeted = search(&doc, Some(target));

        prop_assert_eq!(targeted.len(), 1);
        prop_assert_eq!(targeted.paths_for_atom(atom), paths);
    }

    #[test]
    fn key_paths_lead_to_the_owning_mapping(doc in document()) {
        let index = search_with(&doc, &every_role()).unwrap();
        for (atom, paths) in index.iter_keys() {
            for path in paths {
                let parent = resolve_parent(&doc, path).unwrap();
                prop_assert!(parent.container().is_mapping());
                match parent.step() {
                    Step::Key(key) => prop_assert_eq!(&Atom::from(key), atom),
                    step => prop_assert!(false, "key occurrence ends in {}", step),
                }
            }
        }
    }

    #[test]
    fn member_paths_lead_to_the_holding_set(doc in document()) {
        let index = search_with(&doc, &every_role()).unwrap();
        for (atom, paths) in index.iter_members() {
            for path in paths {
                match resolve(&doc, path).unwrap() {
                    Value::Set(members) => prop_assert!(members.contains(atom)),
                    other => prop_assert!(false, "member occurrence at {} holds {}", path, other),
                }
            }
        }
    }

    #[test]
    fn occurrences_of_every_role_follow_pre_order(doc in document()) {
        let index = search_with(&doc, &every_role()).unwrap();
        let mut expected = Vec::new();
        expected_occurrences(&doc, &Path::root(), &mut expected);

        let atoms: HashSet<&Atom> = expected.iter().map(|(atom, _, _)| atom).collect();
        let mut recorded = 0;
        for atom in atoms {
            let found: Vec<(Role, Path)> = index
                .occurrences_for_atom(atom)
                .into_iter()
                .map(|occurrence| (occurrence.role, occurrence.path.clone()))
                .collect();
            let wanted: Vec<(Role, Path)> = expected
                .iter()
                .filter(|(other, _, _)| other == atom)
                .map(|(_, role, path)| (*role, path.clone()))
                .collect();
            recorded += found.len();
            prop_assert_eq!(found, wanted);
        }
        let total: usize = index
            .iter()
            .chain(index.iter_keys())
            .chain(index.iter_members())
            .map(|(_, paths)| paths.len())
            .sum();
        prop_assert_eq!(total, recorded);
    }
}
