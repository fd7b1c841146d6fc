use configtree::tree::{NodeKind, Walk};
use configtree::{ConfigAction, ConfigForm, ConfigTreeState};
use proptest::prelude::*;
use std::sync::Arc;

use super::support::{assert_shared_off_path, root_is_intact, subtree_ids};

/// Abstract operation; indices pick targets from the state it is applied to.
#[derive(Debug, Clone)]
enum Op {
    Create { parent: usize, folder: bool },
    Duplicate { source: usize, parent: usize },
    Update { target: usize, content: String },
    Delete { target: usize },
    SetChain { ids: Vec<u8> },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), any::<bool>()).prop_map(|(parent, folder)| Op::Create { parent, folder }),
        (any::<usize>(), any::<usize>()).prop_map(|(source, parent)| Op::Duplicate { source, parent }),
        (any::<usize>(), "[a-z ]{0,12}").prop_map(|(target, content)| Op::Update { target, content }),
        any::<usize>().prop_map(|target| Op::Delete { target }),
        prop::collection::vec(any::<u8>(), 0..4).prop_map(|ids| Op::SetChain { ids }),
    ]
}

/// Root-inclusive chains of every folder, and of every non-root node.
fn chains(state: &ConfigTreeState) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    let mut folders = Vec::new();
    let mut nodes = Vec::new();
    for entry in state.walk() {
        let chain = state.find_chain(&entry.node.id).unwrap();
        if entry.node.is_folder() {
            folders.push(chain.clone());
        }
        if entry.depth > 0 {
            nodes.push(chain);
        }
    }
    (folders, nodes)
}

/// Turn an abstract op into a concrete action. Fresh ids come from `step`.
fn concretize(state: &ConfigTreeState, op: &Op, step: usize) -> Option<ConfigAction> {
    let (folders, nodes) = chains(state);
    let fresh = format!("p{}", step);
    match op {
        Op::Create { parent, folder } => {
            let ancestors = folders[parent % folders.len()].clone();
            let kind = if *folder { NodeKind::Folder } else { NodeKind::File };
            Some(ConfigAction::Create {
                config: ConfigForm::new(fresh, kind, "generated")
                    .with_content(if *folder { "" } else { "body" })
                    .under(ancestors),
            })
        }
        Op::Duplicate { source, parent } => {
            if nodes.is_empty() {
                return None;
            }
            let chain = &nodes[source % nodes.len()];
            let original = Walk::new(state.root())
                .find(|e| Some(&e.node.id) == chain.last())?
                .node;
            let ancestors = folders[parent % folders.len()].clone();
            Some(ConfigAction::Duplicate {
                config: ConfigForm::new(fresh, original.kind, original.name.clone())
                    .with_content(original.content.clone())
                    .under(ancestors),
            })
        }
        Op::Update { target, content } => {
            if nodes.is_empty() {
                return None;
            }
            let chain = &nodes[target % nodes.len()];
            let (id, ancestors) = chain.split_last()?;
            Some(ConfigAction::Update {
                config: ConfigForm::new(id.clone(), NodeKind::File, "updated")
                    .with_content(content.clone())
                    .under(ancestors.to_vec()),
            })
        }
        Op::Delete { target } => {
            if nodes.is_empty() {
                return None;
            }
            let chain = &nodes[target % nodes.len()];
            let (id, ancestors) = chain.split_last()?;
            Some(ConfigAction::Delete {
                config: ConfigForm::target(id.clone()).under(ancestors.to_vec()),
            })
        }
        Op::SetChain { ids } => Some(ConfigAction::SetCurrentChain {
            id_chain: ids.iter().map(|i| i.to_string()).collect(),
        }),
    }
}

fn check_step(before: &ConfigTreeState, action: &ConfigAction, after: &ConfigTreeState) {
    assert!(root_is_intact(after));

    let form = match action {
        ConfigAction::SetCurrentChain { id_chain } => {
            assert!(Arc::ptr_eq(before.root(), after.root()));
            assert_eq!(after.current_id_chain(), id_chain.as_slice());
            return;
        }
        other => other.form().unwrap(),
    };
    assert_eq!(before.current_id_chain(), after.current_id_chain());

    let segments: Vec<&str> = form
        .ancestor_ids
        .iter()
        .map(String::as_str)
        .filter(|id| *id != "0")
        .collect();
    assert_shared_off_path(before.root(), after.root(), &segments, &form.id);

    match action {
        ConfigAction::Delete { .. } => {
            let removed = before.node_at(&form.ancestor_ids, &form.id).unwrap();
            for id in subtree_ids(removed) {
                assert!(!after.contains(&id), "{} still reachable after delete", id);
            }
        }
        _ => {
            let node = after.node_at(&form.ancestor_ids, &form.id).unwrap();
            assert_eq!(node.as_ref(), &form.to_node());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_over_operation_sequences(ops in prop::collection::vec(op_strategy(), 1..24)) {
        let mut state = ConfigTreeState::default();
        for (step, op) in ops.iter().enumerate() {
            let Some(action) = concretize(&state, op, step) else {
                continue;
            };
            let next = state
                .try_reduce(&action)
                .unwrap_or_else(|err| panic!("{:?} rejected: {}", action, err));
            check_step(&state, &action, &next);
            prop_assert_eq!(next.clone(), state.reduce(&action));
            state = next;
        }
        prop_assert!(root_is_intact(&state));
    }

    #[test]
    fn unresolvable_parent_never_changes_tree(missing in "[a-z]{3,8}", id in "[a-z]{3,8}") {
        let state = ConfigTreeState::default();
        let action = ConfigAction::Create {
            config: ConfigForm::new(id, NodeKind::File, "x").under(vec!["1".to_string(), missing]),
        };
        let next = state.reduce(&action);
        prop_assert!(Arc::ptr_eq(state.root(), next.root()));
        prop_assert!(state.try_reduce(&action).is_err());
    }
}

#[test]
fn created_nodes_round_trip_through_their_path() {
    let mut state = ConfigTreeState::default();
    let forms = vec![
        ConfigForm::new("a", NodeKind::Folder, "a").under(["9", "13"]),
        ConfigForm::new("b", NodeKind::File, "b.yaml").with_content("k: v").under(["9", "13", "a"]),
        ConfigForm::new("c", NodeKind::File, "c").under(Vec::<String>::new()),
    ];
    for form in &forms {
        state = state.create(form);
        let node = state.node_at(&form.ancestor_ids, &form.id).unwrap();
        assert_eq!(node.as_ref(), &form.to_node());
    }
    for form in &forms {
        let node = state.node_at(&form.ancestor_ids, &form.id).unwrap();
        assert_eq!(
            (&node.id, node.kind, &node.name, &node.content),
            (&form.id, form.kind, &form.name, &form.content)
        );
        let mut chain = vec!["0".to_string()];
        chain.extend(form.ancestor_ids.iter().cloned());
        chain.push(form.id.clone());
        assert_eq!(state.find_chain(&form.id).unwrap(), chain);
    }
    let folder = state.node_at(&["9", "13"], "a").unwrap();
    assert!(folder.children.contains("b"));
}
