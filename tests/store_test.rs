//! JSON document store tests

use serde_json::{json, Map};
use tempfile::TempDir;

use blocktree::domain::node::{BlockNode, Tree};
use blocktree::infrastructure::traits::{DocumentStore, JsonFileStore};

fn sample_tree() -> Tree {
    vec![
        BlockNode {
            id: "s1".to_string(),
            block_type: "section".to_string(),
            props: json!({ "bg": "#ffffff", "pad": 16 })
                .as_object()
                .cloned()
                .unwrap_or_default(),
            children: Some(vec![BlockNode {
                id: "t1".to_string(),
                block_type: "text".to_string(),
                props: json!({ "as": "p", "value": "hello" })
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
                children: None,
            }]),
        },
        BlockNode {
            id: "r1".to_string(),
            block_type: "row".to_string(),
            props: Map::new(),
            children: Some(vec![]),
        },
    ]
}

#[test]
fn given_saved_document_when_loading_then_tree_is_identical() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.json");
    let store = JsonFileStore::default();
    let tree = sample_tree();

    store.save(&path, &tree).unwrap();
    let loaded = store.load(&path).unwrap();

    assert_eq!(loaded, tree);
}

#[test]
fn given_leaf_node_when_saved_then_children_key_is_omitted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.json");
    let store = JsonFileStore::default();

    store.save(&path, &sample_tree()).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    // leaf "t1" has no children key; empty container "r1" keeps it
    let leaf = &value[0]["children"][0];
    assert_eq!(leaf["id"], "t1");
    assert!(leaf.get("children").is_none());
    assert_eq!(value[1]["children"], json!([]));
}

#[test]
fn given_type_tag_when_serialized_then_field_is_named_type() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.json");
    let store = JsonFileStore::default();

    store.save(&path, &sample_tree()).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();

    assert!(raw.contains("\"type\": \"section\""));
    assert!(!raw.contains("block_type"));
}

#[test]
fn given_compact_store_when_saving_then_single_line_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.json");
    let store = JsonFileStore::new(false);

    store.save(&path, &sample_tree()).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();

    assert_eq!(raw.trim_end().lines().count(), 1);
}

#[test]
fn given_missing_file_when_loading_then_io_error_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    let store = JsonFileStore::default();

    let err = store.load(&path).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn given_malformed_json_when_loading_then_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::default();

    let err = store.load(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn given_empty_document_when_round_tripped_then_stays_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    let store = JsonFileStore::default();

    store.save(&path, &[]).unwrap();
    assert!(store.exists(&path));
    assert_eq!(store.load(&path).unwrap(), Vec::<BlockNode>::new());
}
