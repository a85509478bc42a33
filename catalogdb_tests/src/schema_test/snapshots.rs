use super::*;

#[test]
fn old_snapshots_are_frozen() {
    let v1 = schema(BASE);
    let v2 = apply(&v1, "CREATE INDEX Idx ON T(c1)").unwrap();
    let v3 = apply(&v2, "DROP INDEX Idx").unwrap();

    assert_eq!((v1.version(), v2.version(), v3.version()), (1, 2, 3));
    assert!(v1.find_index("Idx").is_none());
    assert!(v2.find_index("Idx").is_some());
    assert!(v3.find_index("Idx").is_none());
    assert_eq!(table(&v2, "T").indexes().len(), 1);
    assert!(table(&v1, "T").indexes().is_empty());
}

#[test]
fn untouched_nodes_are_shared() {
    let v1 = schema(BASE);
    let v2 = apply(&v1, "CREATE INDEX Idx ON T(c1)").unwrap();
    let id = table(&v1, "T").id();
    let old = v1.graph().get_shared(id).unwrap();
    let new = v2.graph().get_shared(id).unwrap();
    assert!(std::sync::Arc::ptr_eq(old, new));
}

#[test]
fn failed_statement_returns_error_and_keeps_input() {
    let v1 = schema(BASE);
    let before = v1.node_count();
    assert!(apply(&v1, "CREATE INDEX Idx ON T(c1) STORING (c1)").is_err());
    assert_eq!(v1.node_count(), before);
    assert_eq!(v1.version(), 1);
    assert!(v1.graph().check_integrity().is_ok());
}

#[test]
fn snapshots_can_move_across_threads() {
    let v1 = schema(&format!("{BASE}; CREATE INDEX Idx ON T(c1)"));
    let handle = std::thread::spawn(move || v1.find_index("Idx").map(|i| i.name().to_string()));
    assert_eq!(handle.join().unwrap(), Some("Idx".to_string()));
}

#[test]
fn describe_lists_tables_and_indexes() -> anyhow::Result<()> {
    let s = schema(&format!(
        "{BASE}; CREATE NULL_FILTERED INDEX Idx ON T(c1 DESC) STORING (c2)"
    ));
    let json: serde_json::Value = serde_json::from_str(&s.to_json()?)?;

    assert_eq!(json["dialect"], "googlesql");
    assert_eq!(json["version"], 2);
    assert_eq!(json["tables"][0]["name"], "T");
    assert_eq!(json["tables"][0]["columns"][1]["type"], "STRING(10)");
    assert_eq!(json["tables"][0]["columns"][0]["nullable"], false);

    let idx = &json["indexes"][0];
    assert_eq!(idx["name"], "Idx");
    assert_eq!(idx["table"], "T");
    assert_eq!(idx["null_filtered"], true);
    assert_eq!(idx["key_columns"][0]["direction"], "desc");
    assert_eq!(idx["key_columns"][0]["nulls"], "nulls_last");
    assert_eq!(idx["stored_columns"][0], "c2");
    assert_eq!(idx["data_table"]["name"], "_index_data_table_Idx");
    assert_eq!(idx["data_table"]["primary_key"][1]["column"], "k1");
    Ok(())
}
