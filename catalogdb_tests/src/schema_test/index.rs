use super::*;
use catalogdb_core::schema::INDEX_DATA_TABLE_PREFIX;
use catalogdb_core::types::{DataType, Length, ScalarType};

#[test]
fn basic_index_derives_data_table() {
    let s = schema(&format!("{BASE}; CREATE INDEX Idx1 ON T(c1)"));
    let idx = index(&s, "Idx1");
    let t = table(&s, "T");

    assert_eq!(idx.indexed_table().unwrap(), t);
    assert_eq!(idx.key_columns().len(), 1);
    assert!(idx.stored_columns().is_empty());
    assert!(!idx.is_unique());
    assert!(!idx.is_null_filtered());
    assert!(idx.parent().is_none());

    let data = idx.index_data_table().unwrap();
    assert_eq!(data.name(), format!("{INDEX_DATA_TABLE_PREFIX}Idx1"));
    assert!(data.is_index_data_table());
    assert_eq!(data.owner_index().unwrap(), idx);
    assert_eq!(key_names(&data), vec!["c1", "k1"]);
    assert_eq!(column_names(&data), vec!["c1", "k1"]);

    let c1 = data.find_column("c1").unwrap();
    assert!(c1.is_nullable());
    assert_eq!(c1.data_type(), DataType::Scalar(ScalarType::String(Length::Limit(10))));
    assert_eq!(c1.source_column().unwrap(), t.find_column("c1").unwrap());
    assert_eq!(c1.table().unwrap(), data);

    let k1 = data.find_column("k1").unwrap();
    assert!(!k1.is_nullable());
    assert_eq!(k1.source_column().unwrap(), t.find_column("k1").unwrap());
}

#[test]
fn index_key_columns_are_leading_data_table_keys() {
    let s = schema(&format!("{BASE}; CREATE INDEX Idx ON T(c2, c1)"));
    let idx = index(&s, "Idx");
    let data = idx.index_data_table().unwrap();
    let data_key = data.primary_key();

    let keys = idx.key_columns();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0], data_key[0]);
    assert_eq!(keys[1], data_key[1]);
    assert_eq!(keys[0].column().unwrap(), data.find_column("c2").unwrap());
    assert_eq!(key_names(&data), vec!["c2", "c1", "k1"]);
}

#[test]
fn table_key_columns_are_not_repeated() {
    let s = schema(
        "CREATE TABLE T (k1 INT64, k2 INT64, k3 INT64, c1 BOOL) PRIMARY KEY (k1, k2, k3);
         CREATE INDEX Idx ON T(k2, c1)",
    );
    let data = index(&s, "Idx").index_data_table().unwrap();
    assert_eq!(key_names(&data), vec!["k2", "c1", "k1", "k3"]);
    assert_eq!(column_names(&data), vec!["k2", "c1", "k1", "k3"]);
}

#[test]
fn node_counts_follow_ownership() {
    let s = schema("CREATE TABLE T (k1 INT64, c1 INT64) PRIMARY KEY (k1)");
    assert_eq!(s.node_count(), 4);

    let with_index = apply(&s, "CREATE INDEX Idx ON T(c1 DESC, k1 DESC)").unwrap();
    assert_eq!(with_index.node_count(), 10);

    let data = index(&with_index, "Idx").index_data_table().unwrap();
    for key in data.primary_key() {
        assert!(key.is_descending());
        assert!(key.is_nulls_last());
    }

    let dropped = apply(&with_index, "DROP INDEX Idx").unwrap();
    assert_eq!(dropped.node_count(), 4);
    assert!(dropped.find_index("Idx").is_none());
    assert!(table(&dropped, "T").indexes().is_empty());
}

#[test]
fn inherited_key_keeps_table_ordering() {
    let s = schema(
        "CREATE TABLE T (k1 INT64, c1 INT64) PRIMARY KEY (k1 DESC);
         CREATE INDEX Idx ON T(c1)",
    );
    let data = index(&s, "Idx").index_data_table().unwrap();
    let key = data.primary_key();
    assert!(!key[0].is_descending());
    assert!(!key[0].is_nulls_last());
    assert!(key[1].is_descending());
    assert!(key[1].is_nulls_last());
}

#[test]
fn null_filtered_forces_only_explicit_keys() {
    let s = schema(&format!(
        "{BASE}; CREATE UNIQUE NULL_FILTERED INDEX Idx ON T(c1) STORING (c2, c3)"
    ));
    let idx = index(&s, "Idx");
    assert!(idx.is_unique());
    assert!(idx.is_null_filtered());

    let data = idx.index_data_table().unwrap();
    assert_eq!(column_names(&data), vec!["c1", "k1", "c2", "c3"]);
    assert!(!data.find_column("c1").unwrap().is_nullable());
    assert!(!data.find_column("k1").unwrap().is_nullable());
    assert!(data.find_column("c2").unwrap().is_nullable());
    assert!(!data.find_column("c3").unwrap().is_nullable());

    let stored: Vec<&str> = idx.stored_columns().iter().map(|c| c.name()).collect();
    assert_eq!(stored, vec!["c2", "c3"]);
    assert_eq!(
        idx.stored_columns()[0].source_column().unwrap(),
        table(&s, "T").find_column("c2").unwrap()
    );
}

#[test]
fn null_filtered_leaves_nullable_inherited_keys_alone() {
    let s = schema(
        "CREATE TABLE T (k1 INT64, c1 INT64) PRIMARY KEY (k1);
         CREATE NULL_FILTERED INDEX Idx ON T(c1)",
    );
    let data = index(&s, "Idx").index_data_table().unwrap();
    assert!(!data.find_column("c1").unwrap().is_nullable());
    assert!(data.find_column("k1").unwrap().is_nullable());
}

#[test]
fn index_without_keys_is_rejected() {
    let s = schema(BASE);
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T()"),
        SchemaError::IndexWithNoKeys("Idx".to_string())
    );
}

#[test]
fn missing_stored_column_is_reported_before_empty_keys() {
    let s = schema(BASE);
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T() STORING (nope)"),
        SchemaError::IndexRefsNonExistentColumn {
            index: "Idx".to_string(),
            column: "nope".to_string()
        }
    );
}

#[test]
fn array_key_column_is_rejected() {
    let s = schema(
        "CREATE TABLE T (k1 INT64, a ARRAY<INT64>) PRIMARY KEY (k1)",
    );
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(a)"),
        SchemaError::CannotCreateIndexOnColumn {
            index: "Idx".to_string(),
            column: "a".to_string(),
            type_name: "ARRAY".to_string()
        }
    );
}

#[test]
fn json_key_column_is_rejected() {
    let s = schema("CREATE TABLE T (k1 INT64, j JSON) PRIMARY KEY (k1)");
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(j)"),
        SchemaError::CannotCreateIndexOnColumn {
            index: "Idx".to_string(),
            column: "j".to_string(),
            type_name: "JSON".to_string()
        }
    );
}

#[test]
fn array_and_json_columns_can_be_stored() {
    let s = schema(
        "CREATE TABLE T (k1 INT64, c1 INT64, a ARRAY<STRING(MAX)>, j JSON) PRIMARY KEY (k1);
         CREATE INDEX Idx ON T(c1) STORING (a, j)",
    );
    let data = index(&s, "Idx").index_data_table().unwrap();
    assert_eq!(column_names(&data), vec!["c1", "k1", "a", "j"]);
    assert!(data.find_column("a").unwrap().data_type().is_array());
}

#[test]
fn unknown_key_column_is_rejected() {
    let s = schema(BASE);
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(c9)"),
        SchemaError::IndexRefsNonExistentColumn {
            index: "Idx".to_string(),
            column: "c9".to_string()
        }
    );
}

#[test]
fn repeated_key_column_is_rejected() {
    let s = schema(BASE);
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(c1, c1 DESC)"),
        SchemaError::IndexRefsColumnTwice {
            index: "Idx".to_string(),
            column: "c1".to_string()
        }
    );
}

#[test]
fn stored_key_column_is_rejected() {
    let s = schema(BASE);
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(c1) STORING (c1)"),
        SchemaError::IndexRefsKeyAsStoredColumn {
            index: "Idx".to_string(),
            column: "c1".to_string()
        }
    );
}

#[test]
fn repeated_stored_column_is_rejected() {
    let s = schema(BASE);
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(c1) STORING (c2, c2)"),
        SchemaError::IndexRefsColumnTwice {
            index: "Idx".to_string(),
            column: "c2".to_string()
        }
    );
}

#[test]
fn storing_table_key_is_rejected() {
    let s = schema(BASE);
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(c1) STORING (k1)"),
        SchemaError::IndexRefsTableKeyAsStoredColumn {
            index: "Idx".to_string(),
            column: "k1".to_string()
        }
    );
}

#[test]
fn index_on_missing_table_is_rejected() {
    let s = schema(BASE);
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON Nope(c1)"),
        SchemaError::TableNotFound("Nope".to_string())
    );
}

#[test]
fn duplicate_index_name_is_rejected() {
    let s = schema(&format!("{BASE}; CREATE INDEX Idx ON T(c1)"));
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(c2)"),
        SchemaError::SchemaObjectAlreadyExists {
            kind: "Index".to_string(),
            name: "Idx".to_string()
        }
    );
}

#[test]
fn index_name_cannot_shadow_a_table() {
    let s = schema(BASE);
    assert_eq!(
        apply_err(&s, "CREATE INDEX T ON T(c1)"),
        SchemaError::SchemaObjectAlreadyExists {
            kind: "Table".to_string(),
            name: "T".to_string()
        }
    );
}

#[test]
fn if_not_exists_on_existing_index_is_a_no_op() {
    let s = schema(&format!("{BASE}; CREATE INDEX Idx ON T(c1)"));
    let again = apply(&s, "CREATE INDEX IF NOT EXISTS Idx ON T(c2, c3)").unwrap();
    assert_eq!(again.version(), s.version());
    assert_eq!(again.node_count(), s.node_count());
    let data = index(&again, "Idx").index_data_table().unwrap();
    assert_eq!(key_names(&data), vec!["c1", "k1"]);
}

#[test]
fn if_not_exists_creates_a_missing_index() {
    let s = schema(BASE);
    let next = apply(&s, "CREATE INDEX IF NOT EXISTS Idx ON T(c1)").unwrap();
    assert_eq!(next.version(), s.version() + 1);
    assert!(next.find_index("Idx").is_some());
}

#[test]
fn index_on_table_with_empty_key_has_one_column() {
    let s = schema(
        "CREATE TABLE T (c1 INT64) PRIMARY KEY ();
         CREATE INDEX Idx ON T(c1)",
    );
    let data = index(&s, "Idx").index_data_table().unwrap();
    assert_eq!(data.columns().len(), 1);
    assert_eq!(data.primary_key().len(), 1);
}

#[test]
fn table_lists_its_indexes_oldest_first() {
    let s = schema(&format!(
        "{BASE}; CREATE INDEX B ON T(c1); CREATE INDEX A ON T(c2)"
    ));
    let names: Vec<&str> = table(&s, "T").indexes().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["B", "A"]);
    assert_eq!(s.indexes().len(), 2);
}

#[test]
fn data_tables_are_not_listed_as_tables() {
    let s = schema(&format!("{BASE}; CREATE INDEX Idx ON T(c1)"));
    let names: Vec<&str> = s.tables().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["T"]);
    assert!(s
        .find_table(&format!("{INDEX_DATA_TABLE_PREFIX}Idx"))
        .is_none());
}
