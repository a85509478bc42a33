use super::*;
use catalogdb_core::schema::NodeKind;

#[test]
fn table_name_is_case_sensitive() {
    let s = schema(&format!("{BASE}; CREATE INDEX Idx1 ON T(c1)"));
    assert!(s.find_table("t").is_none());
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx2 ON t(c1)"),
        SchemaError::TableNotFound("t".to_string())
    );
    // Table resolution happens before the name clash is noticed.
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx1 ON t(c1)"),
        SchemaError::TableNotFound("t".to_string())
    );
}

#[test]
fn column_name_is_case_sensitive() {
    let s = schema(BASE);
    assert!(table(&s, "T").find_column("C1").is_none());
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(C1)"),
        SchemaError::IndexRefsNonExistentColumn {
            index: "Idx".to_string(),
            column: "C1".to_string()
        }
    );
    assert_eq!(
        apply_err(&s, "CREATE INDEX Idx ON T(c1) STORING (C2)"),
        SchemaError::IndexRefsNonExistentColumn {
            index: "Idx".to_string(),
            column: "C2".to_string()
        }
    );
}

#[test]
fn index_name_is_case_sensitive() {
    let s = schema(&format!("{BASE}; CREATE INDEX Idx1 ON T(c1)"));
    assert!(s.find_index("idx1").is_none());
    assert_eq!(
        apply_err(&s, "DROP INDEX idx1"),
        SchemaError::IndexNotFound("idx1".to_string())
    );
}

#[test]
fn names_differing_in_case_are_distinct_objects() {
    let s = schema(
        "CREATE TABLE T (k INT64) PRIMARY KEY (k);
         CREATE TABLE t (k INT64) PRIMARY KEY (k);
         CREATE INDEX Ix ON T(k);
         CREATE INDEX ix ON t(k)",
    );
    assert_ne!(table(&s, "T"), table(&s, "t"));
    assert_eq!(index(&s, "ix").indexed_table().unwrap(), table(&s, "t"));
}

#[test]
fn case_insensitive_lookup_is_diagnostic_only() {
    let s = schema(BASE);
    assert!(s.find(NodeKind::Table, "t", true).is_none());
    let found = s.find(NodeKind::Table, "t", false).unwrap();
    assert_eq!(found.name(), "T");
    assert!(s.find(NodeKind::Column, "C3", false).is_some());
    assert!(s.find(NodeKind::Column, "C3", true).is_none());
}

#[test]
fn quoted_identifiers_keep_their_case() {
    let s = schema("CREATE TABLE `Mixed` (`Key` INT64) PRIMARY KEY (`Key`)");
    assert!(s.find_table("Mixed").is_some());
    assert!(table(&s, "Mixed").find_column("Key").is_some());
}
