use super::*;
use catalogdb_core::parser::command::{CreateIndex, DdlStatement, DropIndex, KeyPartDef};
use catalogdb_core::{NullOrdering, SortDirection};

const PG_BASE: &str = "CREATE TABLE t (k1 bigint PRIMARY KEY, c1 varchar(10), c2 text NOT NULL)";

fn orderings(s: &Schema, index_name: &str) -> Vec<(SortDirection, NullOrdering)> {
    index(s, index_name)
        .index_data_table()
        .unwrap()
        .primary_key()
        .iter()
        .map(|k| (k.ordering().direction, k.ordering().nulls))
        .collect()
}

#[test]
fn googlesql_defaults() {
    let s = schema(&format!(
        "{BASE}; CREATE INDEX A ON T(c1); CREATE INDEX B ON T(c1 ASC); CREATE INDEX C ON T(c1 DESC)"
    ));
    use NullOrdering::*;
    use SortDirection::*;
    assert_eq!(orderings(&s, "A")[0], (Asc, NullsFirst));
    assert_eq!(orderings(&s, "B")[0], (Asc, NullsFirst));
    assert_eq!(orderings(&s, "C")[0], (Desc, NullsLast));
}

#[test]
fn postgresql_defaults_and_overrides() {
    let s = schema_in(
        Dialect::PostgreSql,
        &format!(
            "{PG_BASE};
             CREATE INDEX a ON t (c1);
             CREATE INDEX b ON t (c1 ASC);
             CREATE INDEX c ON t (c1 DESC);
             CREATE INDEX d ON t (c1 ASC NULLS FIRST);
             CREATE INDEX e ON t (c1 DESC NULLS FIRST)"
        ),
    );
    use NullOrdering::*;
    use SortDirection::*;
    assert_eq!(orderings(&s, "a")[0], (Asc, NullsLast));
    assert_eq!(orderings(&s, "b")[0], (Asc, NullsLast));
    assert_eq!(orderings(&s, "c")[0], (Desc, NullsLast));
    assert_eq!(orderings(&s, "d")[0], (Asc, NullsFirst));
    assert_eq!(orderings(&s, "e")[0], (Desc, NullsFirst));
    // inherited table key
    assert_eq!(orderings(&s, "a")[1], (Asc, NullsLast));
}

#[test]
fn postgresql_primary_key_is_not_null() {
    let s = schema_in(Dialect::PostgreSql, PG_BASE);
    let t = table(&s, "t");
    assert!(!t.find_column("k1").unwrap().is_nullable());
    assert!(t.find_column("c1").unwrap().is_nullable());
    assert!(!t.find_column("c2").unwrap().is_nullable());
}

#[test]
fn postgresql_index_with_include() {
    let s = schema_in(
        Dialect::PostgreSql,
        &format!("{PG_BASE}; CREATE UNIQUE INDEX i ON t (c1) INCLUDE (c2)"),
    );
    let idx = index(&s, "i");
    assert!(idx.is_unique());
    assert!(!idx.is_null_filtered());
    let data = idx.index_data_table().unwrap();
    assert_eq!(column_names(&data), vec!["c1", "k1", "c2"]);
    assert!(!data.find_column("k1").unwrap().is_nullable());
}

#[test]
fn updater_rejects_existence_modifiers_in_postgresql() {
    let s = schema_in(Dialect::PostgreSql, PG_BASE);
    let create = DdlStatement::CreateIndex(CreateIndex {
        name: "i".to_string(),
        table: "t".to_string(),
        key_parts: vec![KeyPartDef::desc("c1")],
        stored_columns: vec![],
        unique: false,
        null_filtered: false,
        interleave_in: None,
        if_not_exists: true,
    });
    assert_eq!(
        update_schema(&s, &[create]).unwrap_err(),
        SchemaError::IfExistsNotSupported(Dialect::PostgreSql)
    );

    let drop = DdlStatement::DropIndex(DropIndex {
        name: "i".to_string(),
        if_exists: true,
    });
    assert_eq!(
        update_schema(&s, &[drop]).unwrap_err(),
        SchemaError::IfExistsNotSupported(Dialect::PostgreSql)
    );
}

#[test]
fn structured_statements_bypass_the_parser() {
    let s = schema(BASE);
    let create = DdlStatement::CreateIndex(CreateIndex {
        name: "Idx".to_string(),
        table: "T".to_string(),
        key_parts: vec![KeyPartDef::asc("c2"), KeyPartDef::desc("c1")],
        stored_columns: vec!["c3".to_string()],
        unique: true,
        null_filtered: false,
        interleave_in: None,
        if_not_exists: false,
    });
    let next = update_schema(&s, &[create]).unwrap();
    let data = index(&next, "Idx").index_data_table().unwrap();
    assert_eq!(key_names(&data), vec!["c2", "c1", "k1"]);
    assert!(data.primary_key()[1].is_descending());
}
