use super::*;

#[test]
fn backtick_identifiers_keep_case_and_spaces() {
    let t = create_table(gsql("CREATE TABLE `My Table` (`Key` INT64) PRIMARY KEY (`Key`)"));
    assert_eq!(t.name, "My Table");
    assert_eq!(t.columns[0].name, "Key");
}

#[test]
fn quoted_keyword_is_an_identifier() {
    let t = create_table(gsql("CREATE TABLE `Table` (`primary` INT64) PRIMARY KEY (`primary`)"));
    assert_eq!(t.name, "Table");
    assert_eq!(t.primary_key, vec![KeyPartDef::new("primary")]);
}

#[test]
fn double_quotes_delimit_postgresql_identifiers() {
    let t = create_table(pg(r#"CREATE TABLE "Users" ("Id" bigint PRIMARY KEY)"#));
    assert_eq!(t.name, "Users");
    assert_eq!(t.primary_key, vec![KeyPartDef::new("Id")]);
}

#[test]
fn backslash_escapes_quote_in_googlesql() {
    let t = create_table(gsql(r"CREATE TABLE `a\`b\\c` (k INT64) PRIMARY KEY (k)"));
    assert_eq!(t.name, r"a`b\c");
}

#[test]
fn unknown_escape_is_rejected_in_googlesql() {
    let err = parse(r"CREATE TABLE `a\nb` (k INT64) PRIMARY KEY (k)", Dialect::GoogleSql).unwrap_err();
    assert!(syntax_error(err).contains("invalid escape"));
}

#[test]
fn doubled_quote_inside_postgresql_identifier() {
    let t = create_table(pg(r#"CREATE TABLE "a""b" (k bigint PRIMARY KEY)"#));
    assert_eq!(t.name, r#"a"b"#);
    let t = create_table(pg(r#"CREATE TABLE """" (k bigint PRIMARY KEY)"#));
    assert_eq!(t.name, r#"""#);
}

#[test]
fn backslash_is_literal_in_postgresql_identifier() {
    let t = create_table(pg(r#"CREATE TABLE "a\nb" (k bigint PRIMARY KEY)"#));
    assert_eq!(t.name, r"a\nb");
}

#[test]
fn empty_postgresql_identifier_is_rejected() {
    let err = parse(r#"DROP TABLE """#, Dialect::PostgreSql).unwrap_err();
    assert!(syntax_error(err).contains("cannot be empty"));
}

#[test]
fn quoted_tokens_are_echoed_with_the_dialect_quote() {
    let err = parse("DROP TABLE T `extra`", Dialect::GoogleSql).unwrap_err();
    assert!(syntax_error(err).contains("unexpected '`extra`' after end of statement"));
    let err = parse(r#"DROP TABLE t "extra""#, Dialect::PostgreSql).unwrap_err();
    assert!(syntax_error(err).contains(r#"unexpected '"extra"' after end of statement"#));
}

#[test]
fn unclosed_quote_is_rejected() {
    let err = parse("DROP TABLE `T", Dialect::GoogleSql).unwrap_err();
    assert!(syntax_error(err).contains("unclosed quote"));
}

#[test]
fn quote_in_middle_of_token_is_rejected() {
    let err = parse("DROP TABLE ab`c`", Dialect::GoogleSql).unwrap_err();
    assert!(syntax_error(err).contains("cannot start in the middle"));
}

#[test]
fn characters_after_closing_quote_are_rejected() {
    let err = parse("DROP TABLE `a`b", Dialect::GoogleSql).unwrap_err();
    assert!(syntax_error(err).contains("immediately after a closing quote"));
}

#[test]
fn line_comments_are_skipped() {
    let stmt = gsql(
        "-- drop the table
         DROP TABLE T -- trailing comment",
    );
    assert_eq!(stmt.object_name(), "T");
}

#[test]
fn stray_characters_are_rejected() {
    let err = parse("DROP TABLE T*", Dialect::GoogleSql).unwrap_err();
    assert!(syntax_error(err).contains("unexpected character"));
}
