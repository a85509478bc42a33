use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use catalogdb_core::parser::parse;
use catalogdb_core::{Catalog, Dialect};
use clap::Parser;
use tracing::{debug, info};

/// Interactive DDL shell over an in-memory catalog.
#[derive(Parser, Debug)]
#[command(name = "catalogdb_cli")]
#[command(version)]
#[command(about = "Apply CREATE/DROP statements to a versioned schema catalog")]
struct Args {
    /// SQL dialect used to parse statements (googlesql or postgresql)
    #[arg(
        long,
        env = "CATALOGDB_DIALECT",
        default_value = "googlesql",
        value_name = "DIALECT"
    )]
    dialect: Dialect,
}

fn print_help() {
    println!("Commands:");
    println!("  <ddl>[; <ddl>...]  -> apply DDL statements");
    println!("  parse <ddl>        -> show parsed statement (debug)");
    println!("  .schema            -> print the current schema as JSON");
    println!("  .tables            -> list tables and their indexes");
    println!("  .version           -> show the current schema version");
    println!("  exit|quit          -> quit");
    println!("  help               -> help");
}

fn print_tables(catalog: &Catalog) {
    let schema = catalog.schema();
    let tables = schema.tables();
    if tables.is_empty() {
        println!("(no tables)");
        return;
    }
    for table in tables {
        let columns: Vec<String> = table
            .columns()
            .iter()
            .map(|c| format!("{} {}", c.name(), c.data_type()))
            .collect();
        println!("{} ({})", table.name(), columns.join(", "));
        for index in table.indexes() {
            println!("  index {}", index.name());
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init()
        .ok();

    let dialect = Args::parse().dialect;
    let mut catalog = Catalog::new(dialect);
    info!(%dialect, "catalog ready");

    println!("catalogdb_cli [{dialect}] (type 'help' or 'exit')");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("ddl> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        if input.eq_ignore_ascii_case("help") {
            print_help();
            continue;
        }

        match input {
            ".schema" => {
                println!("{}", catalog.schema().to_json()?);
                continue;
            }
            ".tables" => {
                print_tables(&catalog);
                continue;
            }
            ".version" => {
                println!("{}", catalog.schema().version());
                continue;
            }
            _ => {}
        }

        if let Some(rest) = input.strip_prefix("parse ") {
            match parse(rest, dialect) {
                Ok(stmt) => println!("Parsed as: {stmt:#?}"),
                Err(e) => eprintln!("Parse error: {e}"),
            }
            continue;
        }

        debug!(input, "executing");
        match catalog.execute(input) {
            Ok(out) => println!("{out}"),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}
