//! Checks the SQL migration against the relation catalog
//!
//! The PostgreSQL store maps constraint names back to catalog entries, and
//! the in-memory store enforces the catalog directly, so both must agree
//! with the DDL line for line.

use retrogo_store::domain::schema::{OnDelete, RELATIONS, UNIQUE_CONSTRAINTS};

const MIGRATION: &str = include_str!("../migrations/20240101000000_create_store_schema.sql");

/// Statements that create or alter `table`, comments stripped
fn statements_for(table: &str) -> Vec<String> {
    let sql = MIGRATION
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    sql.split(';')
        .map(String::from)
        .filter(|statement| {
            let head = statement.trim_start();
            head.starts_with(&format!("CREATE TABLE {table} ("))
                || head.starts_with(&format!("ALTER TABLE {table}\n"))
        })
        .collect()
}

/// The line declaring `column` in `table`
fn column_line(table: &str, column: &str) -> Option<String> {
    let declaration = format!("{column} UUID");
    statements_for(table)
        .iter()
        .flat_map(|statement| statement.lines())
        .map(str::trim)
        .find(|line| {
            line.starts_with(&declaration) || line.starts_with(&format!("ADD COLUMN {declaration}"))
        })
        .map(String::from)
}

#[test]
fn every_table_is_created() {
    for relation in RELATIONS.iter() {
        for table in [relation.child.table(), relation.parent.table()] {
            assert!(
                MIGRATION.contains(&format!("CREATE TABLE {table} (")),
                "missing table {table}"
            );
        }
    }
}

#[test]
fn foreign_keys_match_catalog() {
    for relation in RELATIONS.iter() {
        let table = relation.child.table();
        let line = column_line(table, relation.column)
            .unwrap_or_else(|| panic!("{table}.{} not declared", relation.column));

        let reference = format!(
            "CONSTRAINT {} REFERENCES {} (id) ON DELETE {}",
            relation.constraint,
            relation.parent.table(),
            relation.on_delete.sql()
        );
        assert!(line.contains(&reference), "{}: expected `{reference}` in `{line}`", relation.name);

        assert_eq!(
            !line.contains("NOT NULL"),
            relation.nullable,
            "{}: nullability differs from catalog",
            relation.name
        );
    }
}

#[test]
fn set_null_relations_are_nullable() {
    for relation in RELATIONS.iter().filter(|r| r.on_delete == OnDelete::SetNull) {
        assert!(relation.nullable, "{} clears a non-null column", relation.name);
    }
}

#[test]
fn unique_constraints_are_declared() {
    for unique in UNIQUE_CONSTRAINTS.iter() {
        let declared = statements_for(unique.entity.table())
            .iter()
            .any(|statement| statement.contains(&format!("CONSTRAINT {} UNIQUE", unique.constraint)));
        assert!(declared, "missing unique constraint {}", unique.constraint);
    }
}

#[test]
fn foreign_key_count_matches_catalog() {
    assert_eq!(MIGRATION.matches(" REFERENCES ").count(), RELATIONS.len());
}
