//! Idempotent DDL for the users stub, the resource tables and the join tables.
//! Statements are ordered so every foreign key target exists first.

use crate::error::AppError;
use crate::resources::{links::link_tables, tables};
use crate::sql::{quoted, ColumnDef, LinkDef, TableDef};
use sqlx::PgPool;

const USERS_DDL: &str =
    "CREATE TABLE IF NOT EXISTS \"users\" (\n  \"id\" UUID PRIMARY KEY,\n  \"fullname\" TEXT\n)";

fn column_ddl(c: &ColumnDef) -> String {
    let mut def = format!("{} {}", quoted(c.name), c.sql_type.as_sql().to_uppercase());
    if c.name == "id" {
        def.push_str(" PRIMARY KEY");
        return def;
    }
    if !c.nullable {
        def.push_str(" NOT NULL");
    }
    if c.unique {
        def.push_str(" UNIQUE");
    }
    if c.name == "is_active" {
        def.push_str(" DEFAULT TRUE");
    }
    def
}

fn create_table(name: &str, defs: Vec<String>) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(name),
        defs.join(",\n  ")
    )
}

/// Non-unique indexed columns; unique columns are already indexed by their constraint.
fn index_ddl(table: &str, columns: &[ColumnDef]) -> Vec<String> {
    columns
        .iter()
        .filter(|c| c.indexed && !c.unique)
        .map(|c| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                quoted(&format!("ix_{}_{}", table, c.name)),
                quoted(table),
                quoted(c.name)
            )
        })
        .collect()
}

pub fn table_ddl(table: &TableDef) -> Vec<String> {
    let columns = table.columns();
    let mut out = vec![create_table(
        table.table,
        columns.iter().map(column_ddl).collect(),
    )];
    out.extend(index_ddl(table.table, &columns));
    out
}

/// Join table DDL; deleting an owner or item removes its links.
pub fn link_ddl(link: &LinkDef) -> Vec<String> {
    let columns = link.columns();
    let mut defs: Vec<String> = columns.iter().map(column_ddl).collect();
    for (column, target) in [(link.owner_column, link.owner), (link.item_column, link.item)] {
        defs.push(format!(
            "FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE CASCADE",
            quoted(column),
            quoted(target.table),
            quoted("id")
        ));
    }
    let mut out = vec![create_table(link.table, defs)];
    out.extend(index_ddl(link.table, &columns));
    out
}

/// Every statement, in execution order.
pub fn statements() -> Vec<String> {
    let mut out = vec![USERS_DDL.to_string()];
    for table in tables() {
        out.extend(table_ddl(table));
    }
    for link in link_tables() {
        out.extend(link_ddl(link));
    }
    out
}

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let statements = statements();
    for sql in &statements {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!(count = statements.len(), "migrations applied");
    Ok(())
}
