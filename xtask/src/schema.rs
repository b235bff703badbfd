// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schema introspection and parity comparison for the two migration sets.
//!
//! Both backends are reduced to a [`Schema`] with normalized column types so
//! that `SQLite` and `MySQL` spellings of the same table compare equal.
//!
//! Two differences are expected and tolerated:
//!
//! - `InnoDB` creates a single-column index for every foreign key column that
//!   no other index covers. Such indexes may appear on the `MySQL` side only.
//! - `SQLite` enforces "one current schedule entry per game" with a partial
//!   unique index. `MySQL` has no partial indexes; the persistence layer
//!   locks the game row instead. Partial indexes are therefore reported but
//!   not compared.

use std::collections::{BTreeMap, BTreeSet};

use color_eyre::{Result, eyre::Context, eyre::eyre};
use diesel::sql_types::{Integer, Text};
use diesel::{MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<Vec<String>>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Column {
    normalized_type: &'static str,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
    partial: bool,
}

/// Reads the schema of a migrated `SQLite` database.
///
/// # Errors
///
/// Fails if any catalog query fails.
pub fn introspect_sqlite(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
        #[diesel(sql_type = Integer)]
        partial: i32,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
           AND name != '__diesel_schema_migrations' \
         ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    let mut schema = Schema::default();
    for TableName { name: table_name } in tables {
        let mut table = Table::default();

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({table_name})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get columns for table {table_name}"))?;
        for col in columns {
            if col.pk > 0 {
                table.primary_keys.insert(col.name.clone());
            }
            table.columns.insert(
                col.name,
                Column {
                    normalized_type: normalize_sqlite_type(&col.r#type),
                    nullable: col.notnull == 0,
                },
            );
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({table_name})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get foreign keys for table {table_name}"))?;
        table
            .foreign_keys
            .extend(fks.into_iter().map(|fk| ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            }));

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({table_name})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get indexes for table {table_name}"))?;
        for idx in indexes {
            // Primary key indexes are already covered by `primary_keys`.
            if idx.origin == "pk" {
                continue;
            }

            let columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err_with(|| format!("Failed to get index columns for {}", idx.name))?;
            let columns: Vec<String> = columns.into_iter().map(|c| c.name).collect();

            if idx.origin == "u" {
                table.unique_constraints.insert(columns);
            } else {
                table.indexes.insert(Index {
                    name: idx.name,
                    columns,
                    partial: idx.partial != 0,
                });
            }
        }

        schema.tables.insert(table_name, table);
    }

    Ok(schema)
}

/// Reads the schema of a migrated `MySQL` database.
///
/// # Errors
///
/// Fails if any `information_schema` query fails.
pub fn introspect_mysql(conn: &mut MysqlConnection, database: &str) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        table_name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        data_type: String,
        #[diesel(sql_type = Text)]
        is_nullable: String,
        #[diesel(sql_type = Text)]
        column_key: String,
    }

    #[derive(QueryableByName)]
    #[allow(clippy::struct_field_names)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        referenced_table_name: String,
        #[diesel(sql_type = Text)]
        referenced_column_name: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumn {
        #[diesel(sql_type = Text)]
        index_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Integer)]
        non_unique: i32,
    }

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT table_name FROM information_schema.tables \
         WHERE table_schema = ? AND table_name != '__diesel_schema_migrations' \
         ORDER BY table_name",
    )
    .bind::<Text, _>(database)
    .load(conn)
    .wrap_err("Failed to query MySQL tables")?;

    let mut schema = Schema::default();
    for TableName { table_name } in tables {
        let mut table = Table::default();

        let columns: Vec<ColumnInfo> = diesel::sql_query(
            "SELECT column_name, data_type, is_nullable, column_key \
             FROM information_schema.columns \
             WHERE table_schema = ? AND table_name = ? \
             ORDER BY ordinal_position",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get columns for table {table_name}"))?;
        for col in columns {
            if col.column_key == "PRI" {
                table.primary_keys.insert(col.column_name.clone());
            }
            table.columns.insert(
                col.column_name,
                Column {
                    normalized_type: normalize_mysql_type(&col.data_type),
                    nullable: col.is_nullable == "YES",
                },
            );
        }

        let fks: Vec<ForeignKeyInfo> = diesel::sql_query(
            "SELECT column_name, referenced_table_name, referenced_column_name \
             FROM information_schema.key_column_usage \
             WHERE table_schema = ? AND table_name = ? AND referenced_table_name IS NOT NULL \
             ORDER BY column_name",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get foreign keys for table {table_name}"))?;
        table
            .foreign_keys
            .extend(fks.into_iter().map(|fk| ForeignKey {
                from_column: fk.column_name,
                to_table: fk.referenced_table_name,
                to_column: fk.referenced_column_name,
            }));

        // Unique constraints and plain indexes both live in `statistics`;
        // `non_unique` tells them apart.
        let index_columns: Vec<IndexColumn> = diesel::sql_query(
            "SELECT index_name, column_name, non_unique FROM information_schema.statistics \
             WHERE table_schema = ? AND table_name = ? AND index_name != 'PRIMARY' \
             ORDER BY index_name, seq_in_index",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get indexes for table {table_name}"))?;

        let mut grouped: BTreeMap<String, (bool, Vec<String>)> = BTreeMap::new();
        for col in index_columns {
            grouped
                .entry(col.index_name)
                .or_insert_with(|| (col.non_unique == 0, Vec::new()))
                .1
                .push(col.column_name);
        }
        for (name, (unique, columns)) in grouped {
            if unique {
                table.unique_constraints.insert(columns);
            } else {
                table.indexes.insert(Index {
                    name,
                    columns,
                    partial: false,
                });
            }
        }

        schema.tables.insert(table_name, table);
    }

    Ok(schema)
}

fn normalize_sqlite_type(sqlite_type: &str) -> &'static str {
    let upper = sqlite_type.to_uppercase();
    if upper.contains("INT") {
        "integer"
    } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
        "real"
    } else if upper.contains("BLOB") {
        "blob"
    } else {
        "text"
    }
}

fn normalize_mysql_type(mysql_type: &str) -> &'static str {
    match mysql_type.to_uppercase().as_str() {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => "integer",
        "DECIMAL" | "NUMERIC" | "FLOAT" | "DOUBLE" | "REAL" => "real",
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => "blob",
        _ => "text",
    }
}

/// Compares the two schemas and reports every mismatch at once.
///
/// # Errors
///
/// Fails with the full list of differences when the schemas diverge.
pub fn compare(sqlite: &Schema, mysql: &Schema) -> Result<()> {
    let mut problems = Vec::new();

    for name in sqlite.tables.keys() {
        if !mysql.tables.contains_key(name) {
            problems.push(format!("table '{name}' exists in SQLite but not in MySQL"));
        }
    }
    for name in mysql.tables.keys() {
        if !sqlite.tables.contains_key(name) {
            problems.push(format!("table '{name}' exists in MySQL but not in SQLite"));
        }
    }

    for (name, sqlite_table) in &sqlite.tables {
        if let Some(mysql_table) = mysql.tables.get(name) {
            compare_table(name, sqlite_table, mysql_table, &mut problems);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(eyre!(
            "Schema parity check FAILED ({} problem(s)):\n  - {}",
            problems.len(),
            problems.join("\n  - ")
        ))
    }
}

fn compare_table(name: &str, sqlite: &Table, mysql: &Table, problems: &mut Vec<String>) {
    for (col_name, sqlite_col) in &sqlite.columns {
        match mysql.columns.get(col_name) {
            None => problems.push(format!(
                "{name}.{col_name} exists in SQLite but not in MySQL"
            )),
            Some(mysql_col) if mysql_col != sqlite_col => problems.push(format!(
                "{name}.{col_name} differs: SQLite {sqlite_col:?}, MySQL {mysql_col:?}"
            )),
            Some(_) => {}
        }
    }
    for col_name in mysql.columns.keys() {
        if !sqlite.columns.contains_key(col_name) {
            problems.push(format!(
                "{name}.{col_name} exists in MySQL but not in SQLite"
            ));
        }
    }

    if sqlite.primary_keys != mysql.primary_keys {
        problems.push(format!(
            "{name}: primary key differs: SQLite {:?}, MySQL {:?}",
            sqlite.primary_keys, mysql.primary_keys
        ));
    }
    if sqlite.foreign_keys != mysql.foreign_keys {
        problems.push(format!(
            "{name}: foreign keys differ: SQLite {:?}, MySQL {:?}",
            sqlite.foreign_keys, mysql.foreign_keys
        ));
    }
    if sqlite.unique_constraints != mysql.unique_constraints {
        problems.push(format!(
            "{name}: unique constraints differ: SQLite {:?}, MySQL {:?}",
            sqlite.unique_constraints, mysql.unique_constraints
        ));
    }

    // Index names are backend-specific; compare by column list.
    let mut sqlite_indexes = BTreeSet::new();
    for index in &sqlite.indexes {
        if index.partial {
            tracing::info!(
                table = name,
                index = %index.name,
                "Skipping SQLite partial index (enforced by row locking on MySQL)"
            );
        } else {
            sqlite_indexes.insert(&index.columns);
        }
    }
    let mysql_indexes: BTreeSet<_> = mysql.indexes.iter().map(|i| &i.columns).collect();

    for columns in sqlite_indexes.difference(&mysql_indexes) {
        problems.push(format!("{name}: index on {columns:?} missing in MySQL"));
    }

    let fk_columns: BTreeSet<&String> = mysql.foreign_keys.iter().map(|fk| &fk.from_column).collect();
    for columns in mysql_indexes.difference(&sqlite_indexes) {
        let implicit_fk_index = matches!(columns.as_slice(), [only] if fk_columns.contains(only));
        if !implicit_fk_index {
            problems.push(format!("{name}: unexpected MySQL-only index on {columns:?}"));
        }
    }
}
