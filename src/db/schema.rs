//! Table definitions and DDL generation.
//!
//! Foreign keys are always named `fk_<table>_<column>_<referenced_table>`.
//! The DDL is generated from these definitions so no constraint can be
//! created under another name.

/// A foreign key from `column` to `references.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: &'static str,
}

/// A table: its columns (name, SQL type) and outgoing foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [(&'static str, &'static str)],
    pub foreign_keys: &'static [ForeignKey],
}

pub const CUSTOMERS: Table = Table {
    name: "customers",
    columns: &[("id", "INTEGER PRIMARY KEY"), ("name", "TEXT")],
    foreign_keys: &[],
};

pub const ITEMS: Table = Table {
    name: "items",
    columns: &[("id", "INTEGER PRIMARY KEY"), ("name", "TEXT"), ("price", "REAL")],
    foreign_keys: &[],
};

pub const REVIEWS: Table = Table {
    name: "reviews",
    columns: &[
        ("id", "INTEGER PRIMARY KEY"),
        ("comment", "TEXT"),
        ("customer_id", "INTEGER"),
        ("item_id", "INTEGER"),
    ],
    foreign_keys: &[
        ForeignKey {
            column: "customer_id",
            references: CUSTOMERS.name,
        },
        ForeignKey {
            column: "item_id",
            references: ITEMS.name,
        },
    ],
};

/// All tables in creation order (referenced tables first).
pub const TABLES: [Table; 3] = [CUSTOMERS, ITEMS, REVIEWS];

/// Constraint name for a foreign key: `fk_<table>_<column>_<referenced_table>`.
pub fn foreign_key_name(table: &str, column: &str, referenced_table: &str) -> String {
    format!("fk_{}_{}_{}", table, column, referenced_table)
}

impl Table {
    /// `CREATE TABLE IF NOT EXISTS` statement with named foreign keys.
    ///
    /// No `ON DELETE` action is declared, so SQLite's default applies.
    pub fn create_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|(name, ty)| format!("    {} {}", name, ty))
            .collect();

        for fk in self.foreign_keys {
            parts.push(format!(
                "    CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} (id)",
                foreign_key_name(self.name, fk.column, fk.references),
                fk.column,
                fk.references
            ));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            self.name,
            parts.join(",\n")
        )
    }

    /// One index per foreign-key column, used by the relationship loads.
    pub fn index_sql(&self) -> Vec<String> {
        self.foreign_keys
            .iter()
            .map(|fk| {
                format!(
                    "CREATE INDEX IF NOT EXISTS ix_{table}_{column} ON {table} ({column})",
                    table = self.name,
                    column = fk.column
                )
            })
            .collect()
    }
}
