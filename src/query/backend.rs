//! SQL dialects a query can be rendered for.

use sea_query::{MysqlQueryBuilder, PostgresQueryBuilder, SelectStatement, SqliteQueryBuilder, Values};
use serde::Deserialize;
use std::fmt;

/// SQL dialect used when rendering a [`SelectQuery`](super::SelectQuery)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// PostgreSQL (`$1` placeholders, double-quoted identifiers)
    #[default]
    Postgres,
    /// MySQL (`?` placeholders, backtick identifiers)
    #[serde(rename = "mysql")]
    MySql,
    /// SQLite (`?` placeholders, double-quoted identifiers)
    Sqlite,
}

impl Backend {
    /// Render a statement with bind parameters.
    pub fn build(self, statement: &SelectStatement) -> (String, Values) {
        match self {
            Backend::Postgres => statement.build(PostgresQueryBuilder),
            Backend::MySql => statement.build(MysqlQueryBuilder),
            Backend::Sqlite => statement.build(SqliteQueryBuilder),
        }
    }

    /// Render a statement with values inlined.
    pub fn render(self, statement: &SelectStatement) -> String {
        match self {
            Backend::Postgres => statement.to_string(PostgresQueryBuilder),
            Backend::MySql => statement.to_string(MysqlQueryBuilder),
            Backend::Sqlite => statement.to_string(SqliteQueryBuilder),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Postgres => f.write_str("postgres"),
            Backend::MySql => f.write_str("mysql"),
            Backend::Sqlite => f.write_str("sqlite"),
        }
    }
}
