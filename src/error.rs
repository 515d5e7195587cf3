//! Error type for schema validation, attribute resolution and query building.

use std::fmt;
use thiserror::Error;

/// Kind of attribute a name resolved to, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// A mapped column
    Column,
    /// A mapped relationship
    Relationship,
    /// A method of the query object itself
    NativeMethod,
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrKind::Column => f.write_str("column"),
            AttrKind::Relationship => f.write_str("relationship"),
            AttrKind::NativeMethod => f.write_str("query method"),
        }
    }
}

/// Errors returned by `querymaker`
#[derive(Debug, Error)]
pub enum QueryMakerError {
    /// The name is neither a query method nor a mapped attribute of the entity
    #[error("'{entity}' has no attribute '{name}'")]
    UnresolvedAttribute { entity: String, name: String },

    /// The name resolved, but to a different kind of attribute than requested
    #[error("'{entity}.{name}' is a {found}, not a {expected}")]
    WrongAttributeKind {
        entity: String,
        name: String,
        expected: AttrKind,
        found: AttrKind,
    },

    /// No entity with this name is registered in the schema
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    /// A query without any table was wrapped without naming an entity
    #[error("the query selects from no table and no entity was given")]
    MissingEntity,

    /// The entity given when wrapping a query differs from the query's join point
    #[error("entity '{expected}' does not match the query's join point '{found}'")]
    EntityMismatch { expected: String, found: String },

    /// Indexing by value needs a default query or a primary key
    #[error("entity '{0}' has no default query and no primary key to index by")]
    NoPrimaryKey(String),

    /// Joining a relationship would add a table that is already in the query
    #[error("table '{table}' is already part of the query")]
    DuplicateJoin { table: String },

    /// The chain of relationship joins is longer than the configured maximum
    #[error("join depth {depth} exceeds the configured maximum of {max}")]
    JoinDepthExceeded { depth: usize, max: usize },

    /// A native query method was called with the wrong arguments
    #[error("invalid arguments to '{method}': {reason}")]
    InvalidArguments { method: &'static str, reason: String },

    /// Two entities share a name or a table
    #[error("entity '{0}' is registered more than once")]
    DuplicateEntity(String),

    /// Two attributes of one entity share a name
    #[error("entity '{entity}' defines '{name}' more than once")]
    DuplicateAttribute { entity: String, name: String },

    /// A relationship or lookup refers to a column the entity does not have
    #[error("entity '{entity}' has no column '{column}'")]
    UnknownColumn { entity: String, column: String },

    /// A relationship targets an entity the schema does not know
    #[error("relationship '{entity}.{relation}' targets unknown entity '{target}'")]
    UnknownRelationTarget {
        entity: String,
        relation: String,
        target: String,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result alias used across the crate
pub type Result<T, E = QueryMakerError> = std::result::Result<T, E>;
