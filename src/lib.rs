//! # querymaker
//!
//! Attribute-style query building over SeaQuery.
//!
//! Describe mapped entities once in a [`Schema`], then build queries by
//! naming columns and relationships instead of spelling out joins and filters:
//!
//! ```text
//! schema.query("User")?.index("jack")?.related("addresses")?.index("jack@google.com")?
//! SELECT "addresses".* FROM "users"
//!   INNER JOIN "addresses" ON "users"."id" = "addresses"."user_id"
//!   WHERE "users"."name" = 'jack' AND "addresses"."email_address" = 'jack@google.com'
//! ```
//!
//! The proxy ([`QueryMaker`]) never changes the query it wraps; every step
//! returns a new value.

#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod proxy;
pub mod query;
pub mod schema;

#[cfg(test)]
mod tests_cfg;

pub use config::QueryMakerConfig;
pub use error::{AttrKind, QueryMakerError, Result};
pub use proxy::{
    Attr, ColumnDescription, ColumnProxy, Key, NativeCall, NativeMethod, QueryMaker, QueryWrapper,
    Selection,
};
pub use query::{Backend, SelectQuery};
pub use schema::{
    ColumnDef, DefaultQuery, EntityDef, RelationDef, RelationType, Resolve, Resolved, Schema,
    SchemaBuilder,
};

/// Wrap `query` in a proxy resolving against `schema`.
///
/// The join point is inferred from the query's right-most table; `entity`
/// names it explicitly, and is required when the query has no table yet.
pub fn query_maker<'s>(
    schema: &'s Schema,
    query: SelectQuery,
    entity: Option<&str>,
) -> Result<QueryMaker<'s>> {
    schema.wrap(query, entity)
}
