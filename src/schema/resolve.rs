//! Name resolution against a mapped entity.

use super::{ColumnDef, RelationDef};

/// Outcome of resolving an attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Column(&'a ColumnDef),
    Relationship(&'a RelationDef),
    Unresolved,
}

/// Capability to resolve attribute names to mapped columns and relationships.
///
/// The proxy dispatches on the returned variant; anything that can describe
/// its attributes this way can be queried through a
/// [`QueryMaker`](crate::QueryMaker).
pub trait Resolve {
    /// Name used in error messages
    fn entity_name(&self) -> &str;

    fn resolve(&self, name: &str) -> Resolved<'_>;
}
