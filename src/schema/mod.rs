//! Runtime schema: mapped entities, their columns and relationships.
//!
//! # Architecture
//!
//! - **Column** / **Relation**: attribute metadata (`ColumnDef`, `RelationDef`)
//! - **Entity**: one mapped class (`EntityDef`) with an optional default query
//! - **Resolve**: the name resolution capability the proxy dispatches on
//! - **Registry**: the validated set of entities (`Schema`)

pub mod column;
#[doc(inline)]
pub use column::ColumnDef;

pub mod relation;
#[doc(inline)]
pub use relation::{RelationDef, RelationType};

pub mod entity;
#[doc(inline)]
pub use entity::{DefaultQuery, EntityDef};

pub mod resolve;
#[doc(inline)]
pub use resolve::{Resolve, Resolved};

pub mod registry;
#[doc(inline)]
pub use registry::{Schema, SchemaBuilder};

use sea_query::{Expr, ExprTrait, Value};

/// `column = value`, or `column IS NULL` when `value` is a null of any type.
pub(crate) fn eq_or_null(column: Expr, value: Value) -> Expr {
    if value == value.as_null() {
        column.is_null()
    } else {
        column.eq(Expr::val(value))
    }
}
