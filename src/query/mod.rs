//! The native query object and its rendering.
//!
//! [`SelectQuery`] wraps SeaQuery's `SelectStatement` with a by-value builder
//! API; [`Backend`] picks the SQL dialect it is rendered for.

pub mod backend;
#[doc(inline)]
pub use backend::Backend;

pub mod select;
#[doc(inline)]
pub use select::SelectQuery;
