//! Relationship metadata between mapped entities.
//!
//! A `RelationDef` names its target entity rather than holding it, so entities
//! can refer to each other in either order; the [`Schema`](super::Schema)
//! checks every target when it is built.

use sea_query::{Alias, Condition, Expr, ExprTrait};

/// Type of relationship between entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// One-to-one relationship
    HasOne,
    /// One-to-many relationship
    HasMany,
    /// Many-to-one relationship (`belongs_to`)
    BelongsTo,
}

/// Defines a relationship from an owning entity to a target entity
///
/// `from_col` is a column of the owning entity and `to_col` a column of the
/// target; joining the relationship adds `owner.from_col = target.to_col`.
///
/// # Example
///
/// ```
/// use querymaker::{RelationDef, RelationType};
///
/// // User has many Addresses through addresses.user_id
/// let rel = RelationDef::has_many("addresses", "Address", "id", "user_id");
/// assert_eq!(rel.rel_type, RelationType::HasMany);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDef {
    /// Attribute name the relationship resolves under
    pub name: String,
    /// Type of relationship
    pub rel_type: RelationType,
    /// Name of the target entity in the schema
    pub target: String,
    /// Column in the owning entity
    pub from_col: String,
    /// Column in the target entity
    pub to_col: String,
}

impl RelationDef {
    pub fn new(
        name: impl Into<String>,
        rel_type: RelationType,
        target: impl Into<String>,
        from_col: impl Into<String>,
        to_col: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            rel_type,
            target: target.into(),
            from_col: from_col.into(),
            to_col: to_col.into(),
        }
    }

    pub fn has_one(
        name: impl Into<String>,
        target: impl Into<String>,
        from_col: impl Into<String>,
        to_col: impl Into<String>,
    ) -> Self {
        Self::new(name, RelationType::HasOne, target, from_col, to_col)
    }

    pub fn has_many(
        name: impl Into<String>,
        target: impl Into<String>,
        from_col: impl Into<String>,
        to_col: impl Into<String>,
    ) -> Self {
        Self::new(name, RelationType::HasMany, target, from_col, to_col)
    }

    pub fn belongs_to(
        name: impl Into<String>,
        target: impl Into<String>,
        from_col: impl Into<String>,
        to_col: impl Into<String>,
    ) -> Self {
        Self::new(name, RelationType::BelongsTo, target, from_col, to_col)
    }

    /// Build the JOIN condition `from_table.from_col = to_table.to_col`.
    pub fn on_condition(&self, from_table: &str, to_table: &str) -> Condition {
        let from = Expr::col((Alias::new(from_table), Alias::new(self.from_col.as_str())));
        Condition::all()
            .add(from.equals((Alias::new(to_table), Alias::new(self.to_col.as_str()))))
    }
}
