//! Mapped entity descriptors.

use super::resolve::{Resolve, Resolved};
use super::{ColumnDef, RelationDef};
use sea_query::{Alias, Expr, Value};
use std::fmt;
use std::sync::Arc;

/// Hook turning an index key into a filter criterion
///
/// Returning `None` defers to the primary key lookup.
pub type DefaultQuery = Arc<dyn Fn(&EntityDef, &Value) -> Option<Expr> + Send + Sync>;

/// Describes one mapped entity: its table, columns and relationships
///
/// # Example
///
/// ```
/// use querymaker::{ColumnDef, EntityDef, RelationDef};
///
/// let user = EntityDef::new("User", "users")
///     .column(ColumnDef::new("id").primary_key())
///     .column(ColumnDef::new("name"))
///     .relation(RelationDef::has_many("addresses", "Address", "id", "user_id"))
///     .lookup_column("name");
/// assert_eq!(user.primary_key().map(|c| c.name.as_str()), Some("id"));
/// ```
#[derive(Clone)]
pub struct EntityDef {
    /// Entity name, used to address the entity in the schema
    pub name: String,
    /// Table name
    pub table: String,
    pub columns: Vec<ColumnDef>,
    pub relations: Vec<RelationDef>,
    pub(crate) default_query: Option<DefaultQuery>,
}

impl fmt::Debug for EntityDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDef")
            .field("name", &self.name)
            .field("table", &self.table)
            .field("columns", &self.columns)
            .field("relations", &self.relations)
            .field("default_query", &if self.default_query.is_some() { "Some" } else { "None" })
            .finish()
    }
}

impl EntityDef {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            columns: Vec::new(),
            relations: Vec::new(),
            default_query: None,
        }
    }

    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn relation(mut self, relation: RelationDef) -> Self {
        self.relations.push(relation);
        self
    }

    /// Install a hook used when the entity is indexed by a plain value
    pub fn default_query<F>(mut self, f: F) -> Self
    where
        F: Fn(&EntityDef, &Value) -> Option<Expr> + Send + Sync + 'static,
    {
        self.default_query = Some(Arc::new(f));
        self
    }

    /// Index by `column = key` for every key value
    pub fn lookup_column(self, column: impl Into<String>) -> Self {
        let column = column.into();
        self.default_query(move |entity, key| Some(super::eq_or_null(entity.column_expr(&column), key.clone())))
    }

    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn get_relation(&self, name: &str) -> Option<&RelationDef> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// First primary key column, in declaration order
    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Table-qualified column expression (`"table"."column"`)
    ///
    /// The column is not checked against the entity.
    pub fn column_expr(&self, column: &str) -> Expr {
        Expr::col((Alias::new(self.table.as_str()), Alias::new(column)))
    }

    /// Run the default query hook, if any
    pub fn default_criterion(&self, key: &Value) -> Option<Expr> {
        self.default_query.as_ref().and_then(|f| f(self, key))
    }
}

impl Resolve for EntityDef {
    fn entity_name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, name: &str) -> Resolved<'_> {
        if let Some(column) = self.get_column(name) {
            Resolved::Column(column)
        } else if let Some(relation) = self.get_relation(name) {
            Resolved::Relationship(relation)
        } else {
            Resolved::Unresolved
        }
    }
}
