//! The query proxy.

use super::attr::{Attr, ColumnProxy};
use super::key::Key;
use super::native::{NativeCall, NativeMethod};
use super::wrapper::QueryWrapper;
use crate::error::{AttrKind, QueryMakerError, Result};
use crate::query::SelectQuery;
use crate::schema::{eq_or_null, ColumnDef, EntityDef, RelationDef, Resolve, Resolved, Schema};
use sea_query::{Alias, IntoCondition, Values};
use std::fmt;

/// What a finished query returns
#[derive(Debug, Clone, Copy)]
pub enum Selection<'s> {
    /// Every column of the entity (`table.*`)
    Entity(&'s EntityDef),
    /// One column of the entity
    Column(&'s EntityDef, &'s ColumnDef),
}

/// Attribute-style proxy over a [`SelectQuery`]
///
/// A `QueryMaker` pairs a query with the entity at its join point (the
/// right-most table). Attribute names resolve against that entity: columns
/// become filters or selections, relationships become joins that move the
/// join point. Every method returns a new proxy; `self` is never modified, so a
/// proxy can be reused as the prefix of several queries.
///
/// # Example
///
/// ```
/// use querymaker::{ColumnDef, EntityDef, RelationDef, Schema};
///
/// let schema = Schema::builder()
///     .entity(
///         EntityDef::new("User", "users")
///             .column(ColumnDef::new("id").primary_key())
///             .column(ColumnDef::new("name"))
///             .relation(RelationDef::has_many("addresses", "Address", "id", "user_id")),
///     )
///     .entity(
///         EntityDef::new("Address", "addresses")
///             .column(ColumnDef::new("id").primary_key())
///             .column(ColumnDef::new("email_address"))
///             .column(ColumnDef::new("user_id")),
///     )
///     .build()?;
///
/// // users named jack -> their addresses -> the one at jack@google.com
/// let query = schema
///     .query("User")?
///     .column("name")?
///     .call("jack")
///     .related("addresses")?
///     .column("email_address")?
///     .call("jack@google.com");
///
/// let sql = query.to_string();
/// assert!(sql.starts_with("SELECT \"addresses\".* FROM \"users\""));
/// # Ok::<(), querymaker::QueryMakerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QueryMaker<'s> {
    schema: &'s Schema,
    entity: &'s EntityDef,
    query: SelectQuery,
    select: Selection<'s>,
}

impl<'s> QueryMaker<'s> {
    pub(crate) fn from_parts(schema: &'s Schema, entity: &'s EntityDef, query: SelectQuery) -> Self {
        Self {
            schema,
            entity,
            query,
            select: Selection::Entity(entity),
        }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// The entity at the query's join point
    pub fn entity(&self) -> &'s EntityDef {
        self.entity
    }

    pub fn selection(&self) -> Selection<'s> {
        self.select
    }

    /// The wrapped query, without the selection applied
    pub fn raw_query(&self) -> &SelectQuery {
        &self.query
    }

    /// Resolve an attribute name.
    ///
    /// Native query methods are checked first, then the join point entity's
    /// columns and relationships. Relationships are joined immediately.
    pub fn attr(&self, name: &str) -> Result<Attr<'s>> {
        if let Some(method) = NativeMethod::from_name(name) {
            log::trace!("{}.{name} is a native query method", self.entity.name);
            return Ok(Attr::Native(NativeCall {
                maker: self.clone(),
                method,
            }));
        }

        let entity = self.entity;
        match entity.resolve(name) {
            Resolved::Column(column) => {
                log::trace!("{}.{name} resolved to a column", entity.name);
                Ok(Attr::Column(ColumnProxy {
                    maker: self.clone(),
                    entity,
                    column,
                }))
            }
            Resolved::Relationship(relation) => {
                log::trace!("{}.{name} resolved to a relationship", entity.name);
                self.join_relation(relation).map(Attr::Relationship)
            }
            Resolved::Unresolved => {
                log::debug!("{}.{name} did not resolve", entity.name);
                Err(QueryMakerError::UnresolvedAttribute {
                    entity: entity.entity_name().to_string(),
                    name: name.to_string(),
                })
            }
        }
    }

    /// Resolve `name` as a mapped column.
    pub fn column(&self, name: &str) -> Result<ColumnProxy<'s>> {
        match self.attr(name)? {
            Attr::Column(column) => Ok(column),
            other => Err(self.wrong_kind(name, AttrKind::Column, other.kind())),
        }
    }

    /// Resolve `name` as a relationship and return the joined proxy.
    pub fn related(&self, name: &str) -> Result<QueryMaker<'s>> {
        match self.attr(name)? {
            Attr::Relationship(maker) => Ok(maker),
            other => Err(self.wrong_kind(name, AttrKind::Relationship, other.kind())),
        }
    }

    /// Follow a dotted chain of relationships, e.g. `"addresses.user"`.
    pub fn path(&self, path: &str) -> Result<QueryMaker<'s>> {
        path.split('.')
            .try_fold(self.clone(), |maker, segment| maker.related(segment))
    }

    /// Filter the join point entity by a key.
    ///
    /// A criterion is applied as is. A plain value goes through the entity's
    /// default query, or else compares against its first primary key column.
    pub fn index(&self, key: impl Into<Key>) -> Result<QueryMaker<'s>> {
        match key.into() {
            Key::Criterion(condition) => Ok(self.filtered(condition)),
            Key::Value(value) => {
                if let Some(criterion) = self.entity.default_criterion(&value) {
                    return Ok(self.filtered(criterion));
                }
                let pk = self
                    .entity
                    .primary_key()
                    .ok_or_else(|| QueryMakerError::NoPrimaryKey(self.entity.name.clone()))?;
                Ok(self.filtered(eq_or_null(self.entity.column_expr(&pk.name), value)))
            }
        }
    }

    /// The query object's own methods; results are re-wrapped as proxies.
    pub fn q(&self) -> QueryWrapper<'s> {
        QueryWrapper::new(self.clone())
    }

    /// The finished query with the selection added.
    pub fn to_query(&self) -> SelectQuery {
        match self.select {
            Selection::Entity(entity) => self.query.clone().add_entity(&entity.table),
            Selection::Column(entity, column) => self.query.clone().add_columns((
                Alias::new(entity.table.as_str()),
                Alias::new(column.name.as_str()),
            )),
        }
    }

    /// Render the finished query for the schema's backend.
    pub fn to_sql(&self) -> (String, Values) {
        let config = self.schema.config();
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "querymaker.to_sql",
            entity = %self.entity.name,
            backend = %config.backend
        )
        .entered();

        let (sql, values) = self.to_query().build(config.backend);
        if config.log_sql {
            log::debug!("{sql}");
        }
        (sql, values)
    }

    pub(crate) fn filtered<C: IntoCondition>(&self, condition: C) -> Self {
        self.with_query(self.query.clone().filter(condition))
    }

    pub(crate) fn selecting_column(&self, entity: &'s EntityDef, column: &'s ColumnDef) -> Self {
        Self {
            select: Selection::Column(entity, column),
            ..self.clone()
        }
    }

    /// Same join point and selection, different query
    pub(crate) fn with_query(&self, query: SelectQuery) -> Self {
        Self {
            schema: self.schema,
            entity: self.entity,
            query,
            select: self.select,
        }
    }

    /// Adopt a query whose join point may have moved
    pub(crate) fn rejoined(&self, query: SelectQuery) -> Result<Self> {
        let entity = match query.joinpoint() {
            Some(table) => self
                .schema
                .entity_by_table(table)
                .ok_or_else(|| QueryMakerError::UnknownEntity(table.to_string()))?,
            None => self.entity,
        };
        Ok(Self::from_parts(self.schema, entity, query))
    }

    /// Reject a join to `table` if it is already in the query or the join
    /// would exceed `max_join_depth`.
    pub(crate) fn check_join(&self, table: &str) -> Result<()> {
        if self.query.contains_table(table) {
            return Err(QueryMakerError::DuplicateJoin {
                table: table.to_string(),
            });
        }
        let depth = self.query.tables().len();
        let max = self.schema.config().max_join_depth;
        if depth > max {
            return Err(QueryMakerError::JoinDepthExceeded { depth, max });
        }
        Ok(())
    }

    fn join_relation(&self, relation: &'s RelationDef) -> Result<Self> {
        let target = self.schema.require_entity(&relation.target)?;
        self.check_join(&target.table)?;

        log::debug!(
            "joining {}.{} -> {} ({:?})",
            self.entity.name,
            relation.name,
            target.name,
            relation.rel_type
        );
        let on = relation.on_condition(&self.entity.table, &target.table);
        let query = self.query.clone().join(&target.table, on);
        Ok(Self::from_parts(self.schema, target, query))
    }

    fn wrong_kind(&self, name: &str, expected: AttrKind, found: AttrKind) -> QueryMakerError {
        QueryMakerError::WrongAttributeKind {
            entity: self.entity.name.clone(),
            name: name.to_string(),
            expected,
            found,
        }
    }
}

impl fmt::Display for QueryMaker<'_> {
    /// SQL with values inlined, for the schema's backend
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query().render(self.schema.config().backend))
    }
}
