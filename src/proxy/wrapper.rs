//! Access to the wrapped query's own methods.
//!
//! [`QueryWrapper`] behaves like the native [`SelectQuery`], except that every
//! method returning a query hands back a [`QueryMaker`] again so attribute
//! access can continue. Methods that return anything else return it unchanged.

use super::{QueryMaker, Selection};
use crate::error::Result;
use crate::query::SelectQuery;
use sea_query::{Expr, IntoColumnRef, IntoCondition, Order, Values};

/// One column of a finished query's result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescription {
    pub name: String,
    pub entity: String,
    pub table: String,
    pub primary_key: bool,
}

/// Native query surface of a [`QueryMaker`], reached with [`QueryMaker::q`]
#[derive(Debug, Clone)]
pub struct QueryWrapper<'s> {
    maker: QueryMaker<'s>,
}

impl<'s> QueryWrapper<'s> {
    pub(crate) fn new(maker: QueryMaker<'s>) -> Self {
        Self { maker }
    }

    fn raw(&self) -> SelectQuery {
        self.maker.raw_query().clone()
    }

    pub fn filter<F: IntoCondition>(&self, condition: F) -> QueryMaker<'s> {
        self.maker.with_query(self.raw().filter(condition))
    }

    pub fn order_by<C: IntoColumnRef>(&self, column: C, order: Order) -> QueryMaker<'s> {
        self.maker.with_query(self.raw().order_by(column, order))
    }

    pub fn limit(&self, limit: u64) -> QueryMaker<'s> {
        self.maker.with_query(self.raw().limit(limit))
    }

    pub fn offset(&self, offset: u64) -> QueryMaker<'s> {
        self.maker.with_query(self.raw().offset(offset))
    }

    pub fn distinct(&self) -> QueryMaker<'s> {
        self.maker.with_query(self.raw().distinct())
    }

    pub fn group_by<C: IntoColumnRef>(&self, column: C) -> QueryMaker<'s> {
        self.maker.with_query(self.raw().group_by(column))
    }

    pub fn having(&self, condition: Expr) -> QueryMaker<'s> {
        self.maker.with_query(self.raw().having(condition))
    }

    /// INNER JOIN `table`; the entity mapped to `table` becomes the join point.
    ///
    /// Subject to the same duplicate table and depth checks as relationships.
    pub fn join<C: IntoCondition>(&self, table: &str, on: C) -> Result<QueryMaker<'s>> {
        self.maker.check_join(table)?;
        self.maker.rejoined(self.raw().join(table, on))
    }

    /// LEFT JOIN `table`; the entity mapped to `table` becomes the join point.
    pub fn left_join<C: IntoCondition>(&self, table: &str, on: C) -> Result<QueryMaker<'s>> {
        self.maker.check_join(table)?;
        self.maker.rejoined(self.raw().left_join(table, on))
    }

    /// The finished query, selection included
    pub fn to_query(&self) -> SelectQuery {
        self.maker.to_query()
    }

    /// Rendered SQL and bind values for the schema's backend
    pub fn sql(&self) -> (String, Values) {
        self.maker.to_sql()
    }

    /// Describe the columns the finished query returns.
    pub fn column_descriptions(&self) -> Vec<ColumnDescription> {
        let describe = |entity: &crate::schema::EntityDef, column: &crate::schema::ColumnDef| {
            ColumnDescription {
                name: column.name.clone(),
                entity: entity.name.clone(),
                table: entity.table.clone(),
                primary_key: column.primary_key,
            }
        };
        match self.maker.selection() {
            Selection::Entity(entity) => entity
                .columns
                .iter()
                .map(|column| describe(entity, column))
                .collect(),
            Selection::Column(entity, column) => vec![describe(entity, column)],
        }
    }
}
