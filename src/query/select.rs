//! Select query builder.
//!
//! `SelectQuery` is the native query object the proxy wraps. It is a thin,
//! immutable-by-value layer over SeaQuery's `SelectStatement` that also
//! remembers which tables appear in its FROM and JOIN clauses, so the right-most
//! table (the join point) can be recovered later.

use crate::error::Result;
use crate::proxy::QueryMaker;
use crate::query::backend::Backend;
use crate::schema::Schema;
use sea_query::{
    Alias, Asterisk, Expr, IntoColumnRef, IntoCondition, JoinType, Order, SelectStatement, Values,
};

/// Query builder for selecting records
///
/// Every builder method consumes `self` and returns the updated query. Clone a
/// query to branch it; the original is never modified through a clone.
///
/// # Example
///
/// ```no_run
/// use querymaker::SelectQuery;
/// use sea_query::{Alias, Expr, ExprTrait, Order};
///
/// let query = SelectQuery::new()
///     .select_from("users")
///     .filter(Expr::col((Alias::new("users"), Alias::new("name"))).like("J%"))
///     .order_by((Alias::new("users"), Alias::new("id")), Order::Asc)
///     .limit(10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub(crate) statement: SelectStatement,
    tables: Vec<String>,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectQuery {
    /// Create an empty query: no table, no columns.
    pub fn new() -> Self {
        Self {
            statement: SelectStatement::default(),
            tables: Vec::new(),
        }
    }

    /// Add a FROM table
    pub fn select_from(mut self, table: &str) -> Self {
        self.statement.from(Alias::new(table));
        self.tables.push(table.to_string());
        self
    }

    /// Add a filter condition
    ///
    /// Accepts anything that implements `IntoCondition`: an `Expr` or a
    /// `Condition` built with `Condition::all()` / `Condition::any()`.
    pub fn filter<F>(mut self, condition: F) -> Self
    where
        F: IntoCondition,
    {
        self.statement.cond_where(condition.into_condition());
        self
    }

    /// Add an ORDER BY clause
    pub fn order_by<C: IntoColumnRef>(mut self, column: C, order: Order) -> Self {
        self.statement.order_by(column, order);
        self
    }

    /// Add a LIMIT clause
    pub fn limit(mut self, limit: u64) -> Self {
        self.statement.limit(limit);
        self
    }

    /// Add an OFFSET clause
    pub fn offset(mut self, offset: u64) -> Self {
        self.statement.offset(offset);
        self
    }

    /// Select DISTINCT rows
    pub fn distinct(mut self) -> Self {
        self.statement.distinct();
        self
    }

    /// Add a GROUP BY clause
    pub fn group_by<C: IntoColumnRef>(mut self, column: C) -> Self {
        self.statement.group_by_col(column);
        self
    }

    /// Add a HAVING clause (for use with GROUP BY)
    pub fn having(mut self, condition: Expr) -> Self {
        self.statement.and_having(condition);
        self
    }

    /// Add an INNER JOIN clause; `table` becomes the join point.
    pub fn join<C: IntoCondition>(self, table: &str, on: C) -> Self {
        self.join_as(JoinType::InnerJoin, table, on)
    }

    /// Add an INNER JOIN clause (alias for `join()`)
    pub fn inner_join<C: IntoCondition>(self, table: &str, on: C) -> Self {
        self.join_as(JoinType::InnerJoin, table, on)
    }

    /// Add a LEFT JOIN clause; `table` becomes the join point.
    pub fn left_join<C: IntoCondition>(self, table: &str, on: C) -> Self {
        self.join_as(JoinType::LeftJoin, table, on)
    }

    fn join_as<C: IntoCondition>(mut self, join: JoinType, table: &str, on: C) -> Self {
        self.statement.join(join, Alias::new(table), on);
        self.tables.push(table.to_string());
        self
    }

    /// Add a column (or any column reference) to the result set
    pub fn add_columns<C: IntoColumnRef>(mut self, column: C) -> Self {
        self.statement.column(column);
        self
    }

    /// Add every column of `table` (`table.*`) to the result set
    pub fn add_entity(mut self, table: &str) -> Self {
        self.statement.column((Alias::new(table), Asterisk));
        self
    }

    /// The right-most table of the FROM/JOIN list, if any
    pub fn joinpoint(&self) -> Option<&str> {
        self.tables.last().map(String::as_str)
    }

    /// Tables in FROM/JOIN order
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t == table)
    }

    /// Borrow the underlying SeaQuery statement
    pub fn statement(&self) -> &SelectStatement {
        &self.statement
    }

    pub fn into_statement(self) -> SelectStatement {
        self.statement
    }

    /// Render with bind parameters for `backend`
    pub fn build(&self, backend: Backend) -> (String, Values) {
        backend.build(&self.statement)
    }

    /// Render with values inlined for `backend`
    pub fn render(&self, backend: Backend) -> String {
        backend.render(&self.statement)
    }

    /// Wrap this query in a [`QueryMaker`].
    ///
    /// The join point is inferred from the right-most table; see
    /// [`Schema::wrap`].
    pub fn into_query_maker<'s>(
        self,
        schema: &'s Schema,
        entity: Option<&str>,
    ) -> Result<QueryMaker<'s>> {
        schema.wrap(self, entity)
    }
}
