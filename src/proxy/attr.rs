//! Results of attribute access on a [`QueryMaker`].

use super::native::NativeCall;
use super::QueryMaker;
use crate::error::AttrKind;
use crate::schema::{eq_or_null, ColumnDef, EntityDef};
use sea_query::{Alias, ColumnRef, Expr, ExprTrait, IntoColumnRef, Value};

/// What an attribute name resolved to
#[derive(Debug, Clone)]
pub enum Attr<'s> {
    /// A method of the query object itself
    Native(NativeCall<'s>),
    /// A mapped column, awaiting a value or a comparison
    Column(ColumnProxy<'s>),
    /// A mapped relationship, already joined; scoped to the related entity
    Relationship(QueryMaker<'s>),
}

impl<'s> Attr<'s> {
    pub fn kind(&self) -> AttrKind {
        match self {
            Attr::Native(_) => AttrKind::NativeMethod,
            Attr::Column(_) => AttrKind::Column,
            Attr::Relationship(_) => AttrKind::Relationship,
        }
    }
}

/// A mapped column reached through a proxy
///
/// Calling it with a value filters the proxy's query by equality; the
/// comparison methods build expressions on the table-qualified column.
#[derive(Debug, Clone)]
pub struct ColumnProxy<'s> {
    pub(crate) maker: QueryMaker<'s>,
    pub(crate) entity: &'s EntityDef,
    pub(crate) column: &'s ColumnDef,
}

impl<'s> ColumnProxy<'s> {
    pub fn def(&self) -> &'s ColumnDef {
        self.column
    }

    pub fn entity(&self) -> &'s EntityDef {
        self.entity
    }

    /// The qualified column expression, `"table"."column"`
    pub fn expr(&self) -> Expr {
        self.entity.column_expr(&self.column.name)
    }

    /// The qualified column reference, for ORDER BY and GROUP BY
    pub fn column_ref(&self) -> ColumnRef {
        (
            Alias::new(self.entity.table.as_str()),
            Alias::new(self.column.name.as_str()),
        )
            .into_column_ref()
    }

    /// Filter by `column = value` (`IS NULL` for a null value).
    ///
    /// The selection of the returned proxy is unchanged.
    pub fn call<V: Into<Value>>(&self, value: V) -> QueryMaker<'s> {
        log::trace!("{}.{} called", self.entity.name, self.column.name);
        self.maker.filtered(eq_or_null(self.expr(), value.into()))
    }

    /// Filter by any comparison built from the qualified column.
    ///
    /// ```no_run
    /// # fn demo(col: querymaker::ColumnProxy<'_>) {
    /// use sea_query::ExprTrait;
    /// let gmail = col.filter_with(|c| c.like("%@gmail.com"));
    /// # }
    /// ```
    pub fn filter_with<F>(&self, f: F) -> QueryMaker<'s>
    where
        F: FnOnce(Expr) -> Expr,
    {
        self.maker.filtered(f(self.expr()))
    }

    /// Select only this column.
    pub fn select(&self) -> QueryMaker<'s> {
        self.maker.selecting_column(self.entity, self.column)
    }

    /// Create an equality expression: `column = value`
    pub fn eq<T: Into<Value>>(&self, value: T) -> Expr {
        self.expr().eq(Expr::val(value))
    }

    /// Create a not-equal expression: `column <> value`
    pub fn ne<T: Into<Value>>(&self, value: T) -> Expr {
        self.expr().ne(Expr::val(value))
    }

    /// Create a greater-than expression: `column > value`
    pub fn gt<T: Into<Value>>(&self, value: T) -> Expr {
        self.expr().gt(Expr::val(value))
    }

    /// Create a greater-than-or-equal expression: `column >= value`
    pub fn gte<T: Into<Value>>(&self, value: T) -> Expr {
        self.expr().gte(Expr::val(value))
    }

    /// Create a less-than expression: `column < value`
    pub fn lt<T: Into<Value>>(&self, value: T) -> Expr {
        self.expr().lt(Expr::val(value))
    }

    /// Create a less-than-or-equal expression: `column <= value`
    pub fn lte<T: Into<Value>>(&self, value: T) -> Expr {
        self.expr().lte(Expr::val(value))
    }

    /// Create a LIKE expression: `column LIKE pattern`
    pub fn like(&self, pattern: &str) -> Expr {
        self.expr().like(pattern)
    }

    /// Create an IN expression: `column IN (values)`
    #[allow(clippy::wrong_self_convention)]
    pub fn is_in<T, I>(&self, values: I) -> Expr
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        self.expr().is_in(values.into_iter().map(Expr::val))
    }

    /// Create a NOT IN expression: `column NOT IN (values)`
    #[allow(clippy::wrong_self_convention)]
    pub fn is_not_in<T, I>(&self, values: I) -> Expr
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        self.expr().is_not_in(values.into_iter().map(Expr::val))
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn is_null(&self) -> Expr {
        self.expr().is_null()
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn is_not_null(&self) -> Expr {
        self.expr().is_not_null()
    }

    /// Create a BETWEEN expression: `column BETWEEN start AND end`
    pub fn between<T1: Into<Value>, T2: Into<Value>>(&self, start: T1, end: T2) -> Expr {
        self.expr().between(Expr::val(start), Expr::val(end))
    }
}
