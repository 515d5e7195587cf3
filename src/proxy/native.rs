//! Native query methods reachable through dynamic attribute access.
//!
//! Names listed here belong to the query object and take precedence over
//! mapped attributes of the same name, so the wrapped builder's own surface is
//! never hidden by the schema.

use super::QueryMaker;
use crate::error::{QueryMakerError, Result};
use sea_query::{Order, Value};
use std::fmt;

/// A query method that can be invoked by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeMethod {
    /// `limit(n)`
    Limit,
    /// `offset(n)`
    Offset,
    /// `distinct()`
    Distinct,
    /// `order_by(column)` or `order_by(column, "asc" | "desc")`
    OrderBy,
    /// `group_by(column)`
    GroupBy,
}

impl NativeMethod {
    pub const ALL: [NativeMethod; 5] = [
        NativeMethod::Limit,
        NativeMethod::Offset,
        NativeMethod::Distinct,
        NativeMethod::OrderBy,
        NativeMethod::GroupBy,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            NativeMethod::Limit => "limit",
            NativeMethod::Offset => "offset",
            NativeMethod::Distinct => "distinct",
            NativeMethod::OrderBy => "order_by",
            NativeMethod::GroupBy => "group_by",
        }
    }
}

impl fmt::Display for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A native method bound to the proxy it was looked up on
#[derive(Debug, Clone)]
pub struct NativeCall<'s> {
    pub(crate) maker: QueryMaker<'s>,
    pub(crate) method: NativeMethod,
}

impl<'s> NativeCall<'s> {
    pub fn method(&self) -> NativeMethod {
        self.method
    }

    /// Invoke the method with dynamic arguments.
    ///
    /// Column arguments are names resolved against the proxy's join point.
    pub fn call<I>(&self, args: I) -> Result<QueryMaker<'s>>
    where
        I: IntoIterator<Item = Value>,
    {
        let args: Vec<Value> = args.into_iter().collect();
        let method = self.method.name();
        let q = self.maker.q();
        match (self.method, args.as_slice()) {
            (NativeMethod::Limit, [n]) => Ok(q.limit(as_count(method, n)?)),
            (NativeMethod::Offset, [n]) => Ok(q.offset(as_count(method, n)?)),
            (NativeMethod::Distinct, []) => Ok(q.distinct()),
            (NativeMethod::OrderBy, [column]) => {
                let column = self.maker.column(&as_name(method, column)?)?;
                Ok(q.order_by(column.column_ref(), Order::Asc))
            }
            (NativeMethod::OrderBy, [column, direction]) => {
                let column = self.maker.column(&as_name(method, column)?)?;
                Ok(q.order_by(column.column_ref(), as_order(method, direction)?))
            }
            (NativeMethod::GroupBy, [column]) => {
                let column = self.maker.column(&as_name(method, column)?)?;
                Ok(q.group_by(column.column_ref()))
            }
            (_, args) => Err(QueryMakerError::InvalidArguments {
                method,
                reason: format!("{} argument(s) is not a valid call", args.len()),
            }),
        }
    }
}

fn as_count(method: &'static str, value: &Value) -> Result<u64> {
    let n = match value {
        Value::TinyInt(Some(n)) => u64::try_from(*n).ok(),
        Value::SmallInt(Some(n)) => u64::try_from(*n).ok(),
        Value::Int(Some(n)) => u64::try_from(*n).ok(),
        Value::BigInt(Some(n)) => u64::try_from(*n).ok(),
        Value::TinyUnsigned(Some(n)) => Some(u64::from(*n)),
        Value::SmallUnsigned(Some(n)) => Some(u64::from(*n)),
        Value::Unsigned(Some(n)) => Some(u64::from(*n)),
        Value::BigUnsigned(Some(n)) => Some(*n),
        _ => None,
    };
    n.ok_or_else(|| QueryMakerError::InvalidArguments {
        method,
        reason: format!("expected a non-negative integer, got {value:?}"),
    })
}

fn as_name(method: &'static str, value: &Value) -> Result<String> {
    match value {
        Value::String(Some(s)) => Ok(s.to_string()),
        _ => Err(QueryMakerError::InvalidArguments {
            method,
            reason: format!("expected a column name, got {value:?}"),
        }),
    }
}

fn as_order(method: &'static str, value: &Value) -> Result<Order> {
    let direction = as_name(method, value)?;
    match direction.to_ascii_lowercase().as_str() {
        "asc" => Ok(Order::Asc),
        "desc" => Ok(Order::Desc),
        _ => Err(QueryMakerError::InvalidArguments {
            method,
            reason: format!("expected \"asc\" or \"desc\", got \"{direction}\""),
        }),
    }
}
