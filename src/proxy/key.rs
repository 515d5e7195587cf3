//! Index keys.

use sea_query::{Condition, Expr, Value};

/// Argument of [`QueryMaker::index`](super::QueryMaker::index)
///
/// A plain value is looked up through the entity's default query (or its
/// primary key); a criterion is applied as a filter unchanged.
#[derive(Debug, Clone)]
pub enum Key {
    Value(Value),
    Criterion(Condition),
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Key::Value(value)
    }
}

impl From<Expr> for Key {
    fn from(expr: Expr) -> Self {
        Key::Criterion(Condition::all().add(expr))
    }
}

impl From<Condition> for Key {
    fn from(condition: Condition) -> Self {
        Key::Criterion(condition)
    }
}

impl_key_from!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, &str, String);
