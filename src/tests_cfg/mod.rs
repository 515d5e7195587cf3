//! Shared test schema: users and their e-mail addresses.
//!
//! - `User` (`users`): `id`, `name`, `fullname`, `password`; has many `addresses`.
//!   Indexing by a string looks up `name`; other keys use the primary key.
//! - `Address` (`addresses`): `id`, `email_address`, `user_id`; belongs to `user`.
//!   Indexing by any value looks up `email_address`.

use crate::config::QueryMakerConfig;
use crate::schema::{ColumnDef, EntityDef, RelationDef, Schema};
use sea_query::{Expr, ExprTrait, Value};

pub fn user() -> EntityDef {
    EntityDef::new("User", "users")
        .column(ColumnDef::new("id").primary_key().column_type("integer"))
        .column(ColumnDef::new("name").column_type("varchar"))
        .column(ColumnDef::new("fullname").column_type("varchar"))
        .column(ColumnDef::new("password").column_type("varchar"))
        .relation(RelationDef::has_many("addresses", "Address", "id", "user_id"))
        .default_query(|entity, key| match key {
            Value::String(Some(_)) => Some(entity.column_expr("name").eq(Expr::val(key.clone()))),
            _ => None,
        })
}

pub fn address() -> EntityDef {
    EntityDef::new("Address", "addresses")
        .column(ColumnDef::new("id").primary_key().column_type("integer"))
        .column(ColumnDef::new("email_address").not_null().column_type("varchar"))
        .column(ColumnDef::new("user_id").column_type("integer"))
        .relation(RelationDef::belongs_to("user", "User", "user_id", "id"))
        .lookup_column("email_address")
}

pub fn schema_with(config: QueryMakerConfig) -> Schema {
    Schema::builder()
        .config(config)
        .entity(user())
        .entity(address())
        .build()
        .expect("test schema is valid")
}

pub fn schema() -> Schema {
    schema_with(QueryMakerConfig::default())
}
