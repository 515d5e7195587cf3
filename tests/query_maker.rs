//! Integration tests for the attribute-style query proxy.
//!
//! Test relationships:
//! - User has_many Addresses (one-to-many)
//! - Address belongs_to User (many-to-one)
//! - User has_many Orders (orders are keyed by a UUID)

use querymaker::{
    query_maker, Attr, Backend, ColumnDef, EntityDef, QueryMakerConfig, QueryMakerError,
    RelationDef, Schema, SelectQuery,
};
use sea_query::{Alias, Expr, ExprTrait, Order, Value};

// ============================================================================
// Test Schema
// ============================================================================

fn schema() -> Schema {
    Schema::builder()
        .entity(
            EntityDef::new("User", "users")
                .column(ColumnDef::new("id").primary_key())
                .column(ColumnDef::new("name"))
                .column(ColumnDef::new("fullname"))
                .column(ColumnDef::new("password"))
                .relation(RelationDef::has_many("addresses", "Address", "id", "user_id"))
                .relation(RelationDef::has_many("orders", "Order", "id", "user_id"))
                .default_query(|user, key| match key {
                    Value::String(Some(_)) => {
                        Some(user.column_expr("name").eq(Expr::val(key.clone())))
                    }
                    _ => None,
                }),
        )
        .entity(
            EntityDef::new("Address", "addresses")
                .column(ColumnDef::new("id").primary_key())
                .column(ColumnDef::new("email_address").not_null())
                .column(ColumnDef::new("user_id"))
                .relation(RelationDef::belongs_to("user", "User", "user_id", "id"))
                .lookup_column("email_address"),
        )
        .entity(
            EntityDef::new("Order", "orders")
                .column(ColumnDef::new("uuid").primary_key().column_type("uuid"))
                .column(ColumnDef::new("user_id"))
                .column(ColumnDef::new("total")),
        )
        .build()
        .expect("schema is valid")
}

// ============================================================================
// Columns, relationships and unresolved names
// ============================================================================

#[test]
fn test_every_column_call_matches_native_filter() {
    let schema = schema();
    for entity in schema.entities() {
        let maker = schema.query(&entity.name).unwrap();
        for column in &entity.columns {
            let proxied = maker.column(&column.name).unwrap().call(42).to_query();
            let native = SelectQuery::new()
                .select_from(&entity.table)
                .filter(entity.column_expr(&column.name).eq(Expr::val(42)))
                .add_entity(&entity.table);
            assert_eq!(proxied, native, "{}.{}", entity.name, column.name);
        }
    }
}

#[test]
fn test_every_relationship_scopes_to_target() {
    let schema = schema();
    for entity in schema.entities() {
        let maker = schema.query(&entity.name).unwrap();
        for relation in &entity.relations {
            match maker.attr(&relation.name).unwrap() {
                Attr::Relationship(related) => {
                    assert_eq!(related.entity().name, relation.target);
                    assert_eq!(related.raw_query().joinpoint(), Some(related.entity().table.as_str()));
                }
                other => panic!("{}.{} resolved to {:?}", entity.name, relation.name, other.kind()),
            }
        }
    }
}

#[test]
fn test_unknown_names_are_unresolved() {
    let schema = schema();
    for entity in schema.entities() {
        let err = schema.query(&entity.name).unwrap().attr("no_such_attribute").unwrap_err();
        assert!(
            matches!(&err, QueryMakerError::UnresolvedAttribute { name, .. } if name == "no_such_attribute"),
            "got: {err}"
        );
    }
}

#[test]
fn test_chained_relationship_then_column() {
    let schema = schema();
    let pythonic = schema
        .query("User")
        .unwrap()
        .index("jack")
        .unwrap()
        .related("addresses")
        .unwrap()
        .index("jack@google.com")
        .unwrap();

    let explicit = schema
        .query("User")
        .unwrap()
        .column("name")
        .unwrap()
        .call("jack")
        .related("addresses")
        .unwrap()
        .column("email_address")
        .unwrap()
        .call("jack@google.com");

    assert_eq!(pythonic.to_query(), explicit.to_query());

    let sql = pythonic.to_string();
    assert!(sql.starts_with("SELECT \"addresses\".* FROM \"users\""), "got: {sql}");
    assert!(
        sql.contains("INNER JOIN \"addresses\" ON \"users\".\"id\" = \"addresses\".\"user_id\""),
        "got: {sql}"
    );
    assert!(sql.contains("\"users\".\"name\" = 'jack'"), "got: {sql}");
    assert!(
        sql.contains("\"addresses\".\"email_address\" = 'jack@google.com'"),
        "got: {sql}"
    );
}

// ============================================================================
// Selection, reuse and the native surface
// ============================================================================

#[test]
fn test_reuse_prefix() {
    let schema = schema();
    let jack = schema.query("User").unwrap().index("jack").unwrap();

    let addresses = jack.related("addresses").unwrap().to_string();
    let emails = jack
        .related("addresses")
        .unwrap()
        .column("email_address")
        .unwrap()
        .select()
        .to_string();
    let user = jack.to_string();

    assert!(addresses.starts_with("SELECT \"addresses\".*"), "got: {addresses}");
    assert!(emails.starts_with("SELECT \"addresses\".\"email_address\""), "got: {emails}");
    assert!(user.starts_with("SELECT \"users\".*"), "got: {user}");
    assert!(!user.contains("JOIN"), "got: {user}");
}

#[test]
fn test_belongs_to_direction() {
    let schema = schema();
    let sql = schema
        .query("Address")
        .unwrap()
        .index("j25@yahoo.com")
        .unwrap()
        .related("user")
        .unwrap()
        .to_string();
    assert!(
        sql.contains("INNER JOIN \"users\" ON \"addresses\".\"user_id\" = \"users\".\"id\""),
        "got: {sql}"
    );
    assert!(sql.starts_with("SELECT \"users\".*"), "got: {sql}");
}

#[test]
fn test_native_surface_stays_reachable() {
    let schema = schema();
    let users = schema.query("User").unwrap();

    let by_attr = match users.attr("order_by").unwrap() {
        Attr::Native(call) => call
            .call([Value::from("fullname"), Value::from("desc")])
            .unwrap(),
        other => panic!("expected native method, got {:?}", other.kind()),
    };
    let by_wrapper = users
        .q()
        .order_by((Alias::new("users"), Alias::new("fullname")), Order::Desc);
    assert_eq!(by_attr.to_query(), by_wrapper.to_query());
}

#[test]
fn test_uuid_primary_key_index() {
    let schema = schema();
    let id = uuid::Uuid::new_v4();
    let (sql, values) = schema
        .query("Order")
        .unwrap()
        .index(Value::from(id))
        .unwrap()
        .to_sql();
    assert!(sql.contains("\"orders\".\"uuid\" = $1"), "got: {sql}");
    assert_eq!(values.0, vec![Value::from(id)]);
}

// ============================================================================
// Wrapping existing queries
// ============================================================================

#[test]
fn test_wrap_existing_query() {
    let schema = schema();
    let existing = SelectQuery::new()
        .select_from("users")
        .filter(Expr::col((Alias::new("users"), Alias::new("name"))).eq(Expr::val("jack")));

    let via_fn = query_maker(&schema, existing.clone(), None)
        .unwrap()
        .related("addresses")
        .unwrap()
        .index("jack@google.com")
        .unwrap();
    let via_method = existing
        .into_query_maker(&schema, Some("User"))
        .unwrap()
        .related("addresses")
        .unwrap()
        .index("jack@google.com")
        .unwrap();

    assert_eq!(via_fn.to_query(), via_method.to_query());
    assert_eq!(via_fn.entity().name, "Address");
}

#[test]
fn test_wrap_errors() {
    let schema = schema();
    assert!(matches!(
        query_maker(&schema, SelectQuery::new(), None),
        Err(QueryMakerError::MissingEntity)
    ));
    assert!(matches!(
        query_maker(&schema, SelectQuery::new().select_from("orders"), Some("User")),
        Err(QueryMakerError::EntityMismatch { .. })
    ));
    assert!(matches!(
        query_maker(&schema, SelectQuery::new(), Some("Invoice")),
        Err(QueryMakerError::UnknownEntity(_))
    ));
}

#[test]
fn test_sqlite_backend() {
    let config = QueryMakerConfig {
        backend: Backend::Sqlite,
        ..QueryMakerConfig::default()
    };
    let schema = Schema::builder()
        .config(config)
        .entity(EntityDef::new("User", "users").column(ColumnDef::new("id").primary_key()))
        .build()
        .unwrap();
    let (sql, _) = schema.query("User").unwrap().index(1).unwrap().to_sql();
    assert_eq!(sql, "SELECT \"users\".* FROM \"users\" WHERE \"users\".\"id\" = ?");
}
