//! The schema registry.
//!
//! A [`Schema`] owns every [`EntityDef`] and is the entry point for building
//! proxies: [`Schema::query`] starts from an entity, [`Schema::wrap`] adopts an
//! existing [`SelectQuery`].

use super::{EntityDef, Resolve};
use crate::config::QueryMakerConfig;
use crate::error::{QueryMakerError, Result};
use crate::proxy::QueryMaker;
use crate::query::SelectQuery;
use std::collections::{HashMap, HashSet};

/// Validated set of mapped entities
#[derive(Debug)]
pub struct Schema {
    entities: Vec<EntityDef>,
    by_name: HashMap<String, usize>,
    by_table: HashMap<String, usize>,
    config: QueryMakerConfig,
}

/// Collects entities and checks them when built
///
/// Starts from [`QueryMakerConfig::global`] unless [`config`](Self::config)
/// replaces it.
#[derive(Debug)]
pub struct SchemaBuilder {
    entities: Vec<EntityDef>,
    config: QueryMakerConfig,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            config: QueryMakerConfig::global().clone(),
        }
    }
}

impl SchemaBuilder {
    pub fn entity(mut self, entity: EntityDef) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn config(mut self, config: QueryMakerConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate names and relationships and build the schema.
    ///
    /// Fails on duplicate entity names or tables, duplicate attribute names
    /// within an entity, relationships to unknown entities, and relationship
    /// columns that do not exist on either side.
    pub fn build(self) -> Result<Schema> {
        let mut by_name = HashMap::new();
        let mut by_table = HashMap::new();
        for (idx, entity) in self.entities.iter().enumerate() {
            if by_name.insert(entity.name.clone(), idx).is_some()
                || by_table.insert(entity.table.clone(), idx).is_some()
            {
                return Err(QueryMakerError::DuplicateEntity(entity.name.clone()));
            }
            check_attribute_names(entity)?;
        }

        for entity in &self.entities {
            for rel in &entity.relations {
                let target = by_name
                    .get(&rel.target)
                    .map(|&idx| &self.entities[idx])
                    .ok_or_else(|| QueryMakerError::UnknownRelationTarget {
                        entity: entity.name.clone(),
                        relation: rel.name.clone(),
                        target: rel.target.clone(),
                    })?;
                require_column(entity, &rel.from_col)?;
                require_column(target, &rel.to_col)?;
            }
        }

        log::debug!("built schema with {} entities", self.entities.len());
        Ok(Schema {
            entities: self.entities,
            by_name,
            by_table,
            config: self.config,
        })
    }
}

fn check_attribute_names(entity: &EntityDef) -> Result<()> {
    let mut seen = HashSet::new();
    let names = entity
        .columns
        .iter()
        .map(|c| c.name.as_str())
        .chain(entity.relations.iter().map(|r| r.name.as_str()));
    for name in names {
        if !seen.insert(name) {
            return Err(QueryMakerError::DuplicateAttribute {
                entity: entity.name.clone(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn require_column(entity: &EntityDef, column: &str) -> Result<()> {
    match entity.get_column(column) {
        Some(_) => Ok(()),
        None => Err(QueryMakerError::UnknownColumn {
            entity: entity.name.clone(),
            column: column.to_string(),
        }),
    }
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn config(&self) -> &QueryMakerConfig {
        &self.config
    }

    pub fn entities(&self) -> &[EntityDef] {
        &self.entities
    }

    /// Look up an entity by name
    pub fn entity(&self, name: &str) -> Option<&EntityDef> {
        self.by_name.get(name).map(|&idx| &self.entities[idx])
    }

    /// Look up an entity by table name
    pub fn entity_by_table(&self, table: &str) -> Option<&EntityDef> {
        self.by_table.get(table).map(|&idx| &self.entities[idx])
    }

    pub(crate) fn require_entity(&self, name: &str) -> Result<&EntityDef> {
        self.entity(name)
            .ok_or_else(|| QueryMakerError::UnknownEntity(name.to_string()))
    }

    /// Start a proxy selecting every row of `entity`.
    pub fn query(&self, entity: &str) -> Result<QueryMaker<'_>> {
        let entity = self.require_entity(entity)?;
        let query = SelectQuery::new().select_from(&entity.table);
        Ok(QueryMaker::from_parts(self, entity, query))
    }

    /// Wrap an existing query.
    ///
    /// The join point is the entity mapped to the query's right-most table.
    /// A query with no table needs `entity`, which becomes its FROM table.
    /// When both are known they must name the same entity.
    /// An unmapped right-most table fails with `UnknownEntity`.
    pub fn wrap(&self, query: SelectQuery, entity: Option<&str>) -> Result<QueryMaker<'_>> {
        let inferred = match query.joinpoint() {
            Some(table) => Some(
                self.entity_by_table(table)
                    .ok_or_else(|| QueryMakerError::UnknownEntity(table.to_string()))?,
            ),
            None => None,
        };

        match (inferred, entity) {
            (Some(joinpoint), None) => Ok(QueryMaker::from_parts(self, joinpoint, query)),
            (Some(joinpoint), Some(name)) => {
                let given = self.require_entity(name)?;
                if given.name != joinpoint.name {
                    return Err(QueryMakerError::EntityMismatch {
                        expected: given.entity_name().to_string(),
                        found: joinpoint.entity_name().to_string(),
                    });
                }
                Ok(QueryMaker::from_parts(self, joinpoint, query))
            }
            (None, Some(name)) => {
                let given = self.require_entity(name)?;
                let query = query.select_from(&given.table);
                Ok(QueryMaker::from_parts(self, given, query))
            }
            (None, None) => Err(QueryMakerError::MissingEntity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDef, RelationDef};
    use crate::tests_cfg;

    #[test]
    fn test_lookup_by_name_and_table() {
        let schema = tests_cfg::schema();
        assert_eq!(schema.entity("User").map(|e| e.table.as_str()), Some("users"));
        assert_eq!(
            schema.entity_by_table("addresses").map(|e| e.name.as_str()),
            Some("Address")
        );
        assert!(schema.entity("Order").is_none());
    }

    #[test]
    fn test_duplicate_entity() {
        let err = Schema::builder()
            .entity(EntityDef::new("User", "users"))
            .entity(EntityDef::new("User", "people"))
            .build()
            .unwrap_err();
        assert!(matches!(err, QueryMakerError::DuplicateEntity(name) if name == "User"));
    }

    #[test]
    fn test_duplicate_table() {
        let err = Schema::builder()
            .entity(EntityDef::new("User", "users"))
            .entity(EntityDef::new("Person", "users"))
            .build()
            .unwrap_err();
        assert!(matches!(err, QueryMakerError::DuplicateEntity(name) if name == "Person"));
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = Schema::builder()
            .entity(
                EntityDef::new("User", "users")
                    .column(ColumnDef::new("id").primary_key())
                    .relation(RelationDef::has_many("id", "User", "id", "id")),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, QueryMakerError::DuplicateAttribute { name, .. } if name == "id"));
    }

    #[test]
    fn test_unknown_relation_target() {
        let err = Schema::builder()
            .entity(
                EntityDef::new("User", "users")
                    .column(ColumnDef::new("id").primary_key())
                    .relation(RelationDef::has_many("orders", "Order", "id", "user_id")),
            )
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            QueryMakerError::UnknownRelationTarget { target, .. } if target == "Order"
        ));
    }

    #[test]
    fn test_unknown_relation_column() {
        let err = Schema::builder()
            .entity(
                EntityDef::new("User", "users")
                    .column(ColumnDef::new("id").primary_key())
                    .relation(RelationDef::has_many("addresses", "Address", "id", "owner_id")),
            )
            .entity(
                EntityDef::new("Address", "addresses")
                    .column(ColumnDef::new("id").primary_key())
                    .column(ColumnDef::new("user_id")),
            )
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            QueryMakerError::UnknownColumn { entity, column } if entity == "Address" && column == "owner_id"
        ));
    }

    #[test]
    fn test_query_unknown_entity() {
        let schema = tests_cfg::schema();
        assert!(matches!(
            schema.query("Order"),
            Err(QueryMakerError::UnknownEntity(name)) if name == "Order"
        ));
    }

    #[test]
    fn test_wrap_infers_joinpoint() {
        let schema = tests_cfg::schema();
        let maker = schema
            .wrap(SelectQuery::new().select_from("users"), None)
            .expect("wrap");
        assert_eq!(maker.entity().name, "User");
    }

    #[test]
    fn test_wrap_empty_query_with_entity() {
        let schema = tests_cfg::schema();
        let maker = schema.wrap(SelectQuery::new(), Some("Address")).expect("wrap");
        assert_eq!(maker.entity().name, "Address");
        assert_eq!(maker.raw_query().tables(), ["addresses".to_string()]);
    }

    #[test]
    fn test_wrap_empty_query_without_entity() {
        let schema = tests_cfg::schema();
        assert!(matches!(
            schema.wrap(SelectQuery::new(), None),
            Err(QueryMakerError::MissingEntity)
        ));
    }

    #[test]
    fn test_wrap_mismatch() {
        let schema = tests_cfg::schema();
        let err = schema
            .wrap(SelectQuery::new().select_from("users"), Some("Address"))
            .unwrap_err();
        assert!(matches!(
            err,
            QueryMakerError::EntityMismatch { expected, found } if expected == "Address" && found == "User"
        ));
    }

    #[test]
    fn test_builder_uses_loaded_config() {
        let schema = Schema::builder().build().unwrap();
        assert_eq!(schema.config(), QueryMakerConfig::global());

        let config = QueryMakerConfig {
            max_join_depth: 1,
            ..QueryMakerConfig::default()
        };
        let schema = Schema::builder().config(config.clone()).build().unwrap();
        assert_eq!(schema.config(), &config);
    }

    #[test]
    fn test_wrap_unmapped_table_with_entity() {
        let schema = tests_cfg::schema();
        assert!(matches!(
            schema.wrap(SelectQuery::new().select_from("audit_log"), Some("User")),
            Err(QueryMakerError::UnknownEntity(table)) if table == "audit_log"
        ));
    }

    #[test]
    fn test_wrap_unmapped_table() {
        let schema = tests_cfg::schema();
        assert!(matches!(
            schema.wrap(SelectQuery::new().select_from("audit_log"), None),
            Err(QueryMakerError::UnknownEntity(table)) if table == "audit_log"
        ));
    }
}
