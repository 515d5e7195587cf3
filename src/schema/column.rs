//! Column metadata for mapped entities.

/// A mapped column
///
/// # Example
///
/// ```
/// use querymaker::ColumnDef;
///
/// let id = ColumnDef::new("id").primary_key();
/// let email = ColumnDef::new("email_address").not_null();
/// assert!(id.primary_key && !email.nullable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name, also the attribute name it resolves under
    pub name: String,
    /// Whether this column is part of the primary key
    pub primary_key: bool,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Optional SQL type, informational only
    pub column_type: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: false,
            nullable: true,
            column_type: None,
        }
    }

    /// Mark as (part of) the primary key; primary keys are never nullable.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }
}
