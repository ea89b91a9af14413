use thiserror::Error;

/// Errors raised by the storefront schema layer
///
/// Every variant except `Database` and `Migration` is a constraint
/// violation: both adapters report the same variant for the same broken
/// rule, whether the check ran in Rust or inside PostgreSQL.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} with this {field} already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
    },

    #[error("cannot delete {entity}: still referenced by {referenced_by}")]
    Protected {
        entity: &'static str,
        referenced_by: &'static str,
    },

    #[error("{entity} references a {referenced} that does not exist")]
    MissingReference {
        entity: &'static str,
        referenced: &'static str,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid data in storage: {0}")]
    DataCorruption(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
