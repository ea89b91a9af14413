use sqlx::PgPool;

/// PostgreSQL implementation of every store repository
///
/// Constraint enforcement is left to the schema in `migrations/`; this
/// type only issues queries through SQLx and translates constraint
/// failures into `StoreError`s. The repository traits are implemented in
/// the sibling `postgres_*_repository` modules.
#[derive(Clone)]
pub struct PostgresStore {
    pub(super) pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgresStore
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
