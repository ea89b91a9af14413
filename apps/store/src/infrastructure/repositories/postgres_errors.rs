//! Translation of PostgreSQL constraint failures into `StoreError`.
//!
//! Constraint names come from the migration and are resolved through the
//! relation catalog, so the same broken rule yields the same variant as
//! the in-memory store.

use crate::domain::errors::StoreError;
use crate::domain::schema::{relation_by_constraint, unique_by_constraint, EntityKind};

/// Maps an error from an INSERT or UPDATE on `entity`'s table
pub(crate) fn write_error(err: sqlx::Error, entity: EntityKind) -> StoreError {
    let db_err = match err {
        sqlx::Error::Database(db_err) => db_err,
        other => return StoreError::Database(other),
    };
    let constraint = db_err.constraint().unwrap_or_default();

    if db_err.is_unique_violation() {
        return match unique_by_constraint(constraint) {
            Some(unique) => StoreError::Duplicate {
                entity: unique.entity.name(),
                field: unique.column,
            },
            None => StoreError::Duplicate {
                entity: entity.name(),
                field: "id",
            },
        };
    }

    if db_err.is_foreign_key_violation() {
        if let Some(relation) = relation_by_constraint(constraint) {
            return StoreError::MissingReference {
                entity: relation.child.name(),
                referenced: relation.parent.name(),
            };
        }
    }

    if db_err.is_check_violation() {
        return StoreError::Validation(format!("{entity}: {}", db_err.message()));
    }

    StoreError::Database(sqlx::Error::Database(db_err))
}

/// Maps an error from a DELETE on `entity`'s table
pub(crate) fn delete_error(err: sqlx::Error, entity: EntityKind) -> StoreError {
    let db_err = match err {
        sqlx::Error::Database(db_err) => db_err,
        other => return StoreError::Database(other),
    };

    if db_err.is_foreign_key_violation() {
        let referenced_by = db_err
            .constraint()
            .and_then(relation_by_constraint)
            .map_or("another record", |relation| relation.child.name());
        tracing::warn!(%entity, referenced_by, "Delete refused by protected reference");
        return StoreError::Protected {
            entity: entity.name(),
            referenced_by,
        };
    }

    StoreError::Database(sqlx::Error::Database(db_err))
}
