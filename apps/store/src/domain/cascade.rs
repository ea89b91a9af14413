//! Delete planning over the relation catalog.
//!
//! A delete is planned before anything is mutated: the planner follows
//! every relation pointing at the doomed row, recursing through cascades,
//! and fails on the first protected reference. Applying the plan is then
//! infallible, so a refused delete leaves storage untouched.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::schema::{relations_referencing, EntityKind, OnDelete, Relation};

/// Relation chains in this schema are at most three deep; the limit only
/// guards against a catalog edit introducing a cycle.
const MAX_CASCADE_DEPTH: usize = 16;

/// Lookup of rows that reference a given parent row.
pub trait ReferenceIndex {
    /// Ids of `relation.child` rows whose `relation.column` equals `parent`.
    fn referencing(&self, relation: &Relation, parent: Uuid) -> Vec<Uuid>;
}

/// Ordered set of changes that carries out one delete.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    /// Rows to remove, dependents before the rows they reference.
    pub deletions: Vec<(EntityKind, Uuid)>,
    /// Nullable foreign keys to clear: (relation, child row id).
    pub nullifications: Vec<(&'static Relation, Uuid)>,
}

impl DeletePlan {
    pub fn deletes(&self, entity: EntityKind, id: Uuid) -> bool {
        self.deletions.contains(&(entity, id))
    }

    pub fn count(&self, entity: EntityKind) -> usize {
        self.deletions.iter().filter(|(kind, _)| *kind == entity).count()
    }
}

/// Plans the delete of `entity` row `id` and everything that cascades
/// from it.
pub fn plan_delete(
    index: &impl ReferenceIndex,
    entity: EntityKind,
    id: Uuid,
) -> StoreResult<DeletePlan> {
    let mut plan = DeletePlan::default();
    let mut visited = HashSet::new();
    visit(index, entity, id, &mut plan, &mut visited, 0)?;
    Ok(plan)
}

fn visit(
    index: &impl ReferenceIndex,
    entity: EntityKind,
    id: Uuid,
    plan: &mut DeletePlan,
    visited: &mut HashSet<(EntityKind, Uuid)>,
    depth: usize,
) -> StoreResult<()> {
    if depth > MAX_CASCADE_DEPTH {
        return Err(StoreError::Validation(format!(
            "delete of {entity} {id} cascades deeper than {MAX_CASCADE_DEPTH} levels"
        )));
    }
    if !visited.insert((entity, id)) {
        return Ok(());
    }

    for relation in relations_referencing(entity) {
        let children = index.referencing(relation, id);
        if children.is_empty() {
            continue;
        }

        match relation.on_delete {
            OnDelete::Protect => {
                return Err(StoreError::Protected {
                    entity: entity.name(),
                    referenced_by: relation.child.name(),
                });
            }
            OnDelete::Cascade => {
                for child in children {
                    visit(index, relation.child, child, plan, visited, depth + 1)?;
                }
            }
            OnDelete::SetNull => {
                plan.nullifications
                    .extend(children.into_iter().map(|child| (relation, child)));
            }
        }
    }

    plan.deletions.push((entity, id));
    Ok(())
}
