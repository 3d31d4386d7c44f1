//! Lookup, filter and pagination logic shared by every resolver.

use async_graphql::dynamic::FieldValue;
use gallery_data::DataSource;
use gallery_types::{Entity, EntityKind, ForeignKey, Shape};
use tracing::warn;

use crate::error::ResolveError;

/// Restricts a collection to records whose foreign key equals `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub fk: ForeignKey,
    pub value: i64,
}

/// Check that the parent handed to a field is the record kind the field
/// belongs to.
pub fn expect_source<'a, T: Shape>(parent: &'a FieldValue<'_>) -> Result<&'a T, ResolveError> {
    match parent.downcast_ref::<Entity>() {
        Some(entity) => T::from_entity(entity).ok_or_else(|| {
            warn!("Expected {} source, got {}", T::KIND, entity.kind());
            ResolveError::TypeMismatch { expected: T::KIND }
        }),
        None => {
            warn!("Expected {} source, got a non-entity value", T::KIND);
            Err(ResolveError::TypeMismatch { expected: T::KIND })
        }
    }
}

/// One record by id, or the kind's zero value when there is none.
pub fn resolve_single(source: &dyn DataSource, kind: EntityKind, id: i64) -> Entity {
    source
        .get_by_id(kind, id)
        .unwrap_or_else(|| Entity::empty(kind))
}

/// Records of `kind` in ascending id order, optionally filtered, then capped.
pub fn resolve_collection(
    source: &dyn DataSource,
    kind: EntityKind,
    filter: Option<Filter>,
    limit: Option<i64>,
) -> Vec<Entity> {
    let rows = match filter {
        Some(Filter { fk, value }) => source.get_by_foreign_key(kind, fk, value),
        None => source.get_all_ordered(kind),
    };
    apply_limit(rows, limit)
}

/// Keep the first `limit` items. A negative limit keeps nothing.
pub fn apply_limit<T>(mut rows: Vec<T>, limit: Option<i64>) -> Vec<T> {
    if let Some(limit) = limit {
        rows.truncate(usize::try_from(limit).unwrap_or(0));
    }
    rows
}

pub fn entity_value<'a>(entity: Entity) -> FieldValue<'a> {
    FieldValue::owned_any(entity)
}

pub fn entity_list<'a>(rows: Vec<Entity>) -> FieldValue<'a> {
    FieldValue::list(rows.into_iter().map(entity_value))
}
