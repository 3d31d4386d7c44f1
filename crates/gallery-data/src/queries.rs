use gallery_types::{Entity, EntityKind, ForeignKey, Shape};
use tracing::warn;

use crate::{DataSource, MemoryStore};

impl DataSource for MemoryStore {
    fn get_by_id(&self, kind: EntityKind, id: i64) -> Option<Entity> {
        match kind {
            EntityKind::User => self.users().get(id).cloned().map(Shape::into_entity),
            EntityKind::Album => self.albums().get(id).cloned().map(Shape::into_entity),
            EntityKind::Photo => self.photos().get(id).cloned().map(Shape::into_entity),
        }
    }

    fn get_all_ordered(&self, kind: EntityKind) -> Vec<Entity> {
        match kind {
            EntityKind::User => entities(self.users().all()),
            EntityKind::Album => entities(self.albums().all()),
            EntityKind::Photo => entities(self.photos().all()),
        }
    }

    fn get_by_foreign_key(&self, kind: EntityKind, fk: ForeignKey, value: i64) -> Vec<Entity> {
        if kind.foreign_key() != Some(fk) {
            warn!("{} has no foreign key {}", kind, fk);
            return vec![];
        }
        match kind {
            EntityKind::Album => entities(self.albums().children_of(value)),
            EntityKind::Photo => entities(self.photos().children_of(value)),
            EntityKind::User => vec![],
        }
    }
}

fn entities<T: Shape>(rows: Vec<T>) -> Vec<Entity> {
    rows.into_iter().map(Shape::into_entity).collect()
}
