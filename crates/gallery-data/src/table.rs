use std::collections::HashMap;

use gallery_types::Shape;

use crate::DataError;

/// Records of one kind keyed by id, with an explicit ascending id index
/// and a parent-id index for foreign-key lookups.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: HashMap<i64, T>,
    order: Vec<i64>,
    children: HashMap<i64, Vec<i64>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
            children: HashMap::new(),
        }
    }
}

impl<T: Shape> Table<T> {
    pub fn build(records: Vec<T>) -> Result<Self, DataError> {
        let mut rows = HashMap::with_capacity(records.len());
        for record in records {
            let id = record.id();
            if id < 0 {
                return Err(DataError::NegativeId { kind: T::KIND, id });
            }
            if rows.insert(id, record).is_some() {
                return Err(DataError::DuplicateId { kind: T::KIND, id });
            }
        }

        let mut order: Vec<i64> = rows.keys().copied().collect();
        order.sort_unstable();

        // Built in id order so every child list is already ascending.
        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        for id in &order {
            if let Some(parent) = rows[id].parent_id() {
                children.entry(parent).or_default().push(*id);
            }
        }

        Ok(Self {
            rows,
            order,
            children,
        })
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }

    pub fn all(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Records whose foreign key equals `parent`, ascending by id.
    pub fn children_of(&self, parent: i64) -> Vec<T> {
        self.children
            .get(&parent)
            .map(|ids| ids.iter().filter_map(|id| self.rows.get(id)).cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn check_parents<P: Shape>(&self, parents: &Table<P>) -> Result<(), DataError> {
        let Some(fk) = T::KIND.foreign_key() else {
            return Ok(());
        };
        for record in self.iter() {
            let Some(value) = record.parent_id() else {
                continue;
            };
            if parents.get(value).is_none() {
                return Err(DataError::DanglingReference {
                    kind: T::KIND,
                    id: record.id(),
                    fk,
                    value,
                });
            }
        }
        Ok(())
    }
}
