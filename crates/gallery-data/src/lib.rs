pub mod queries;
pub mod seed;
pub mod table;

use gallery_types::{Album, Entity, EntityKind, ForeignKey, Photo, User};
use thiserror::Error;
use tracing::info;

pub use seed::SeedConfig;
pub use table::Table;

/// Read-only lookups the resolvers run against. Implementations must return
/// sequences in ascending id order.
pub trait DataSource: Send + Sync {
    fn get_by_id(&self, kind: EntityKind, id: i64) -> Option<Entity>;

    fn get_all_ordered(&self, kind: EntityKind) -> Vec<Entity>;

    /// All `kind` records whose `fk` equals `value`.
    fn get_by_foreign_key(&self, kind: EntityKind, fk: ForeignKey, value: i64) -> Vec<Entity>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("{kind} id {id} is negative")]
    NegativeId { kind: EntityKind, id: i64 },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: EntityKind, id: i64 },
    #[error("{kind} {id} references missing {fk} {value}")]
    DanglingReference {
        kind: EntityKind,
        id: i64,
        fk: ForeignKey,
        value: i64,
    },
}

/// The whole dataset, built once and shared read-only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Table<User>,
    albums: Table<Album>,
    photos: Table<Photo>,
}

impl MemoryStore {
    pub fn from_records(
        users: Vec<User>,
        albums: Vec<Album>,
        photos: Vec<Photo>,
    ) -> Result<Self, DataError> {
        let users = Table::build(users)?;
        let albums = Table::build(albums)?;
        let photos = Table::build(photos)?;

        albums.check_parents(&users)?;
        photos.check_parents(&albums)?;

        info!(
            "Dataset loaded: {} users, {} albums, {} photos",
            users.len(),
            albums.len(),
            photos.len()
        );
        Ok(Self {
            users,
            albums,
            photos,
        })
    }

    pub fn users(&self) -> &Table<User> {
        &self.users
    }

    pub fn albums(&self) -> &Table<Album> {
        &self.albums
    }

    pub fn photos(&self) -> &Table<Photo> {
        &self.photos
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::User => self.users.len(),
            EntityKind::Album => self.albums.len(),
            EntityKind::Photo => self.photos.len(),
        }
    }
}
