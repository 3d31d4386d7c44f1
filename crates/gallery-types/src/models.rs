use std::fmt;

use serde::{Deserialize, Serialize};

// -- Records --

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    /// Opaque to the API; never interpreted.
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: i64,
    pub userid: i64,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub albumid: i64,
    pub description: String,
}

// -- Kinds --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Album,
    Photo,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::User, EntityKind::Album, EntityKind::Photo];

    /// GraphQL object type name for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Album => "Album",
            Self::Photo => "Photo",
        }
    }

    /// The reference this kind holds to its parent, if any.
    pub fn foreign_key(self) -> Option<ForeignKey> {
        match self {
            Self::User => None,
            Self::Album => Some(ForeignKey::UserId),
            Self::Photo => Some(ForeignKey::AlbumId),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKey {
    /// `Album.userid -> User.id`
    UserId,
    /// `Photo.albumid -> Album.id`
    AlbumId,
}

impl ForeignKey {
    pub fn name(self) -> &'static str {
        match self {
            Self::UserId => "userid",
            Self::AlbumId => "albumid",
        }
    }

    /// Kind of entity the key points at.
    pub fn parent(self) -> EntityKind {
        match self {
            Self::UserId => EntityKind::User,
            Self::AlbumId => EntityKind::Album,
        }
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -- Tagged union --

/// Any record the data source can hand out. Resolvers receive their parent
/// as an `Entity` and check the variant before reading from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    User(User),
    Album(Album),
    Photo(Photo),
}

impl Entity {
    /// The zero value returned for lookups that find nothing.
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::User => Self::User(User::default()),
            EntityKind::Album => Self::Album(Album::default()),
            EntityKind::Photo => Self::Photo(Photo::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Album(_) => EntityKind::Album,
            Self::Photo(_) => EntityKind::Photo,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::User(u) => u.id,
            Self::Album(a) => a.id,
            Self::Photo(p) => p.id,
        }
    }

    pub fn foreign_key_value(&self) -> Option<i64> {
        match self {
            Self::User(_) => None,
            Self::Album(a) => Some(a.userid),
            Self::Photo(p) => Some(p.albumid),
        }
    }
}

/// Implemented by each record type so code generic over the record can
/// move between the concrete struct and the `Entity` union.
pub trait Shape: Sized + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn from_entity(entity: &Entity) -> Option<&Self>;

    fn into_entity(self) -> Entity;

    fn id(&self) -> i64;

    /// Value of this record's foreign key, `None` for roots.
    fn parent_id(&self) -> Option<i64>;
}

impl Shape for User {
    const KIND: EntityKind = EntityKind::User;

    fn from_entity(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::User(u) => Some(u),
            _ => None,
        }
    }

    fn into_entity(self) -> Entity {
        Entity::User(self)
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        None
    }
}

impl Shape for Album {
    const KIND: EntityKind = EntityKind::Album;

    fn from_entity(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::Album(a) => Some(a),
            _ => None,
        }
    }

    fn into_entity(self) -> Entity {
        Entity::Album(self)
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        Some(self.userid)
    }
}

impl Shape for Photo {
    const KIND: EntityKind = EntityKind::Photo;

    fn from_entity(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::Photo(p) => Some(p),
            _ => None,
        }
    }

    fn into_entity(self) -> Entity {
        Entity::Photo(self)
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        Some(self.albumid)
    }
}
