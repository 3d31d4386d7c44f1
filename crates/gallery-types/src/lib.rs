pub mod models;
pub mod seq;

pub use models::{Album, Entity, EntityKind, ForeignKey, Photo, Shape, User};
