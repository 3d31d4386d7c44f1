use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputValue, Object, ResolverContext, Schema, TypeRef,
};
use gallery_data::DataSource;
use gallery_types::{Album, EntityKind, ForeignKey, Photo, Shape, User};
use tracing::{info, trace};

use crate::engine::{self, Filter};
use crate::error::ApiError;
use crate::query::query_root;

/// Data source shared by every resolver through the schema's context data.
pub type Source = Arc<dyn DataSource>;

pub fn build_schema(source: Source) -> Result<Schema, ApiError> {
    build_schema_with_root(source, query_root())
}

/// Build a schema around a caller-supplied root object. The entity types and
/// their resolvers are always the standard ones.
pub fn build_schema_with_root(source: Source, query: Object) -> Result<Schema, ApiError> {
    let query_name = query.type_name().to_string();

    let schema = Schema::build(&query_name, None, None)
        .register(user_type())
        .register(album_type())
        .register(photo_type())
        .register(query)
        .data(source)
        .finish()
        .map_err(|e| ApiError::Schema(format!("{e:?}")))?;

    info!("GraphQL schema ready (root `{}`)", query_name);
    Ok(schema)
}

pub fn user_type() -> Object {
    Object::new(EntityKind::User.type_name())
        .description("A user owning zero or more albums")
        .field(scalar::<User>("id", TypeRef::INT, |u| Value::from(u.id)))
        .field(scalar::<User>("name", TypeRef::STRING, |u| Value::from(u.name.as_str())))
        .field(scalar::<User>("username", TypeRef::STRING, |u| {
            Value::from(u.username.as_str())
        }))
        .field(scalar::<User>("email", TypeRef::STRING, |u| Value::from(u.email.as_str())))
        .field(scalar::<User>("passwordHash", TypeRef::STRING, |u| {
            Value::from(u.password_hash.as_str())
        }))
        .field(relation::<User>("albums", EntityKind::Album, ForeignKey::UserId))
}

pub fn album_type() -> Object {
    Object::new(EntityKind::Album.type_name())
        .description("An album belonging to a user")
        .field(scalar::<Album>("id", TypeRef::INT, |a| Value::from(a.id)))
        .field(scalar::<Album>("userid", TypeRef::INT, |a| Value::from(a.userid)))
        .field(scalar::<Album>("description", TypeRef::STRING, |a| {
            Value::from(a.description.as_str())
        }))
        .field(relation::<Album>("photos", EntityKind::Photo, ForeignKey::AlbumId))
}

pub fn photo_type() -> Object {
    Object::new(EntityKind::Photo.type_name())
        .description("A photo inside an album")
        .field(scalar::<Photo>("id", TypeRef::INT, |p| Value::from(p.id)))
        .field(scalar::<Photo>("albumid", TypeRef::INT, |p| Value::from(p.albumid)))
        .field(scalar::<Photo>("description", TypeRef::STRING, |p| {
            Value::from(p.description.as_str())
        }))
}

/// Nullable scalar read straight off a `T` parent.
fn scalar<T: Shape>(name: &str, ty: &str, read: fn(&T) -> Value) -> Field {
    Field::new(name, TypeRef::named(ty), move |ctx| {
        FieldFuture::new(async move {
            let record = engine::expect_source::<T>(ctx.parent_value)?;
            Ok(Some(FieldValue::value(read(record))))
        })
    })
}

/// List of `child` records whose `fk` points at the `T` parent.
fn relation<T: Shape>(name: &str, child: EntityKind, fk: ForeignKey) -> Field {
    Field::new(name, TypeRef::named_list(child.type_name()), move |ctx| {
        FieldFuture::new(async move {
            let parent = engine::expect_source::<T>(ctx.parent_value)?;
            let source = ctx.data::<Source>()?;
            let limit = optional_int(&ctx, "limit")?;
            trace!("{} {} -> {} (limit {:?})", T::KIND, parent.id(), child, limit);

            let filter = Filter {
                fk,
                value: parent.id(),
            };
            let rows = engine::resolve_collection(source.as_ref(), child, Some(filter), limit);
            Ok(Some(engine::entity_list(rows)))
        })
    })
    .argument(limit_input())
}

pub(crate) fn limit_input() -> InputValue {
    InputValue::new("limit", TypeRef::named(TypeRef::INT))
        .description("Maximum number of items to return")
}

/// Optional integer argument; an explicit `null` counts as absent.
pub(crate) fn optional_int(
    ctx: &ResolverContext<'_>,
    name: &str,
) -> async_graphql::Result<Option<i64>> {
    match ctx.args.get(name) {
        Some(value) if !value.is_null() => Ok(Some(value.i64()?)),
        _ => Ok(None),
    }
}
