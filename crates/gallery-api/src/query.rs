use async_graphql::dynamic::{Field, FieldFuture, InputValue, Object, TypeRef};
use gallery_types::{EntityKind, ForeignKey};
use tracing::debug;

use crate::engine::{self, Filter};
use crate::schema::{Source, limit_input, optional_int};

pub const QUERY: &str = "Query";

/// The six entry points: a by-id lookup and a list for each entity kind.
pub fn query_root() -> Object {
    Object::new(QUERY)
        .field(lookup_field(EntityKind::User).description("User by id"))
        .field(list_field(EntityKind::User, None).description("All users"))
        .field(lookup_field(EntityKind::Album).description("Album by id"))
        .field(
            list_field(EntityKind::Album, Some(ForeignKey::UserId))
                .description("All albums, optionally only those owned by `userid`"),
        )
        .field(lookup_field(EntityKind::Photo).description("Photo by id"))
        .field(
            list_field(EntityKind::Photo, Some(ForeignKey::AlbumId))
                .description("All photos, optionally only those in `albumid`"),
        )
}

/// `<kind>(id: Int!)`. Unknown ids resolve to the kind's empty record.
pub fn lookup_field(kind: EntityKind) -> Field {
    let name = kind.type_name().to_lowercase();
    Field::new(name, TypeRef::named(kind.type_name()), move |ctx| {
        FieldFuture::new(async move {
            let id = ctx.args.try_get("id")?.i64()?;
            let source = ctx.data::<Source>()?;
            debug!("Resolving {} {}", kind, id);

            let entity = engine::resolve_single(source.as_ref(), kind, id);
            Ok(Some(engine::entity_value(entity)))
        })
    })
    .argument(
        InputValue::new("id", TypeRef::named_nn(TypeRef::INT))
            .description(format!("id of the {}", kind.type_name().to_lowercase())),
    )
}

/// `<kind>s(<fk>: Int, limit: Int)`. The foreign-key argument is only
/// declared when `filter` is given.
pub fn list_field(kind: EntityKind, filter: Option<ForeignKey>) -> Field {
    let name = format!("{}s", kind.type_name().to_lowercase());
    let mut field = Field::new(name, TypeRef::named_list(kind.type_name()), move |ctx| {
        FieldFuture::new(async move {
            let source = ctx.data::<Source>()?;
            let filter = match filter {
                Some(fk) => optional_int(&ctx, fk.name())?.map(|value| Filter { fk, value }),
                None => None,
            };
            let limit = optional_int(&ctx, "limit")?;
            debug!("Resolving {} list (filter {:?}, limit {:?})", kind, filter, limit);

            let rows = engine::resolve_collection(source.as_ref(), kind, filter, limit);
            Ok(Some(engine::entity_list(rows)))
        })
    });

    if let Some(fk) = filter {
        field = field.argument(
            InputValue::new(fk.name(), TypeRef::named(TypeRef::INT))
                .description(format!("Only items whose {} matches", fk.name())),
        );
    }
    field.argument(limit_input())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_graphql::dynamic::Schema;
    use async_graphql::{Request, Response, Variables};
    use gallery_data::{MemoryStore, SeedConfig};
    use gallery_types::seq::{filter, single};
    use gallery_types::{Album, Photo, User};
    use serde::Deserialize;
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};

    use crate::build_schema;

    struct Fixture {
        store: Arc<MemoryStore>,
        schema: Schema,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(
            MemoryStore::seeded(&SeedConfig {
                users: 10,
                albums: 30,
                photos: 150,
                seed: Some(42),
            })
            .unwrap(),
        );
        let schema = build_schema(store.clone()).unwrap();
        Fixture { store, schema }
    }

    impl Fixture {
        async fn run(&self, query: &str, variables: Value) -> Response {
            let request = Request::new(query).variables(Variables::from_json(variables));
            self.schema.execute(request).await
        }

        /// Runs `query`, asserts it produced no errors and returns `data[field]`.
        async fn data<T: DeserializeOwned>(&self, query: &str, variables: Value, field: &str) -> T {
            let resp = self.run(query, variables).await;
            assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
            let data = resp.data.into_json().unwrap();
            serde_json::from_value(data[field].clone()).unwrap()
        }

        /// The user owning the most albums, so limit tests have room to cut.
        fn busiest_user(&self) -> i64 {
            self.store
                .users()
                .iter()
                .max_by_key(|u| self.store.albums().children_of(u.id).len())
                .map(|u| u.id)
                .unwrap()
        }

        fn busiest_album(&self) -> i64 {
            self.store
                .albums()
                .iter()
                .max_by_key(|a| self.store.photos().children_of(a.id).len())
                .map(|a| a.id)
                .unwrap()
        }
    }

    #[derive(Debug, Deserialize)]
    struct UserWithAlbums {
        id: i64,
        albums: Vec<Album>,
    }

    #[derive(Debug, Deserialize)]
    struct AlbumWithPhotos {
        #[serde(flatten)]
        album: Album,
        photos: Option<Vec<Photo>>,
    }

    const USER_FIELDS: &str = "id name username email passwordHash";

    // -- user / users --

    #[tokio::test]
    async fn user_by_id_matches_store() {
        let f = fixture();
        for expected in f.store.users().iter() {
            let query = format!("{{ user(id: {}) {{ {USER_FIELDS} }} }}", expected.id);
            let user: User = f.data(&query, json!({}), "user").await;
            assert_eq!(&user, expected);
        }
    }

    #[tokio::test]
    async fn unknown_user_is_empty_not_an_error() {
        let f = fixture();
        for id in [-1, 10, 1_000] {
            let query = format!("{{ user(id: {id}) {{ {USER_FIELDS} }} }}");
            let user: User = f.data(&query, json!({}), "user").await;
            assert_eq!(user, User::default());
        }
    }

    #[tokio::test]
    async fn users_returns_everything_in_order() {
        let f = fixture();
        let query = format!("{{ users {{ {USER_FIELDS} }} }}");
        let users: Vec<User> = f.data(&query, json!({}), "users").await;
        assert_eq!(users, f.store.users().all());
    }

    #[tokio::test]
    async fn users_limit() {
        let f = fixture();
        let total = f.store.users().len() as i64;
        let query = "query ($limit: Int) { users(limit: $limit) { id name username } }";

        for (limit, expected) in [(total - 1, total - 1), (total, total), (total + 1, total), (0, 0)] {
            let users: Vec<Value> = f.data(query, json!({ "limit": limit }), "users").await;
            assert_eq!(users.len() as i64, expected, "limit {limit}");
        }
    }

    #[tokio::test]
    async fn user_albums_match_filtered_albums() {
        let f = fixture();
        let query = "query ($id: Int!, $limit: Int) {
            user(id: $id) { id albums(limit: $limit) { id userid description } }
            albums(userid: $id, limit: $limit) { id userid description }
        }";

        for user in f.store.users().iter() {
            for limit in [Value::Null, json!(0), json!(1), json!(3)] {
                let vars = json!({ "id": user.id, "limit": limit });
                let resp = f.run(query, vars).await;
                assert!(resp.errors.is_empty());

                let data = resp.data.into_json().unwrap();
                let nested: UserWithAlbums = serde_json::from_value(data["user"].clone()).unwrap();
                let direct: Vec<Album> = serde_json::from_value(data["albums"].clone()).unwrap();
                assert_eq!(nested.id, user.id);
                assert_eq!(nested.albums, direct);
            }
        }
    }

    #[tokio::test]
    async fn user_albums_limit() {
        let f = fixture();
        let id = f.busiest_user();
        let size = f.store.albums().children_of(id).len() as i64;
        let query = "query ($id: Int!, $limit: Int) {
            user(id: $id) { id albums(limit: $limit) { id userid description } }
        }";

        for (limit, expected) in [(size - 1, size - 1), (size + 1, size)] {
            let user: UserWithAlbums = f.data(query, json!({ "id": id, "limit": limit }), "user").await;
            assert_eq!(user.albums.len() as i64, expected);
        }
    }

    // -- album / albums --

    #[tokio::test]
    async fn album_by_id_matches_store() {
        let f = fixture();
        let query = "query ($id: Int!, $withPhotos: Boolean = false) {
            album(id: $id) {
                id
                userid
                description
                photos @include(if: $withPhotos) { id albumid description }
            }
        }";

        for expected in f.store.albums().iter() {
            let album: AlbumWithPhotos = f.data(query, json!({ "id": expected.id }), "album").await;
            assert_eq!(&album.album, expected);
            assert!(album.photos.is_none());
        }
    }

    #[tokio::test]
    async fn album_photos_included_on_request() {
        let f = fixture();
        let query = "query ($id: Int!, $withPhotos: Boolean = false) {
            album(id: $id) {
                id
                userid
                description
                photos @include(if: $withPhotos) { id albumid description }
            }
        }";

        for album in f.store.albums().iter() {
            let vars = json!({ "id": album.id, "withPhotos": true });
            let resp: AlbumWithPhotos = f.data(query, vars, "album").await;
            assert_eq!(resp.photos, Some(f.store.photos().children_of(album.id)));
        }
    }

    #[tokio::test]
    async fn unknown_album_is_empty_not_an_error() {
        let f = fixture();
        let query = "query ($id: Int!) { album(id: $id) { id userid description } }";
        let album: Album = f.data(query, json!({ "id": -1 }), "album").await;
        assert_eq!(album, Album::default());
    }

    #[tokio::test]
    async fn albums_returns_everything_in_order() {
        let f = fixture();
        let albums: Vec<Album> = f.data("{ albums { id userid description } }", json!({}), "albums").await;
        assert_eq!(albums, f.store.albums().all());
    }

    #[tokio::test]
    async fn albums_by_userid_is_the_ordered_subset() {
        let f = fixture();
        let all = f.store.albums().all();
        let query = "query ($id: Int!) { albums(userid: $id) { id userid description } }";

        for user in f.store.users().iter() {
            let albums: Vec<Album> = f.data(query, json!({ "id": user.id }), "albums").await;
            assert_eq!(albums, filter(&all, |a| a.userid == user.id));
        }

        let none: Vec<Album> = f.data(query, json!({ "id": 999 }), "albums").await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn albums_by_userid_with_limit_takes_lowest_ids() {
        let f = fixture();
        let query = "{ albums(userid: 0, limit: 1) { id userid description } }";
        let albums: Vec<Album> = f.data(query, json!({}), "albums").await;

        let expected: Vec<Album> = f.store.albums().children_of(0).into_iter().take(1).collect();
        assert_eq!(albums, expected);
        if let Some(first) = albums.first() {
            let owned = f.store.albums().children_of(0);
            assert!(owned.iter().all(|a| a.id >= first.id));
        }
    }

    #[tokio::test]
    async fn albums_limit() {
        let f = fixture();
        let total = f.store.albums().len() as i64;
        let query = "query ($limit: Int!) { albums(limit: $limit) { id userid description } }";

        for (limit, expected) in [(total - 1, total - 1), (total + 1, total)] {
            let albums: Vec<Album> = f.data(query, json!({ "limit": limit }), "albums").await;
            assert_eq!(albums.len() as i64, expected);
        }
    }

    #[tokio::test]
    async fn album_photos_match_filtered_photos() {
        let f = fixture();
        let query = "query ($id: Int!, $limit: Int) {
            album(id: $id) { id userid description photos(limit: $limit) { id albumid description } }
            photos(albumid: $id, limit: $limit) { id albumid description }
        }";

        for album in f.store.albums().iter() {
            for limit in [Value::Null, json!(0), json!(2)] {
                let resp = f.run(query, json!({ "id": album.id, "limit": limit })).await;
                assert!(resp.errors.is_empty());

                let data = resp.data.into_json().unwrap();
                let nested: AlbumWithPhotos = serde_json::from_value(data["album"].clone()).unwrap();
                let direct: Vec<Photo> = serde_json::from_value(data["photos"].clone()).unwrap();
                assert_eq!(nested.photos, Some(direct));
            }
        }
    }

    #[tokio::test]
    async fn album_photos_limit() {
        let f = fixture();
        let id = f.busiest_album();
        let size = f.store.photos().children_of(id).len() as i64;
        let query = "query ($id: Int!, $limit: Int) { album(id: $id) { id photos(limit: $limit) { id } } }";

        for (limit, expected) in [(size - 1, size - 1), (size + 1, size)] {
            let album: Value = f.data(query, json!({ "id": id, "limit": limit }), "album").await;
            assert_eq!(album["photos"].as_array().unwrap().len() as i64, expected);
        }
    }

    // -- photo / photos --

    #[tokio::test]
    async fn photo_by_id_matches_store() {
        let f = fixture();
        let photos = f.store.photos().all();
        let query = "query ($id: Int!) { photo(id: $id) { id albumid description } }";

        for id in [0, 1, 75, 149] {
            let photo: Photo = f.data(query, json!({ "id": id }), "photo").await;
            assert_eq!(&photo, single(&photos, |p| p.id == id).unwrap());
        }
    }

    #[tokio::test]
    async fn unknown_photo_is_empty_not_an_error() {
        let f = fixture();
        let photo: Photo = f.data("{ photo(id: -1) { id albumid description } }", json!({}), "photo").await;
        assert_eq!(photo, Photo::default());
    }

    #[tokio::test]
    async fn photos_returns_everything_in_order() {
        let f = fixture();
        let photos: Vec<Photo> = f.data("{ photos { id albumid description } }", json!({}), "photos").await;
        assert_eq!(photos, f.store.photos().all());
    }

    #[tokio::test]
    async fn photos_by_albumid_is_the_ordered_subset() {
        let f = fixture();
        let all = f.store.photos().all();
        let query = "query ($id: Int!) { photos(albumid: $id) { id albumid description } }";

        for album in f.store.albums().iter() {
            let photos: Vec<Photo> = f.data(query, json!({ "id": album.id }), "photos").await;
            assert_eq!(photos, filter(&all, |p| p.albumid == album.id));
        }
    }

    #[tokio::test]
    async fn photos_limit() {
        let f = fixture();
        let total = f.store.photos().len() as i64;
        let query = "query ($limit: Int) { photos(limit: $limit) { id albumid description } }";

        for (limit, expected) in [(5, 5), (total - 1, total - 1), (total + 1, total), (-4, 0)] {
            let photos: Vec<Photo> = f.data(query, json!({ "limit": limit }), "photos").await;
            assert_eq!(photos.len() as i64, expected, "limit {limit}");
        }
    }

    #[tokio::test]
    async fn photos_limit_zero_is_empty_without_errors() {
        let f = fixture();
        let resp = f.run("{ photos(limit: 0) { id } }", json!({})).await;
        assert!(resp.errors.is_empty());
        let data = resp.data.into_json().unwrap();
        assert_eq!(data["photos"], json!([]));
    }

    #[tokio::test]
    async fn missing_required_id_is_rejected_before_resolving() {
        let f = fixture();
        let resp = f.run("{ photo { id } }", json!({})).await;
        assert_eq!(resp.errors.len(), 1);
    }
}
