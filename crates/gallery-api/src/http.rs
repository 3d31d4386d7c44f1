use std::sync::Arc;

use async_graphql::dynamic::Schema;
use async_graphql::http::GraphiQLSource;
use axum::{Json, extract::State, response::Html};
use tracing::{debug, warn};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub schema: Schema,
}

/// POST /graphql
pub async fn graphql(
    State(state): State<AppState>,
    Json(req): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    debug!("GraphQL request (operation {:?})", req.operation_name);

    let resp = state.schema.execute(req).await;
    if !resp.errors.is_empty() {
        warn!("GraphQL response carries {} error(s)", resp.errors.len());
    }
    Json(resp)
}

/// GET /graphql, only routed when the playground is enabled.
pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub async fn health() -> &'static str {
    "ok"
}
