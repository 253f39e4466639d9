//! Axum server wiring for the location CRUD surface.
//!
//! One resource, `/loc/{xyz}`, five verbs. Handlers decode the path
//! parameter, consult the store, and map every store failure onto the
//! closed [`LocResponse`] outcome set.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::hex::Loc;
use crate::persistence::{LocationStore, StoreError};

use super::response::LocResponse;

/// Location request server: a store backend plus the collection the HTTP
/// surface operates on.
pub struct LocServer<S: LocationStore> {
    store: Arc<S>,
    collection: String,
}

/// Shared state type
type ServerState<S> = Arc<LocServer<S>>;

impl<S: LocationStore + 'static> LocServer<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            store: Arc::new(store),
            collection: collection.into(),
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/", get(default_page))
            .route(
                "/loc/{xyz}",
                get(fetch_loc::<S>)
                    .put(insert_loc::<S>)
                    .post(insert_loc::<S>)
                    .patch(update_loc::<S>)
                    .delete(delete_loc::<S>),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

/// Liveness landing page.
async fn default_page() -> Html<&'static str> {
    Html("<h2>hexloc location service</h2>")
}

/// Decodes the path parameter. A malformed xyz can never name a record,
/// so every verb rejects it the same way before touching the store.
fn parse_param(xyz: &str) -> Result<Loc, LocResponse> {
    xyz.parse()
        .map_err(|_| LocResponse::BadInput("Bad string for param xyz".to_string()))
}

/// Maps a store failure onto the outcome set for verbs where not-found is
/// about the id named in the path.
fn failure_response(id: &str, op: &str, err: StoreError) -> LocResponse {
    match err {
        StoreError::Unavailable(_) => LocResponse::Unavailable,
        StoreError::NotFound => LocResponse::NotFound(format!("{} doesn't exist in DB", id)),
        err => LocResponse::Failed(format!("Unknown error on Mongo {}: {}", op, err)),
    }
}

/// GET: fetch the record named by the path.
async fn fetch_loc<S: LocationStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(xyz): Path<String>,
) -> LocResponse {
    let loc = match parse_param(&xyz) {
        Ok(loc) => loc,
        Err(resp) => return resp,
    };
    match server.store.fetch(&server.collection, loc.id()).await {
        Ok(found) => LocResponse::Ok(found.to_json()),
        Err(err) => failure_response(loc.id(), "fetch", err),
    }
}

/// PUT and POST: insert a fresh record at the path coordinates.
async fn insert_loc<S: LocationStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(xyz): Path<String>,
) -> LocResponse {
    let loc = match parse_param(&xyz) {
        Ok(loc) => loc,
        Err(resp) => return resp,
    };
    match server.store.insert(&server.collection, &loc).await {
        Ok(()) => LocResponse::Ok(format!("Inserted: {}", loc.id())),
        Err(StoreError::Unavailable(_)) => LocResponse::Unavailable,
        Err(StoreError::DuplicateKey(_)) => {
            LocResponse::Duplicate(format!("Duplicate insert for xyz: {}", loc.id()))
        }
        Err(err) => LocResponse::Failed(format!("Unknown error on Mongo insert: {}", err)),
    }
}

/// PATCH: replace the record named by the path with the body record. The
/// body must decode and agree with the path about which cell it names.
async fn update_loc<S: LocationStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(xyz): Path<String>,
    body: Bytes,
) -> LocResponse {
    let path_loc = match parse_param(&xyz) {
        Ok(loc) => loc,
        Err(resp) => return resp,
    };
    let loc = match Loc::from_json(&body) {
        Ok(loc) => loc,
        Err(err) => return LocResponse::BadInput(format!("Bad location record in body: {}", err)),
    };
    if loc.id() != path_loc.id() {
        return LocResponse::BadInput(format!(
            "Body location {} doesn't match param xyz {}",
            loc.id(),
            path_loc.id()
        ));
    }
    match server.store.update(&server.collection, &loc).await {
        Ok(()) => LocResponse::Ok(format!("Updated: {}", loc.id())),
        Err(err) => failure_response(loc.id(), "update", err),
    }
}

/// DELETE: remove the record named by the path.
async fn delete_loc<S: LocationStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(xyz): Path<String>,
) -> LocResponse {
    let loc = match parse_param(&xyz) {
        Ok(loc) => loc,
        Err(resp) => return resp,
    };
    match server.store.delete(&server.collection, loc.id()).await {
        Ok(()) => LocResponse::Ok(format!("{} deleted from DB", loc.id())),
        Err(err) => failure_response(loc.id(), "delete", err),
    }
}
