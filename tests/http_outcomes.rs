//! HTTP Outcome Mapping Tests
//!
//! Every verb on /loc/{xyz} resolves to exactly one outcome:
//! - 200 on success, with the fixed body text per verb
//! - 400 on a malformed path parameter or body record
//! - 404 when the referenced id does not exist
//! - 208 on a duplicate insert
//! - 424 when the backend is unreachable or reports any other failure
//!
//! Requests are driven through the public router with a scripted store
//! that forces each failure mode, so no backend is needed.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use hexloc::hex::Loc;
use hexloc::persistence::{LocationStore, StoreError, StoreResult};
use hexloc::rest_api::LocServer;

const COLLECTION: &str = "testCollection";

// =============================================================================
// Test Utilities
// =============================================================================

/// Store double with one scripted failure per operation class. `connect`
/// gates everything; `read` covers fetch; `write` covers insert, update
/// and delete.
#[derive(Debug, Default)]
struct ScriptedStore {
    connect: Option<StoreError>,
    read: Option<StoreError>,
    write: Option<StoreError>,
}

impl ScriptedStore {
    fn healthy() -> Self {
        Self::default()
    }

    fn unreachable() -> Self {
        Self {
            connect: Some(StoreError::Unavailable(
                "server selection timed out".to_string(),
            )),
            ..Self::default()
        }
    }

    fn read_failure(err: StoreError) -> Self {
        Self {
            read: Some(err),
            ..Self::default()
        }
    }

    fn write_failure(err: StoreError) -> Self {
        Self {
            write: Some(err),
            ..Self::default()
        }
    }

    fn gate(&self) -> StoreResult<()> {
        match &self.connect {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn scripted(&self, slot: &Option<StoreError>) -> StoreResult<()> {
        self.gate()?;
        match slot {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LocationStore for ScriptedStore {
    async fn connect(&self) -> StoreResult<()> {
        self.gate()
    }

    async fn insert(&self, _collection: &str, _loc: &Loc) -> StoreResult<()> {
        self.scripted(&self.write)
    }

    async fn update(&self, _collection: &str, _loc: &Loc) -> StoreResult<()> {
        self.scripted(&self.write)
    }

    async fn fetch(&self, _collection: &str, id: &str) -> StoreResult<Loc> {
        self.scripted(&self.read)?;
        id.parse()
            .map_err(|_| StoreError::Backend(format!("non-canonical id: {}", id)))
    }

    async fn delete(&self, _collection: &str, _id: &str) -> StoreResult<()> {
        self.scripted(&self.write)
    }
}

fn app(store: ScriptedStore) -> Router {
    LocServer::new(store, COLLECTION).router()
}

async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .expect("request should build");
    let response = app.oneshot(request).await.expect("router never fails");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should collect");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}

// =============================================================================
// Default Page
// =============================================================================

#[tokio::test]
async fn default_page_answers_ok() {
    let (status, body) = send(app(ScriptedStore::healthy()), "GET", "/", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("hexloc"), "landing page body: {body}");
}

// =============================================================================
// GET /loc/{xyz}
// =============================================================================

#[tokio::test]
async fn get_returns_the_record_as_json() {
    let (status, body) = send(
        app(ScriptedStore::healthy()),
        "GET",
        "/loc/5.6.7",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"id":"5.6.7","x":5,"y":6,"z":7,"status":"new"}"#);
}

#[tokio::test]
async fn get_missing_record_is_404_naming_the_id() {
    let (status, body) = send(
        app(ScriptedStore::read_failure(StoreError::NotFound)),
        "GET",
        "/loc/15.16.17",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "15.16.17 doesn't exist in DB");
}

#[tokio::test]
async fn get_bad_param_is_rejected_before_the_store() {
    let (status, body) = send(
        app(ScriptedStore::unreachable()),
        "GET",
        "/loc/a.7.tty",
        Body::empty(),
    )
    .await;
    // The unreachable store proves the request never got that far.
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Bad string for param xyz");
}

#[tokio::test]
async fn get_backend_failure_is_424_with_the_cause() {
    let (status, body) = send(
        app(ScriptedStore::read_failure(StoreError::Backend(
            "Mock error on get".to_string(),
        ))),
        "GET",
        "/loc/5.6.7",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::FAILED_DEPENDENCY);
    assert_eq!(body, "Unknown error on Mongo fetch: Mock error on get");
}

// =============================================================================
// PUT and POST /loc/{xyz}
// =============================================================================

#[tokio::test]
async fn put_and_post_both_insert() {
    for method in ["PUT", "POST"] {
        let (status, body) = send(
            app(ScriptedStore::healthy()),
            method,
            "/loc/5.6.7",
            Body::empty(),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{method} should insert");
        assert_eq!(body, "Inserted: 5.6.7", "{method} body");
    }
}

#[tokio::test]
async fn insert_duplicate_is_208_naming_the_id() {
    let (status, body) = send(
        app(ScriptedStore::write_failure(StoreError::DuplicateKey(
            "E11000 duplicate key error".to_string(),
        ))),
        "POST",
        "/loc/5.6.7",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::ALREADY_REPORTED);
    assert_eq!(body, "Duplicate insert for xyz: 5.6.7");
}

#[tokio::test]
async fn insert_bad_param_is_400() {
    let (status, body) = send(
        app(ScriptedStore::healthy()),
        "POST",
        "/loc/31.6*9",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Bad string for param xyz");
}

#[tokio::test]
async fn insert_backend_failure_is_424_with_the_cause() {
    let (status, body) = send(
        app(ScriptedStore::write_failure(StoreError::Backend(
            "Mock error on write".to_string(),
        ))),
        "PUT",
        "/loc/5.6.7",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::FAILED_DEPENDENCY);
    assert_eq!(body, "Unknown error on Mongo insert: Mock error on write");
}

// =============================================================================
// PATCH /loc/{xyz}
// =============================================================================

#[tokio::test]
async fn patch_updates_from_the_body_record() {
    let (status, body) = send(
        app(ScriptedStore::healthy()),
        "PATCH",
        "/loc/5.6.7",
        Body::from(r#"{"id":"5.6.7","x":5,"y":6,"z":7,"status":"occupied"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Updated: 5.6.7");
}

#[tokio::test]
async fn patch_missing_record_is_404() {
    let (status, body) = send(
        app(ScriptedStore::write_failure(StoreError::NotFound)),
        "PATCH",
        "/loc/15.16.17",
        Body::from(r#"{"x":15,"y":16,"z":17,"status":"new"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "15.16.17 doesn't exist in DB");
}

#[tokio::test]
async fn patch_into_missing_collection_is_424() {
    let (status, body) = send(
        app(ScriptedStore::write_failure(StoreError::CollectionMissing(
            COLLECTION.to_string(),
        ))),
        "PATCH",
        "/loc/5.6.7",
        Body::from(r#"{"x":5,"y":6,"z":7}"#),
    )
    .await;
    assert_eq!(status, StatusCode::FAILED_DEPENDENCY);
    assert_eq!(
        body,
        "Unknown error on Mongo update: non-existent collection for update: testCollection"
    );
}

#[tokio::test]
async fn patch_malformed_body_is_400() {
    let (status, body) = send(
        app(ScriptedStore::healthy()),
        "PATCH",
        "/loc/5.6.7",
        Body::from(r#"{"x":5,"z":7,"status":"new"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body.contains("missing one or more x,y,z elements"),
        "body: {body}"
    );
}

#[tokio::test]
async fn patch_body_disagreeing_with_path_is_400() {
    let (status, body) = send(
        app(ScriptedStore::healthy()),
        "PATCH",
        "/loc/5.6.7",
        Body::from(r#"{"x":1,"y":2,"z":3,"status":"new"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Body location 1.2.3 doesn't match param xyz 5.6.7");
}

// =============================================================================
// DELETE /loc/{xyz}
// =============================================================================

#[tokio::test]
async fn delete_confirms_with_the_id() {
    let (status, body) = send(
        app(ScriptedStore::healthy()),
        "DELETE",
        "/loc/5.6.7",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "5.6.7 deleted from DB");
}

#[tokio::test]
async fn delete_missing_record_is_404() {
    let (status, body) = send(
        app(ScriptedStore::write_failure(StoreError::NotFound)),
        "DELETE",
        "/loc/15.16.17",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "15.16.17 doesn't exist in DB");
}

#[tokio::test]
async fn delete_backend_failure_is_424_with_the_cause() {
    let (status, body) = send(
        app(ScriptedStore::write_failure(StoreError::Backend(
            "Mock error on delete".to_string(),
        ))),
        "DELETE",
        "/loc/5.6.7",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::FAILED_DEPENDENCY);
    assert_eq!(body, "Unknown error on Mongo delete: Mock error on delete");
}

// =============================================================================
// Unreachable Backend
// =============================================================================

#[tokio::test]
async fn unreachable_backend_fails_every_verb_the_same_way() {
    let cases = [
        ("GET", Body::empty()),
        ("PUT", Body::empty()),
        ("POST", Body::empty()),
        ("PATCH", Body::from(r#"{"x":5,"y":6,"z":7,"status":"new"}"#)),
        ("DELETE", Body::empty()),
    ];
    for (method, body) in cases {
        let (status, text) = send(app(ScriptedStore::unreachable()), method, "/loc/5.6.7", body).await;
        assert_eq!(
            status,
            StatusCode::FAILED_DEPENDENCY,
            "{method} against a dead backend"
        );
        assert_eq!(text, "MongoDB not available", "{method} body");
    }
}
