// salon-client/tests/rest_backend.rs
// REST adapters against a stub HTTP server

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use salon_client::models::{OpeningHourUpdate, ServiceCreate, SiteContentUpsert};
use salon_client::repository::rest::{
    RestContactInfoRepository, RestImageStorage, RestOpeningHoursRepository,
    RestServiceRepository, RestSiteContentRepository,
};
use salon_client::repository::{
    ContactInfoRepository, ImageStorage, OpeningHoursRepository, ServiceRepository,
    SiteContentRepository,
};
use salon_client::{
    AuthEvent, Backend, ClientConfig, ClientError, RestClient, ServiceScope, ServiceStore,
};
use serde_json::{Value, json};

const ANON_KEY: &str = "anon-key";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
}

impl Recorded {
    fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Default)]
struct Stub {
    replies: Mutex<VecDeque<(StatusCode, String)>>,
    requests: Mutex<Vec<Recorded>>,
}

async fn record(
    State(stub): State<Arc<Stub>>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    stub.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body,
    });
    let (status, body) = stub
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::OK, "[]".to_string()));
    (status, [("content-type", "application/json")], body)
}

struct Server {
    stub: Arc<Stub>,
    client: RestClient,
}

impl Server {
    async fn start() -> Self {
        let stub = Arc::new(Stub::default());
        let app = Router::new().fallback(record).with_state(stub.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = ClientConfig::new(format!("http://{addr}"), ANON_KEY).unwrap();
        let client = RestClient::new(config).unwrap();
        Self { stub, client }
    }

    fn reply(&self, status: StatusCode, body: Value) {
        self.stub
            .replies
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    fn requests(&self) -> Vec<Recorded> {
        self.stub.requests.lock().unwrap().clone()
    }

    fn last(&self) -> Recorded {
        self.requests().pop().unwrap()
    }
}

fn service_row(name: &str, active: bool) -> Value {
    json!({
        "id": "6f1c1d2e-3a4b-4c5d-8e9f-0a1b2c3d4e5f",
        "name": name,
        "description": "",
        "price_from": 25,
        "icon": "Scissors",
        "category": "coupe",
        "is_active": active,
        "order_index": 0,
        "created_at": "2025-01-10T09:00:00Z",
        "updated_at": null
    })
}

fn session_body() -> Value {
    json!({
        "access_token": "user-jwt",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh",
        "user": { "id": "11111111-2222-4333-8444-555555555555", "email": "admin@salon.fr" }
    })
}

#[tokio::test]
async fn test_active_services_query() {
    let server = Server::start().await;
    server.reply(StatusCode::OK, json!([service_row("Coupe Homme", true)]));

    let repo = RestServiceRepository::new(server.client.clone());
    let services = repo.list(ServiceScope::ActiveOnly).await.unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].price_from, Decimal::new(25, 0));

    let req = server.last();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/rest/v1/services");
    assert_eq!(req.param("select"), Some("*"));
    assert_eq!(req.param("is_active"), Some("eq.true"));
    assert_eq!(req.param("order"), Some("order_index.asc"));
    assert_eq!(req.header("apikey"), Some(ANON_KEY));
    assert_eq!(req.header("authorization"), Some("Bearer anon-key"));
}

#[tokio::test]
async fn test_admin_scope_has_no_active_filter() {
    let server = Server::start().await;
    let repo = RestServiceRepository::new(server.client.clone());
    repo.list(ServiceScope::All).await.unwrap();
    assert_eq!(server.last().param("is_active"), None);
}

#[tokio::test]
async fn test_insert_asks_for_representation() {
    let server = Server::start().await;
    server.reply(StatusCode::CREATED, json!([service_row("Coupe Homme", true)]));

    let repo = RestServiceRepository::new(server.client.clone());
    let created = repo
        .insert(&ServiceCreate::new("Coupe Homme", Decimal::new(25, 0)).with_category("coupe"))
        .await
        .unwrap();
    assert_eq!(created.name, "Coupe Homme");

    let req = server.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.header("prefer"), Some("return=representation"));
    let body = req.json();
    assert_eq!(body["name"], "Coupe Homme");
    assert_eq!(body["price_from"], json!(25.0));
    assert_eq!(body["category"], "coupe");
}

#[tokio::test]
async fn test_close_day_nulls_times() {
    let server = Server::start().await;
    server.reply(
        StatusCode::OK,
        json!([{
            "id": "6f1c1d2e-3a4b-4c5d-8e9f-0a1b2c3d4e5f",
            "day_of_week": 1,
            "is_open": false,
            "opening_time": null,
            "closing_time": null,
            "updated_at": null
        }]),
    );

    let repo = RestOpeningHoursRepository::new(server.client.clone());
    let hour = repo.update(1, &OpeningHourUpdate::closed()).await.unwrap();
    assert!(!hour.is_open);

    let req = server.last();
    assert_eq!(req.method, Method::PATCH);
    assert_eq!(req.path, "/rest/v1/opening_hours");
    assert_eq!(req.param("day_of_week"), Some("eq.1"));
    assert_eq!(
        req.json(),
        json!({ "is_open": false, "opening_time": null, "closing_time": null })
    );
}

#[tokio::test]
async fn test_update_matching_nothing_is_not_found() {
    let server = Server::start().await;
    server.reply(StatusCode::OK, json!([]));

    let repo = RestOpeningHoursRepository::new(server.client.clone());
    let err = repo
        .update(3, &OpeningHourUpdate::open_default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_upsert_merges_on_section_key() {
    let server = Server::start().await;
    server.reply(
        StatusCode::CREATED,
        json!([{
            "id": "6f1c1d2e-3a4b-4c5d-8e9f-0a1b2c3d4e5f",
            "section": "hero",
            "key": "title",
            "value": "Bienvenue",
            "type": "text",
            "updated_at": null
        }]),
    );

    let repo = RestSiteContentRepository::new(server.client.clone());
    let row = repo
        .upsert(&SiteContentUpsert::text("hero", "title", "Bienvenue"))
        .await
        .unwrap();
    assert_eq!(row.value, "Bienvenue");

    let req = server.last();
    assert_eq!(req.param("on_conflict"), Some("section,key"));
    assert_eq!(
        req.header("prefer"),
        Some("resolution=merge-duplicates,return=representation")
    );
    assert_eq!(req.json()["type"], "text");
}

#[tokio::test]
async fn test_backend_error_message_reaches_store() {
    let server = Server::start().await;
    server.reply(
        StatusCode::CONFLICT,
        json!({
            "code": "23514",
            "details": null,
            "hint": null,
            "message": "new row violates check constraint"
        }),
    );

    let backend = Backend::rest(server.client.clone());
    let mut store = ServiceStore::new(backend.services.clone());
    let err = store
        .create(ServiceCreate::new("Coupe", Decimal::new(10, 0)))
        .await
        .unwrap_err();

    match &err {
        ClientError::Api { status, code, .. } => {
            assert_eq!(*status, 409);
            assert_eq!(code.as_deref(), Some("23514"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.error(), Some("new row violates check constraint"));
    // only the failed insert went out
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_missing_contact_row_is_none() {
    let server = Server::start().await;
    let repo = RestContactInfoRepository::new(server.client.clone());
    assert!(repo.get_first().await.unwrap().is_none());
    assert_eq!(server.last().param("limit"), Some("1"));
}

#[tokio::test]
async fn test_upload_posts_raw_bytes() {
    let server = Server::start().await;
    server.reply(StatusCode::OK, json!({ "Key": "images/gallery/a.png" }));

    let storage = RestImageStorage::new(server.client.clone(), "images");
    let path = storage
        .upload("gallery/a.png", vec![1, 2, 3], "image/png")
        .await
        .unwrap();
    assert_eq!(path, "gallery/a.png");
    assert!(storage.public_url(&path).ends_with("/storage/v1/object/public/images/gallery/a.png"));

    let req = server.last();
    assert_eq!(req.path, "/storage/v1/object/images/gallery/a.png");
    assert_eq!(req.header("content-type"), Some("image/png"));
    assert_eq!(req.body.as_ref(), &[1, 2, 3]);
}

#[tokio::test]
async fn test_sign_in_switches_bearer_token() {
    let server = Server::start().await;
    let mut events = server.client.on_auth_state_change();
    server.reply(StatusCode::OK, session_body());

    let session = server
        .client
        .sign_in_with_password("admin@salon.fr", "secret")
        .await
        .unwrap();
    assert_eq!(session.email(), Some("admin@salon.fr"));
    assert!(session.expires_at.is_some());
    assert!(matches!(events.recv().await, Some(AuthEvent::SignedIn(_))));

    let req = server.last();
    assert_eq!(req.path, "/auth/v1/token");
    assert_eq!(req.param("grant_type"), Some("password"));
    assert_eq!(req.json(), json!({ "email": "admin@salon.fr", "password": "secret" }));

    let repo = RestSiteContentRepository::new(server.client.clone());
    repo.list().await.unwrap();
    assert_eq!(server.last().header("authorization"), Some("Bearer user-jwt"));

    server.reply(StatusCode::OK, json!({}));
    server.client.sign_out().await.unwrap();
    assert_eq!(server.last().path, "/auth/v1/logout");
    assert!(server.client.get_session().await.is_none());
    assert_eq!(events.recv().await, Some(AuthEvent::SignedOut));
}

#[tokio::test]
async fn test_rejected_credentials() {
    let server = Server::start().await;
    server.reply(
        StatusCode::BAD_REQUEST,
        json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" }),
    );

    let err = server
        .client
        .sign_in_with_password("admin@salon.fr", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(&err, ClientError::Auth(m) if m == "Invalid login credentials"));
    assert!(server.client.get_session().await.is_none());
}

#[tokio::test]
async fn test_sign_out_clears_even_when_remote_fails() {
    let server = Server::start().await;
    server.reply(StatusCode::OK, session_body());
    server
        .client
        .sign_in_with_password("admin@salon.fr", "secret")
        .await
        .unwrap();

    server.reply(StatusCode::INTERNAL_SERVER_ERROR, json!({ "msg": "boom" }));
    assert!(server.client.sign_out().await.is_err());
    assert!(server.client.get_session().await.is_none());
}
