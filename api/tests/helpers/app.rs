use api::auth::{
    AuthOutcome, Authenticator, JwtAuthenticator, generate_session_token,
    middleware::log_request,
};
use api::routes::routes;
use api::state::AppState;
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header::{CONTENT_TYPE, COOKIE}, request::Parts},
    middleware::from_fn,
    response::Response,
};
use db::models::{
    custom_field::{CustomFieldType, Model as CustomFieldModel, NewCustomField},
    queue::Model as QueueModel,
    ticket::{Model as TicketModel, Priority},
    user::Model as UserModel,
};
use db::test_utils::setup_test_db;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tempfile::TempDir;
use util::config;

/// A router over a fresh in-memory database, seeded with the standard
/// fixture: queue "Test Queue", ticket "Sample ticket" and an optional
/// `extra_info` custom field, plus one staff and one non-staff user.
pub struct TestApp {
    pub app: Router,
    pub db: DatabaseConnection,
    pub storage: TempDir,
    pub queue: QueueModel,
    pub ticket: TicketModel,
    pub extra_info: CustomFieldModel,
    pub staff: UserModel,
    pub customer: UserModel,
}

/// Always answers with the same outcome.
pub struct StaticAuthenticator(pub AuthOutcome);

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, _parts: &Parts) -> AuthOutcome {
        self.0.clone()
    }
}

pub async fn make_test_app() -> TestApp {
    build(None).await
}

pub async fn make_test_app_with(authenticator: Arc<dyn Authenticator>) -> TestApp {
    build(Some(authenticator)).await
}

async fn build(authenticator: Option<Arc<dyn Authenticator>>) -> TestApp {
    let db = setup_test_db().await;
    let storage = TempDir::new().expect("Failed to create storage dir");

    let queue = QueueModel::create(&db, "Test Queue", "test").await.unwrap();
    let ticket = TicketModel::create(
        &db,
        queue.id,
        "Sample ticket",
        Some("submitter@example.com"),
        Priority::Normal,
        "",
    )
    .await
    .unwrap();
    let extra_info = CustomFieldModel::create(
        &db,
        NewCustomField {
            max_length: Some(50),
            ..NewCustomField::new("extra_info", "Extra Info", CustomFieldType::Varchar)
        },
    )
    .await
    .unwrap();
    let staff = UserModel::create(&db, "staff", "staff@example.com", "password123", true)
        .await
        .unwrap();
    let customer = UserModel::create(&db, "customer", "customer@example.com", "password123", false)
        .await
        .unwrap();

    let authenticator =
        authenticator.unwrap_or_else(|| Arc::new(JwtAuthenticator::new(db.clone())));
    let app_state = AppState::new(db.clone(), authenticator, storage.path().to_path_buf());
    let app = routes(app_state).layer(from_fn(log_request));

    TestApp {
        app,
        db,
        storage,
        queue,
        ticket,
        extra_info,
        staff,
        customer,
    }
}

/// `Cookie` header value carrying a valid session for `user`.
pub fn session_cookie(user: &UserModel) -> String {
    let (token, _) = generate_session_token(user.id).unwrap();
    format!("{}={}", config::session_cookie_name(), token)
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn form_request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    fields: &[(&str, &str)],
) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, NON_ALPHANUMERIC),
                utf8_percent_encode(v, NON_ALPHANUMERIC)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Multipart POST with text `fields` and `(filename, bytes)` attachments.
pub fn multipart_request(
    uri: &str,
    cookie: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &[u8])],
) -> Request<Body> {
    let boundary = "----helpdesk-test-boundary";
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (filename, data) in files {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"attachment\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .header(COOKIE, cookie)
        .body(Body::from(body))
        .unwrap()
}
