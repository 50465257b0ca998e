use std::sync::Arc;

use pretty_assertions::assert_eq;
use roster_client::token_store::CREDENTIAL_KEY;
use roster_client::{
    ClientConfig, ClientError, CredentialStorage, MemoryStorage, RosterClient,
};
use roster_types::{CredentialRecord, Credentials, User};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> (RosterClient, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let config = ClientConfig::for_api(server.uri());
    let client = RosterClient::new(&config, storage.clone()).unwrap();
    (client, storage)
}

async fn mount_login(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[test]
fn invalid_api_base_is_config_error() {
    let config = ClientConfig::for_api("not a url");
    let result = RosterClient::new(&config, Arc::new(MemoryStorage::new()));
    assert!(matches!(result, Err(ClientError::Config(_))));
}

// ── login ───────────────────────────────────────────────────────

#[tokio::test]
async fn login_stores_record_and_returns_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "x"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "email": "a@b.com"},
            "token": "abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, storage) = client_for(&server);
    let user = client
        .auth()
        .login(&Credentials::new("a@b.com", "x"))
        .await
        .unwrap();

    let expected = User {
        id: Some(1),
        ..User::default()
    }
    .with_email("a@b.com");
    assert_eq!(user, expected);
    assert_eq!(client.auth().token().as_deref(), Some("abc"));
    assert_eq!(client.auth().current_user(), Some(expected.clone()));

    let raw = storage.read(CREDENTIAL_KEY).unwrap().unwrap();
    let stored: CredentialRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        stored,
        CredentialRecord {
            user: expected,
            token: "abc".into()
        }
    );
}

#[tokio::test]
async fn login_request_carries_no_stale_token() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 2}, "token": "new"})),
    )
    .await;

    let (client, storage) = client_for(&server);
    storage
        .write(CREDENTIAL_KEY, r#"{"user":{"id":1},"token":"old"}"#)
        .unwrap();

    client
        .auth()
        .login(&Credentials::new("a@b.com", "x"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(client.auth().token().as_deref(), Some("new"));
}

#[tokio::test]
async fn rejected_login_is_generic_authentication_error() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({"error": "invalid credentials"})),
    )
    .await;

    let (client, _) = client_for(&server);
    let err = client
        .auth()
        .login(&Credentials::new("a@b.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Authentication));
    assert_eq!(
        err.to_string(),
        "Login failed. Please check your credentials."
    );
    assert!(!err.to_string().contains("invalid credentials"));
    assert_eq!(client.auth().token(), None);
}

#[tokio::test]
async fn login_without_token_fails() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 1}})),
    )
    .await;

    let (client, storage) = client_for(&server);
    let err = client
        .auth()
        .login(&Credentials::new("a@b.com", "x"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Authentication));
    assert_eq!(storage.read(CREDENTIAL_KEY).unwrap(), None);
}

#[tokio::test]
async fn login_with_empty_token_fails() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 1}, "token": ""})),
    )
    .await;

    let (client, _) = client_for(&server);
    let result = client.auth().login(&Credentials::new("a@b.com", "x")).await;
    assert!(matches!(result, Err(ClientError::Authentication)));
    assert!(!client.auth().is_authenticated());
}

#[tokio::test]
async fn unreachable_server_is_authentication_error() {
    let config = ClientConfig::for_api("http://127.0.0.1:1");
    let client = RosterClient::new(&config, Arc::new(MemoryStorage::new())).unwrap();

    let result = client.auth().login(&Credentials::new("a@b.com", "x")).await;
    assert!(matches!(result, Err(ClientError::Authentication)));
}

// ── logout ──────────────────────────────────────────────────────

#[tokio::test]
async fn logout_clears_session_without_network() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 1}, "token": "abc"})),
    )
    .await;

    let (client, _) = client_for(&server);
    client
        .auth()
        .login(&Credentials::new("a@b.com", "x"))
        .await
        .unwrap();
    assert!(client.auth().is_authenticated());

    client.auth().logout().unwrap();

    assert_eq!(client.auth().token(), None);
    assert_eq!(client.auth().current_user(), None);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

// ── interceptor on the shared pipeline ──────────────────────────

#[tokio::test]
async fn public_path_is_sent_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (client, storage) = client_for(&server);
    storage
        .write(CREDENTIAL_KEY, r#"{"user":{"id":1},"token":"abc"}"#)
        .unwrap();

    client.users().list().await.unwrap();

    let request = reqwest::Client::new()
        .get(format!("{}/public", server.uri()))
        .build()
        .unwrap();
    client.http().send(request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let public = requests
        .iter()
        .find(|r| r.url.path() == "/public")
        .unwrap();
    assert!(public.headers.get("authorization").is_none());
}
