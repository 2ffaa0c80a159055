use super::*;
use crate::error::ClientErrorStatus;
use crate::fixtures::{self, url};
use crate::protocol::HttpMethod;
use serde_json::json;

fn form(password: &str, confirm: &str) -> RegistrationForm {
    RegistrationForm {
        name: "Ana".into(),
        lastname: "Souza".into(),
        student_id: "SP3012345".into(),
        email: "ana@ifsp.edu.br".into(),
        password: password.into(),
        password_confirm: confirm.into(),
    }
}

#[tokio::test]
async fn test_login_with_valid_credentials_persists_token_and_user() {
    let storage = MemoryStorage::default();
    let api = fixtures::client(storage.clone());
    api.transport().mock_json(
        HttpMethod::Post,
        &url("/api/v1/authenticate"),
        200,
        json!({"token": "jwt-token", "user": {"id": "u-1", "email": "ana@ifsp.edu.br", "studentId": "SP3012345", "name": "Ana"}}),
    );

    let session = login(&api, "ana@ifsp.edu.br", "secret").await.unwrap();

    assert!(session.is_authenticated());
    assert_eq!(session.token.as_deref(), Some("jwt-token"));
    assert_eq!(session.display_name(), "Ana");
    assert_eq!(storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("jwt-token"));
    assert_eq!(api.session().restore(), session);

    let body = api.transport().last_request().unwrap().body.unwrap();
    let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(sent, json!({"username": "ana@ifsp.edu.br", "password": "secret"}));
}

#[tokio::test]
async fn test_login_with_invalid_credentials_leaves_token_unset() {
    let storage = MemoryStorage::default();
    let api = fixtures::client(storage.clone());
    api.transport()
        .mock_text(HttpMethod::Post, &url("/api/v1/authenticate"), 403, "");

    let err = login(&api, "ana@ifsp.edu.br", "wrong").await.unwrap_err();

    assert!(!err.is_validation());
    assert_eq!(err.display_message(messages::LOGIN_FAILED), "Email ou senha inválidos.");
    assert!(storage.get(STORAGE_TOKEN_KEY).is_none());
    assert!(!api.session().restore().is_authenticated());
}

#[tokio::test]
async fn test_login_rejects_empty_token() {
    let storage = MemoryStorage::default();
    let api = fixtures::client(storage.clone());
    api.transport().mock_json(
        HttpMethod::Post,
        &url("/api/v1/authenticate"),
        200,
        json!({"token": "", "user": {"name": "Ana"}}),
    );

    let err = login(&api, "ana@ifsp.edu.br", "secret").await.unwrap_err();
    assert_eq!(err.status, ClientErrorStatus::Serialization);
    assert!(storage.get(STORAGE_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn test_register_with_mismatched_passwords_never_calls_backend() {
    let api = fixtures::client(MemoryStorage::default());

    let err = register(&api, &form("secret", "secreT")).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.display_message(messages::REGISTER_FAILED), "As senhas não conferem.");
    assert!(api.transport().requests.borrow().is_empty());
}

#[tokio::test]
async fn test_register_posts_student_payload() {
    let api = fixtures::client(MemoryStorage::default());
    api.transport()
        .mock_json(HttpMethod::Post, &url("/api/v1/register"), 201, json!({"id": "u-1"}));

    register(&api, &form("secret", "secret")).await.unwrap();

    let req = api.transport().last_request().unwrap();
    let sent: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        sent,
        json!({"name": "Ana", "lastname": "Souza", "email": "ana@ifsp.edu.br", "password": "secret", "studentId": "SP3012345"})
    );
}

#[tokio::test]
async fn test_register_failure_is_a_request_error() {
    let api = fixtures::client(MemoryStorage::default());
    api.transport().mock_json(
        HttpMethod::Post,
        &url("/api/v1/register"),
        409,
        json!({"message": "Email already registered"}),
    );

    let err = register(&api, &form("secret", "secret")).await.unwrap_err();
    assert!(!err.is_validation());
    assert_eq!(err.http_status(), Some(409));
}

#[test]
fn test_logout_clears_storage_unconditionally() {
    let storage = fixtures::logged_in_storage();
    let store = SessionStore::new(storage.clone());
    assert!(store.restore().is_authenticated());

    let session = logout(&store);

    assert_eq!(session, Session::default());
    assert!(storage.get(STORAGE_TOKEN_KEY).is_none());
    assert!(storage.get(STORAGE_USER_KEY).is_none());
    // 再次注销也没有问题
    logout(&store);
}

#[test]
fn test_restore_rehydrates_user() {
    let store = SessionStore::new(fixtures::logged_in_storage());
    let session = store.restore();
    assert_eq!(session.user, Some(fixtures::user()));
    assert_eq!(session.student_id(), Some("SP3012345"));
}

#[test]
fn test_restore_keeps_token_when_user_is_corrupt() {
    let storage = MemoryStorage::default();
    storage.set(STORAGE_TOKEN_KEY, "jwt-token");
    storage.set(STORAGE_USER_KEY, "{not json");

    let session = SessionStore::new(storage).restore();
    assert!(session.is_authenticated());
    assert!(session.user.is_none());
    assert_eq!(session.display_name(), "Usuário");
    assert_eq!(session.student_id(), None);
}

#[test]
fn test_user_without_token_is_not_restored() {
    let storage = MemoryStorage::default();
    storage.set(STORAGE_USER_KEY, r#"{"name":"Ana"}"#);

    let session = SessionStore::new(storage).restore();
    assert_eq!(session, Session::default());
}
