use super::*;
use crate::fixtures::{self, url};
use crate::protocol::HttpMethod;
use serde_json::json;
use std::cell::{Cell, RefCell};

fn mock_list(api: &ApiClient<crate::transport::MockTransport, crate::session::MemoryStorage>, body: serde_json::Value) {
    api.transport()
        .mock_json(HttpMethod::Get, &url("/enrollments/my-courses"), 200, body);
}

#[tokio::test]
async fn test_declining_confirmation_issues_no_delete() {
    let api = fixtures::client(fixtures::logged_in_storage());
    let prompt = RefCell::new(String::new());

    let reloads = Cell::new(0);

    let outcome = cancel_enrollment(
        &api,
        7,
        |p| {
            *prompt.borrow_mut() = p.to_string();
            false
        },
        || reloads.set(reloads.get() + 1),
    )
    .await
    .unwrap();

    assert!(matches!(outcome, CancelOutcome::Declined));
    assert_eq!(reloads.get(), 0);
    assert_eq!(*prompt.borrow(), "Você tem certeza que quer cancelar esta matrícula?");
    assert!(api.transport().requests.borrow().is_empty());
}

#[tokio::test]
async fn test_confirmed_cancel_deletes_once_then_refetches_once() {
    let api = fixtures::client(fixtures::logged_in_storage());
    let delete = url("/api/v1/enrollments/7/cancel");
    let list = url("/enrollments/my-courses");
    api.transport()
        .mock_text(HttpMethod::Delete, &delete, 200, "Enrollment successfully canceled.");
    mock_list(
        &api,
        json!([{"id": 7, "course": {"code": "ADS101", "name": "Algoritmos", "credits": 4, "availableSeats": 11}, "canceled": true}]),
    );

    // 重新加载开始时 DELETE 已发出、列表尚未请求
    let requests_at_reload = Cell::new(None);
    let outcome = cancel_enrollment(&api, 7, |_| true, || {
        requests_at_reload.set(Some(api.transport().requests.borrow().len()));
    })
    .await
    .unwrap();

    let CancelOutcome::Canceled { message, refreshed } = outcome else {
        panic!("expected cancellation");
    };
    assert_eq!(message, "Enrollment successfully canceled.");
    let refreshed = refreshed.unwrap();
    assert!(refreshed[0].canceled);

    assert_eq!(api.transport().count(HttpMethod::Delete, &delete), 1);
    assert_eq!(api.transport().count(HttpMethod::Get, &list), 1);
    // 顺序：先 DELETE，后重新加载
    let methods: Vec<_> = api
        .transport()
        .requests
        .borrow()
        .iter()
        .map(|r| r.method)
        .collect();
    assert_eq!(methods, vec![HttpMethod::Delete, HttpMethod::Get]);
    assert_eq!(requests_at_reload.get(), Some(1));
}

#[tokio::test]
async fn test_failed_cancel_does_not_refetch() {
    let api = fixtures::client(fixtures::logged_in_storage());
    api.transport().mock_json(
        HttpMethod::Delete,
        &url("/api/v1/enrollments/7/cancel"),
        400,
        json!({"message": "Prazo de cancelamento encerrado"}),
    );

    let reloads = Cell::new(0);
    let err = cancel_enrollment(&api, 7, |_| true, || reloads.set(reloads.get() + 1))
        .await
        .unwrap_err();

    assert_eq!(err.display_message(messages::CANCEL_FAILED), "Prazo de cancelamento encerrado");
    assert_eq!(reloads.get(), 0);
    assert_eq!(
        api.transport().count(HttpMethod::Get, &url("/enrollments/my-courses")),
        0
    );
}

#[tokio::test]
async fn test_load_and_empty_notice() {
    let api = fixtures::client(fixtures::logged_in_storage());
    mock_list(&api, json!([]));

    let list = load_enrollments(&api).await.unwrap();
    assert_eq!(empty_notice(&list), Some("Você não está matriculado em nenhum curso este semestre."));

    let active = vec![fixtures::enrollment(1, "ADS101", false)];
    assert_eq!(empty_notice(&active), None);
}

#[tokio::test]
async fn test_load_failure_uses_call_site_default() {
    let api = fixtures::client(fixtures::logged_in_storage());
    api.transport()
        .mock_text(HttpMethod::Get, &url("/enrollments/my-courses"), 500, "");

    let err = load_enrollments(&api).await.unwrap_err();
    assert_eq!(err.display_message(messages::ENROLLMENTS_LOAD_FAILED), "Erro ao buscar suas matrículas.");
}
