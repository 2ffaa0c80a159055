use super::*;
use crate::error::ClientErrorStatus;
use crate::fixtures::{self, url};
use crate::protocol::HttpMethod;
use crate::session::MemoryStorage;
use serde_json::json;

const WINDOW: Duration = Duration::from_millis(300);

fn at(ms: i64) -> Timestamp {
    Timestamp::new(ms)
}

fn named(name: &str) -> CourseFilter {
    CourseFilter {
        name: name.into(),
        shift: String::new(),
    }
}

#[tokio::test]
async fn test_three_keystrokes_within_window_fetch_once_with_final_value() {
    let api = fixtures::client(fixtures::logged_in_storage());
    let path = url("/api/v1/courses/filter");
    api.transport().mock_json(HttpMethod::Get, &path, 200, json!([]));
    let mut search = CourseSearch::new(WINDOW);

    let keystrokes = [("A", 0), ("Al", 80), ("Alg", 160)];
    let tickets: Vec<_> = keystrokes
        .iter()
        .map(|(text, ms)| (search.edit(named(text), at(*ms)), *ms))
        .collect();

    // 没有任何定时器到期之前不发请求
    assert_eq!(api.transport().count(HttpMethod::Get, &path), 0);

    for (ticket, ms) in tickets {
        if let Some((tag, filter)) = search.settle(ticket, at(ms + 300)) {
            load_courses(&api, &filter).await.unwrap();
            assert!(search.accept(tag));
        }
    }

    assert_eq!(api.transport().count(HttpMethod::Get, &path), 1);
    let req = api.transport().last_request().unwrap();
    assert_eq!(req.query, vec![("name".to_string(), "Alg".to_string())]);
}

#[test]
fn test_no_fetch_before_quiet_period() {
    let mut search = CourseSearch::new(WINDOW);
    let ticket = search.edit(named("Algo"), at(1_000));
    assert!(search.settle(ticket, at(1_299)).is_none());
    assert!(search.settle(ticket, at(1_300)).is_some());
}

#[test]
fn test_early_timer_keeps_edit_until_rearmed_timer_settles() {
    let mut search = CourseSearch::new(WINDOW);
    let ticket = search.edit(named("Redes"), at(1_000));

    // 定时器比截止时间早 1ms 触发：不发请求，但输入仍在等待
    assert!(search.settle(ticket, at(1_299)).is_none());
    let wait = search.remaining(ticket, at(1_299)).unwrap();
    assert_eq!(wait, Duration::from_millis(1));

    let (_, filter) = search.settle(ticket, at(1_299) + wait).unwrap();
    assert_eq!(filter, named("Redes"));
    assert!(search.remaining(ticket, at(1_300)).is_none());
}

#[test]
fn test_superseded_edit_is_not_rearmed() {
    let mut search = CourseSearch::new(WINDOW);
    let old = search.edit(named("R"), at(0));
    search.edit(named("Re"), at(200));
    assert!(search.settle(old, at(300)).is_none());
    assert!(search.remaining(old, at(300)).is_none());
}

#[test]
fn test_stale_response_is_discarded() {
    let mut search = CourseSearch::new(WINDOW);
    let (initial, _) = search.begin(CourseFilter::default());
    let ticket = search.edit(named("Redes"), at(0));
    let (latest, filter) = search.settle(ticket, at(300)).unwrap();

    assert_eq!(filter, named("Redes"));
    assert!(search.accept(latest));
    assert!(!search.accept(initial));
}

#[test]
fn test_begin_cancels_pending_edit() {
    let mut search = CourseSearch::new(WINDOW);
    let ticket = search.edit(named("x"), at(0));
    search.begin(CourseFilter::default());
    assert!(search.settle(ticket, at(300)).is_none());
}

#[test]
fn test_filter_to_request_drops_empty_fields() {
    let filter = CourseFilter {
        name: String::new(),
        shift: "Night".into(),
    };
    let req = filter.to_request();
    assert_eq!(req.name, None);
    assert_eq!(req.shift.as_deref(), Some("Night"));
}

#[test]
fn test_selection_toggle() {
    let mut selection = Selection::default();
    selection.toggle("ADS101");
    selection.toggle("ADS202");
    assert!(selection.contains("ADS101"));
    assert_eq!(selection.len(), 2);

    selection.toggle("ADS101");
    assert!(!selection.contains("ADS101"));
    assert_eq!(selection.codes(), ["ADS202".to_string()]);

    selection.clear();
    assert!(selection.is_empty());
}

#[tokio::test]
async fn test_empty_selection_never_calls_enroll_endpoint() {
    let api = fixtures::client(fixtures::logged_in_storage());
    let session = api.session().restore();

    let err = submit_enrollment(&api, &session, &Selection::default())
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(
        err.display_message(messages::ENROLL_FAILED),
        "Você deve selecionar ao menos um curso."
    );
    assert!(api.transport().requests.borrow().is_empty());
}

#[tokio::test]
async fn test_submit_posts_selection_for_current_student() {
    let api = fixtures::client(fixtures::logged_in_storage());
    let path = url("/enrollments/enroll/SP3012345");
    api.transport()
        .mock_text(HttpMethod::Post, &path, 200, "Student successfully enrolled in 2 course(s).");
    let session = api.session().restore();
    let mut selection = Selection::default();
    selection.toggle("ADS101");
    selection.toggle("ADS202");

    let message = submit_enrollment(&api, &session, &selection).await.unwrap();

    assert_eq!(message, "Student successfully enrolled in 2 course(s).");
    assert_eq!(api.transport().count(HttpMethod::Post, &path), 1);
    // 选课成功后不会重新加载课程列表
    assert_eq!(
        api.transport()
            .count(HttpMethod::Get, &url("/api/v1/courses/filter")),
        0
    );
}

#[tokio::test]
async fn test_submit_failure_surfaces_backend_message() {
    let api = fixtures::client(fixtures::logged_in_storage());
    api.transport().mock_text(
        HttpMethod::Post,
        &url("/enrollments/enroll/SP3012345"),
        400,
        "Schedule conflict between ADS101 and ADS202",
    );
    let session = api.session().restore();
    let mut selection = Selection::default();
    selection.toggle("ADS101");

    let err = submit_enrollment(&api, &session, &selection).await.unwrap_err();
    assert_eq!(
        err.display_message(messages::ENROLL_FAILED),
        "Schedule conflict between ADS101 and ADS202"
    );
}

#[tokio::test]
async fn test_submit_without_student_id_is_rejected_locally() {
    let api = fixtures::client(MemoryStorage::default());
    let mut selection = Selection::default();
    selection.toggle("ADS101");

    let err = submit_enrollment(&api, &Session::default(), &selection)
        .await
        .unwrap_err();
    assert_eq!(err.status, ClientErrorStatus::Validation);
    assert_eq!(
        err.display_message(messages::ENROLL_FAILED),
        "Sessão expirada. Faça login novamente."
    );
    assert!(api.transport().requests.borrow().is_empty());
}

#[tokio::test]
async fn test_load_failure_uses_call_site_default() {
    let api = fixtures::client(fixtures::logged_in_storage());
    api.transport()
        .mock_text(HttpMethod::Get, &url("/api/v1/courses/filter"), 500, "");

    let err = load_courses(&api, &CourseFilter::default()).await.unwrap_err();
    assert_eq!(err.display_message(messages::COURSES_LOAD_FAILED), "Falha ao carregar cursos.");
}
