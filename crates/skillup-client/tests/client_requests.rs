//! Request shaping, retries and error mapping for the admin endpoints

mod common;

use common::{TestBackend, envelope, page_json, user_json};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use skillup_client::{ADMIN_REQUIRED, ApiError, ErrorKind};
use skillup_protocol::ValidationError;
use skillup_types::{CourseAction, PageRequest, SortDirection};
use std::time::Duration;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn course_json(id: u64, title: &str, featured: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "A course long enough to describe what students will learn in it.",
        "category": "Programming",
        "isActive": true,
        "isFeatured": featured
    })
}

#[tokio::test]
async fn test_list_users_sends_paging_and_role() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(query_param("page", "1"))
        .and(query_param("size", "2"))
        .and(query_param("role", "INSTRUCTOR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            vec![
                user_json(2, "Jane Smith", "INSTRUCTOR"),
                user_json(5, "Sarah Wilson", "INSTRUCTOR"),
            ],
            1,
            2,
            5,
        ))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let page = backend
        .client
        .list_users(PageRequest::new(1, 2), Some("INSTRUCTOR"))
        .await
        .unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].id, "2");
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next());
}

#[rstest]
#[case::negative_page(PageRequest::new(-1, 10), ValidationError::InvalidPage { page: -1 })]
#[case::zero_size(PageRequest::new(0, 0), ValidationError::InvalidPageSize { size: 0 })]
#[case::oversized(PageRequest::new(0, 101), ValidationError::InvalidPageSize { size: 101 })]
#[tokio::test]
async fn test_bad_paging_is_rejected_locally(
    #[case] request: PageRequest,
    #[case] expected: ValidationError,
) {
    let backend = TestBackend::signed_in().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let err = backend.client.list_users(request, None).await.unwrap_err();
    assert_eq!(err, ApiError::Validation(expected.clone()));
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = backend
        .client
        .list_courses(request, "createdAt", SortDirection::Desc)
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Validation(expected));
}

#[tokio::test]
async fn test_unknown_role_and_short_keyword_are_rejected_locally() {
    let backend = TestBackend::signed_in().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let err = backend
        .client
        .list_users(PageRequest::default(), Some("SUPERUSER"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(ValidationError::InvalidRole { .. })));

    let err = backend.client.search_courses(" a ").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation(ValidationError::KeywordTooShort { min: 2 })
    );

    let err = backend.client.search_users("x").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation(ValidationError::KeywordTooShort { min: 2 })
    );

    let err = backend.client.get_user("   ").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(ValidationError::MissingId { .. })));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            vec![user_json(1, "John Doe", "STUDENT")],
            0,
            10,
            1,
        ))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let page = backend
        .client
        .list_users(PageRequest::default(), None)
        .await
        .unwrap();
    assert_eq!(page.content[0].name, "John Doe");
}

#[tokio::test]
async fn test_persistent_server_error_returns_last_error() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/overview"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "database down" })))
        .expect(2)
        .mount(&backend.server)
        .await;

    let err = backend.client.dashboard_stats().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 500,
            message: "Server error: database down".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Server);
}

#[rstest]
#[case(403, json!({}), ApiError::access_denied(ADMIN_REQUIRED))]
#[case(400, json!({}), ApiError::BadRequest { message: "Please check your input parameters".to_string() })]
#[case(404, json!({ "message": "User not found" }), ApiError::Http { status: 404, message: "User not found".to_string() })]
#[tokio::test]
async fn test_status_mapping(
    #[case] status: u16,
    #[case] body: serde_json::Value,
    #[case] expected: ApiError,
) {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users/9"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(&backend.server)
        .await;

    assert_eq!(backend.client.get_user("9").await, Err(expected));
    assert!(backend.token().is_some());
}

#[tokio::test]
async fn test_search_tolerates_non_array_data() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/courses/search"))
        .and(query_param("keyword", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "unexpected": true }))))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/courses/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(["Design", "Business"]))))
        .mount(&backend.server)
        .await;

    assert!(backend.client.search_courses(" rust ").await.unwrap().is_empty());
    assert_eq!(
        backend.client.categories().await.unwrap(),
        vec!["Design".to_string(), "Business".to_string()]
    );
}

#[tokio::test]
async fn test_course_flag_toggle_uses_put() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/courses/3/feature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(course_json(3, "Rust Basics", true))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let course = backend
        .client
        .set_course_flag("3", CourseAction::featured(true))
        .await
        .unwrap();
    assert!(course.is_featured);
    assert_eq!(course.id, "3");
}

#[tokio::test]
async fn test_list_courses_sends_sorting() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/courses"))
        .and(query_param("sortBy", "title"))
        .and(query_param("sortDirection", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            vec![course_json(1, "Algorithms", false)],
            0,
            12,
            1,
        ))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let page = backend
        .client
        .list_courses(PageRequest::new(0, 12), "title", SortDirection::Asc)
        .await
        .unwrap();
    assert_eq!(page.content[0].title, "Algorithms");
}

#[tokio::test]
async fn test_health_reports_slow_backend_as_down() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&backend.server)
        .await;

    let client = backend
        .client
        .clone()
        .with_timeouts(Duration::from_millis(50), Duration::from_secs(8));
    assert!(!client.health().await);
}

#[tokio::test]
async fn test_health_reports_reachable_backend_as_up() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    assert!(backend.client.health().await);
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let backend = TestBackend::signed_in().await;
    let client = skillup_client::ApiClient::new("http://127.0.0.1:9/api", backend.client.session().clone())
        .with_retry(skillup_client::RetryPolicy::none());

    let err = client.dashboard_stats().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(!client.health().await);
}
