//! Screen behavior against a mocked backend

mod common;

use common::{TestConsole, course_json, envelope, page_json, user_json};
use pretty_assertions::assert_eq;
use serde_json::json;
use skillup_client::ApiError;
use skillup_dashboard::pages::{
    AnalyticsPage, ConnectionStatus, CoursesPage, DeleteOutcome, SaveError, UsersPage,
};
use skillup_protocol::{CourseForm, UserForm};
use skillup_types::Role;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const WINDOW: Duration = Duration::from_secs(3);

#[tokio::test]
async fn test_users_fall_back_to_filtered_demo_data() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = UsersPage::new(10, WINDOW);
    page.filter_role(client, Some(Role::Instructor)).await;

    let names: Vec<&str> = page.users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Jane Smith", "Mike Wilson"]);
    assert_eq!(page.connection, ConnectionStatus::Offline);
    assert!(!page.needs_login);
    assert!(page.banner.is_some());
}

#[tokio::test]
async fn test_users_demo_data_is_paginated_locally() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = UsersPage::new(2, WINDOW);
    page.load(client, 0).await;
    page.go_to(client, 2).await;

    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].name, "Mike Wilson");
    assert_eq!(page.pagination.total_elements, 5);
    assert_eq!(page.pagination.total_pages, 3);
}

#[tokio::test]
async fn test_user_delete_needs_two_requests() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            vec![
                user_json(11, "Ada Lovelace", "INSTRUCTOR"),
                user_json(12, "Alan Turing", "STUDENT"),
            ],
            0,
            10,
            2,
        ))))
        .mount(&console.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = UsersPage::new(10, WINDOW);
    page.load(client, 0).await;
    let now = Instant::now();

    let first = page.request_delete(client, "12", now).await.unwrap();
    assert_eq!(first, DeleteOutcome::Armed);
    assert_eq!(page.pending_delete(now), Some("12"));
    assert_eq!(page.users.len(), 2);

    let second = page
        .request_delete(client, "12", now + Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(second, DeleteOutcome::Deleted);
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].name, "Ada Lovelace");
}

#[tokio::test]
async fn test_stale_delete_request_only_rearms() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = UsersPage::new(10, WINDOW);
    let now = Instant::now();
    page.request_delete(client, "12", now).await.unwrap();

    let later = now + WINDOW + Duration::from_secs(1);
    assert_eq!(page.pending_delete(later), None);
    let outcome = page.request_delete(client, "12", later).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Armed);
}

#[tokio::test]
async fn test_created_user_goes_first() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/users"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(envelope(user_json(21, "Grace Hopper", "INSTRUCTOR"))),
        )
        .expect(1)
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = UsersPage::new(10, WINDOW);
    page.users = skillup_protocol::fallback::demo_users();
    let form = UserForm {
        name: "Grace Hopper".to_string(),
        email: "grace.hopper@skillup.com".to_string(),
        password: Some("cobol1959".to_string()),
        role: Role::Instructor,
        bio: None,
    };

    let created = page.save(client, None, &form).await.unwrap();
    assert_eq!(created.id, "21");
    assert_eq!(page.users[0].name, "Grace Hopper");
    assert_eq!(page.users.len(), 6);
}

#[tokio::test]
async fn test_invalid_user_form_sends_nothing() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = UsersPage::new(10, WINDOW);
    let form = UserForm {
        name: "  ".to_string(),
        email: "not-an-email".to_string(),
        ..UserForm::default()
    };

    let Err(SaveError::Invalid(errors)) = page.save(client, None, &form).await else {
        panic!("expected form errors");
    };
    assert!(errors.contains_key("name"));
    assert!(errors.contains_key("email"));
    assert!(page.users.is_empty());
}

#[tokio::test]
async fn test_course_flags_patch_local_state_after_confirmation() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/courses/3/feature"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(course_json(3, "Rust in Practice", true, true))),
        )
        .expect(1)
        .mount(&console.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/courses/3/deactivate"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "success": false, "message": "locked" })),
        )
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = CoursesPage::new(6, WINDOW);
    page.courses = vec![serde_json::from_value(course_json(3, "Rust in Practice", true, false)).unwrap()];

    page.set_featured(client, "3", true).await.unwrap();
    assert!(page.courses[0].is_featured);

    let err = page.set_active(client, "3", false).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 500,
            message: "Server error: locked".to_string(),
        }
    );
    assert!(page.courses[0].is_active);
    assert!(page.banner.is_some());
}

#[tokio::test]
async fn test_course_create_and_categories() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/api/courses"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(envelope(course_json(40, "Async Rust Deep Dive", false, false))),
        )
        .expect(1)
        .mount(&console.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/courses/categories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!(["Programming", "Design"]))),
        )
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = CoursesPage::new(6, WINDOW);
    page.load_categories(client).await;
    assert_eq!(page.categories, vec!["Programming", "Design"]);

    let form = CourseForm {
        title: "Async Rust Deep Dive".to_string(),
        description: "Executors, wakers and pinning explained through small working services."
            .to_string(),
        category: "Programming".to_string(),
        thumbnail_url: None,
    };
    let course = page.create(client, &form).await.unwrap();
    assert_eq!(course.id, "40");
    assert_eq!(page.courses[0].title, "Async Rust Deep Dive");
}

#[tokio::test]
async fn test_courses_fall_back_to_demo_catalog() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/courses"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = CoursesPage::new(6, WINDOW);
    page.load(client, 0).await;
    assert_eq!(page.courses, skillup_protocol::fallback::demo_courses());
    assert!(page.banner.is_some());
}

#[tokio::test]
async fn test_analytics_loads_all_reports() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "totalUsers": 40,
            "usersByRole": [{ "role": "STUDENT", "count": 30 }, { "role": "INSTRUCTOR", "count": 10 }]
        }))))
        .mount(&console.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "totalCourses": 8,
            "featuredCourses": 2,
            "activeCourses": 6
        }))))
        .mount(&console.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/enrollments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "totalEnrollments": 90 }))),
        )
        .mount(&console.server)
        .await;

    let page = AnalyticsPage::open(&console.app.state().client).await;
    assert_eq!(page.error, None);
    assert_eq!(page.users.total_users, 40);
    assert_eq!(page.courses.active_courses, 6);
    assert_eq!(page.enrollments.total_enrollments, 90);
}

#[tokio::test]
async fn test_analytics_failure_replaces_every_report() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "totalUsers": 40 }))))
        .mount(&console.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/courses"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&console.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/enrollments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "totalEnrollments": 90 }))),
        )
        .mount(&console.server)
        .await;

    let page = AnalyticsPage::open(&console.app.state().client).await;
    let demo = AnalyticsPage::demo();
    assert!(page.error.is_some());
    assert_eq!(page.users, demo.users);
    assert_eq!(page.courses, demo.courses);
    assert_eq!(page.enrollments, demo.enrollments);
}

#[tokio::test]
async fn test_clearing_user_search_lists_with_configured_size() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/users/search"))
        .and(query_param("name", "Jane"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([user_json(2, "Jane Smith", "INSTRUCTOR")]))),
        )
        .expect(1)
        .mount(&console.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            vec![user_json(11, "Ada Lovelace", "INSTRUCTOR")],
            0,
            10,
            1,
        ))))
        .expect(1)
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = UsersPage::new(10, WINDOW);
    page.search(client, "Jane").await;
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.page_size(), 10);

    page.search(client, "").await;
    assert_eq!(page.users[0].name, "Ada Lovelace");
    assert_eq!(page.page_size(), 10);
}

#[tokio::test]
async fn test_course_fallback_keeps_configured_size() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/courses/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&console.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/courses"))
        .and(query_param("size", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            vec![course_json(3, "Rust in Practice", true, false)],
            0,
            12,
            1,
        ))))
        .expect(1)
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = CoursesPage::new(12, WINDOW);
    page.search(client, "Rust").await;
    assert_eq!(page.courses, skillup_protocol::fallback::demo_courses());
    assert_eq!(page.page_size(), 12);

    page.search(client, "").await;
    assert_eq!(page.courses.len(), 1);
    assert_eq!(page.page_size(), 12);
}

#[tokio::test]
async fn test_forbidden_users_list_still_shows_demo_data() {
    let console = TestConsole::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&console.server)
        .await;
    let client = &console.app.state().client;

    let mut page = UsersPage::new(10, WINDOW);
    page.load(client, 0).await;

    assert_eq!(page.users.len(), 5);
    assert!(!page.needs_login);
    assert_eq!(page.banner.as_ref().map(|b| b.title), Some("Access Denied"));
    assert!(console.token().is_some());
}
