//! End-to-end HTTP behavior against a server on an ephemeral port.

mod support;

use std::sync::Arc;

use registrar::domain::{Grade, StudentId};
use registrar::testkit::domain::{course, date, new_student};
use registrar::testkit::{InMemoryStudentStore, StoreOp};
use reqwest::StatusCode;

use support::server::{location, TestServer};

fn seeded_store() -> Arc<InMemoryStudentStore> {
    let store = Arc::new(InMemoryStudentStore::new());
    store.put(new_student("Alexander", "Carson", date(2005, 9, 1)).with_id(StudentId::new(1)));
    store.put(new_student("Lee", "Ann", date(2023, 9, 1)).with_id(StudentId::new(5)));
    store.put(new_student("Norman", "Laura", date(2003, 9, 1)).with_id(StudentId::new(7)));
    store.enroll(StudentId::new(1), course(1050, "Chemistry", 3), Some(Grade::A));
    store
}

async fn start() -> (Arc<InMemoryStudentStore>, TestServer) {
    let store = seeded_store();
    let server = TestServer::start(store.clone()).await;
    (store, server)
}

#[tokio::test]
async fn root_redirects_to_list() {
    let (_, server) = start().await;

    let response = server.get("/").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Students");
}

#[tokio::test]
async fn list_renders_names_and_toggled_headers() {
    let (_, server) = start().await;

    for path in ["/Students", "/Students/Index"] {
        let response = server.get(path).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.text().await.unwrap();
        assert!(body.contains("Lee, Ann"));
        assert!(body.contains("href=\"/Students?sortOrder=name_desc\""));
        assert!(body.contains("href=\"/Students?sortOrder=Date\""));
    }

    let body = server
        .get("/Students?sortOrder=name_desc")
        .await
        .text()
        .await
        .unwrap();
    let norman = body.find("Norman, Laura").unwrap();
    let alexander = body.find("Alexander, Carson").unwrap();
    assert!(norman < alexander);
    assert!(body.contains("href=\"/Students\""));

    let body = server
        .get("/Students?sortOrder=garbage")
        .await
        .text()
        .await
        .unwrap();
    let alexander = body.find("Alexander, Carson").unwrap();
    let norman = body.find("Norman, Laura").unwrap();
    assert!(alexander < norman);
    assert!(body.contains("href=\"/Students\""));
    assert!(!body.contains("sortOrder=name_desc"));
}

#[tokio::test]
async fn details_renders_enrollments() {
    let (_, server) = start().await;

    let response = server.get("/Students/Details/1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Chemistry"));
    assert!(body.contains("<td>A</td>"));
}

#[tokio::test]
async fn missing_and_unknown_ids_are_404() {
    let (_, server) = start().await;

    for path in [
        "/Students/Details",
        "/Students/Details/abc",
        "/Students/Details/99",
        "/Students/Edit",
        "/Students/Edit/99",
        "/Students/Delete",
        "/Students/Delete/99",
        "/Courses",
    ] {
        assert_eq!(server.get(path).await.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn create_flow_persists_and_redirects() {
    let (store, server) = start().await;
    let token = server.token_from("/Students/Create").await;

    let response = server
        .post_form(
            "/Students/Create",
            &token,
            &[
                ("LastName", "Lovelace"),
                ("FirstMidName", "Ada"),
                ("EnrollmentDate", "2024-02-01"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Students");
    assert_eq!(store.len(), 4);
    let body = server.get("/Students").await.text().await.unwrap();
    assert!(body.contains("Lovelace, Ada"));
}

#[tokio::test]
async fn create_ignores_submitted_id() {
    let (store, server) = start().await;
    let token = server.token_from("/Students/Create").await;

    let response = server
        .post_form(
            "/Students/Create",
            &token,
            &[
                ("ID", "5"),
                ("LastName", "Lovelace"),
                ("FirstMidName", "Ada"),
                ("EnrollmentDate", "2024-02-01"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.len(), 4);
    assert_eq!(store.get(StudentId::new(5)).unwrap().last_name, "Lee");
}

#[tokio::test]
async fn invalid_create_rerenders_with_messages() {
    let (store, server) = start().await;
    let token = server.token_from("/Students/Create").await;

    let response = server
        .post_form(
            "/Students/Create",
            &token,
            &[("LastName", ""), ("FirstMidName", "Ada"), ("EnrollmentDate", "soon")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("The Last Name field is required."));
    assert!(body.contains("The value &#39;soon&#39; is not valid for Enrollment Date."));
    assert!(body.contains("value=\"Ada\""));
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn create_fault_shows_generic_message() {
    let (store, server) = start().await;
    store.fail(StoreOp::Insert);
    let token = server.token_from("/Students/Create").await;

    let response = server
        .post_form(
            "/Students/Create",
            &token,
            &[
                ("LastName", "Lovelace"),
                ("FirstMidName", "Ada"),
                ("EnrollmentDate", "2024-02-01"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Unable to save changes."));
    assert!(!body.contains("simulated"));
}

#[tokio::test]
async fn posts_without_matching_token_are_rejected() {
    let (store, server) = start().await;
    let fields = [
        ("LastName", "Lovelace"),
        ("FirstMidName", "Ada"),
        ("EnrollmentDate", "2024-02-01"),
    ];

    for path in ["/Students/Create", "/Students/Edit/5", "/Students/Delete/5"] {
        let response = server.post_form_without_token(path, &fields).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
    }

    let token = server.token_from("/Students/Create").await;
    let other = server.token_from("/Students/Create").await;
    assert_ne!(token, other);
    let response = server
        .post_with_tokens("/Students/Create", &token, &other, &fields)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(store.len(), 3);
    assert_eq!(store.get(StudentId::new(5)).unwrap().first_mid_name, "Ann");
}

#[tokio::test]
async fn edit_updates_only_submitted_fields_and_keeps_id() {
    let (store, server) = start().await;
    let token = server.token_from("/Students/Edit/5").await;

    let response = server
        .post_form("/Students/Edit/5", &token, &[("ID", "7"), ("FirstMidName", "Anne")])
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Students");
    let student = store.get(StudentId::new(5)).unwrap();
    assert_eq!(student.first_mid_name, "Anne");
    assert_eq!(student.last_name, "Lee");
    assert_eq!(store.get(StudentId::new(7)).unwrap().first_mid_name, "Laura");
}

#[tokio::test]
async fn edit_post_for_unknown_id_is_404() {
    let (_, server) = start().await;
    let token = server.token_from("/Students/Edit/5").await;

    let response = server
        .post_form("/Students/Edit/99", &token, &[("FirstMidName", "Anne")])
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_flow_removes_student() {
    let (store, server) = start().await;
    let token = server.token_from("/Students/Delete/1").await;

    let response = server.post_form("/Students/Delete/1", &token, &[]).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Students");
    assert!(store.get(StudentId::new(1)).is_none());
    assert_eq!(store.enrollment_count(StudentId::new(1)), 0);
}

#[tokio::test]
async fn delete_of_unknown_id_redirects_to_list() {
    let (store, server) = start().await;
    let token = server.token_from("/Students/Delete/1").await;

    for path in ["/Students/Delete/99", "/Students/Delete/abc"] {
        let response = server.post_form(path, &token, &[]).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), "/Students", "{path}");
    }
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn delete_fault_redirects_to_flagged_confirmation() {
    let (store, server) = start().await;
    store.fail(StoreOp::Delete);
    let token = server.token_from("/Students/Delete/7").await;

    let response = server.post_form("/Students/Delete/7", &token, &[]).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Students/Delete/7?saveChangesError=true");
    assert!(store.get(StudentId::new(7)).is_some());

    let body = server
        .get("/Students/Delete/7?saveChangesError=true")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Delete failed. Try again"));

    let plain = server.get("/Students/Delete/7").await.text().await.unwrap();
    assert!(!plain.contains("Delete failed."));
}

#[tokio::test]
async fn read_fault_is_a_500() {
    let (store, server) = start().await;
    store.fail(StoreOp::List);

    let response = server.get("/Students").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().await.unwrap().contains("simulated"));
}
