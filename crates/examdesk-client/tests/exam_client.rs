//! Integration tests for ExamClient and ExamApi.
//!
//! Uses wiremock for HTTP mocking. Tests cover every endpoint, both list
//! shapes, status mapping, the PDF upload gate and cache invalidation.

use examdesk_client::{ApiError, ClientConfig, ExamApi, ExamClient, CLIENT_USER_AGENT};
use examdesk_core::{
    ExamDraft, ExamPayload, ExamWizard, QuestionDraft, ResourceId, WireText, WizardError,
    WizardStep,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn config(mock_server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_url(mock_server.uri())
        .with_token("test-token")
}

fn create_test_client(mock_server: &MockServer) -> ExamClient {
    ExamClient::new(config(mock_server)).expect("failed to create client")
}

fn create_test_api(mock_server: &MockServer) -> ExamApi {
    ExamApi::new(config(mock_server)).expect("failed to create api")
}

fn exam_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "subject": "Physics",
        "instructions": "Award partial credit.",
        "questions": [
            {"id": id * 10, "text": "Define force.", "ideal_answer": "F = ma", "mark": 2}
        ],
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

const MINIMAL_PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF\n";

#[tokio::test]
async fn test_list_plain_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([exam_json(1, "Midterm"), exam_json(2, "Final")])),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let page = client.list_exams(None).await.expect("list failed");

    assert_eq!(page.count, 2);
    assert_eq!(page.items[1].title, "Final");
    assert!(page.next.is_none());
}

#[tokio::test]
async fn test_list_paginated_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": null,
            "previous": format!("{}/core/exams/?page=1", mock_server.uri()),
            "results": [exam_json(3, "Quiz")]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let page = client.list_exams(Some(2)).await.expect("list failed");

    assert_eq!(page.count, 3);
    assert_eq!(page.items.len(), 1);
    assert!(page.previous.is_some());
}

#[tokio::test]
async fn test_list_all_follows_next_links() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/core/exams/?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2, "next": null, "previous": null, "results": [exam_json(2, "Final")]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2, "next": next, "previous": null, "results": [exam_json(1, "Midterm")]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let all = client.list_all_exams().await.expect("list failed");

    let titles: Vec<&str> = all.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Midterm", "Final"]);
}

#[tokio::test]
async fn test_list_all_detects_pagination_loop() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/core/exams/?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2, "next": next, "previous": null, "results": [exam_json(1, "Midterm")]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.list_all_exams().await;

    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_list_all_refuses_next_link_to_other_host() {
    let mock_server = MockServer::start().await;
    let other_host = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&other_host)
        .await;

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": format!("{}/core/exams/?page=2", other_host.uri()),
            "previous": null,
            "results": [exam_json(1, "Midterm")]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.list_all_exams().await;

    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
    assert!(other_host.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_exam() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/7/"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exam_json(7, "Midterm")))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let exam = client
        .get_exam(&ResourceId::Int(7))
        .await
        .expect("get failed");

    assert_eq!(exam.id, ResourceId::Int(7));
    assert_eq!(exam.questions[0].id, Some(ResourceId::Int(70)));
}

#[tokio::test]
async fn test_get_exam_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/99/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_exam(&ResourceId::Int(99)).await;

    match result {
        Err(ApiError::NotFound { resource }) => assert_eq!(resource, "exam 99"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_exam_posts_payload() {
    let mock_server = MockServer::start().await;

    let payload = ExamPayload {
        title: "Midterm".into(),
        subject: "Physics".into(),
        instructions: "Award partial credit.".into(),
        questions: vec![examdesk_core::Question {
            id: None,
            text: "Define force.".into(),
            ideal_answer: "F = ma".into(),
            instructions: WireText::Absent,
            mark: 2,
        }],
    };

    Mock::given(method("POST"))
        .and(path("/core/exams/create/"))
        .and(body_json(json!({
            "title": "Midterm",
            "subject": "Physics",
            "instructions": "Award partial credit.",
            "questions": [{"text": "Define force.", "ideal_answer": "F = ma", "mark": 2}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(exam_json(1, "Midterm")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let exam = client.create_exam(&payload).await.expect("create failed");
    assert_eq!(exam.id, ResourceId::Int(1));
}

#[tokio::test]
async fn test_create_exam_rejected_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/core/exams/create/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"title": ["This field is required."]})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let payload = ExamPayload {
        title: String::new(),
        subject: "Physics".into(),
        instructions: WireText::Text(String::new()),
        questions: Vec::new(),
    };
    let result = client.create_exam(&payload).await;

    match result {
        Err(ApiError::Rejected { message }) => assert!(message.contains("This field is required")),
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_and_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/1/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/core/exams/2/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let unauthorized = client.get_exam(&ResourceId::Int(1)).await.unwrap_err();
    assert!(matches!(unauthorized, ApiError::Unauthorized { .. }));
    assert_eq!(unauthorized.exit_code(), 2);

    let server = client.get_exam(&ResourceId::Int(2)).await.unwrap_err();
    match &server {
        ApiError::Server { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Server, got {:?}", other),
    }
    assert!(server.is_backend_failure());
}

#[tokio::test]
async fn test_invalid_json_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_exam(&ResourceId::Int(1)).await;

    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_update_exam_puts_full_replacement() {
    let with_nullable_text = json!({
        "id": 5,
        "title": "Midterm",
        "subject": "Physics",
        "instructions": null,
        "questions": [
            {"id": 50, "text": "Define force.", "ideal_answer": "F = ma",
             "instructions": "", "mark": 2},
            {"id": 51, "text": "Define work.", "ideal_answer": "W = Fd",
             "instructions": null, "mark": 1},
            {"id": 52, "text": "Define power.", "ideal_answer": "P = W/t", "mark": 1}
        ],
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    });

    for fetched in [exam_json(5, "Midterm"), with_nullable_text] {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/core/exams/5/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fetched.clone()))
            .mount(&mock_server)
            .await;

        // Unmodified resubmission: every writable field identical to what was fetched.
        Mock::given(method("PUT"))
            .and(path("/core/exams/5/"))
            .and(body_json(json!({
                "title": fetched["title"],
                "subject": fetched["subject"],
                "instructions": fetched["instructions"],
                "questions": fetched["questions"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(fetched.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let exam = client.get_exam(&ResourceId::Int(5)).await.unwrap();
        let payload = ExamDraft::from_exam(&exam).to_payload().unwrap();
        let updated = client.update_exam(&exam.id, &payload).await.unwrap();

        assert_eq!(updated, exam);
        assert!(exam.differences(&payload).is_empty());
    }
}

#[tokio::test]
async fn test_delete_exam() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/core/exams/3/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    client
        .delete_exam(&ResourceId::Int(3))
        .await
        .expect("delete failed");
}

#[tokio::test]
async fn test_upload_pdf_multipart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/core/upload/"))
        .and(header_exists("content-type"))
        .respond_with(|request: &Request| {
            let content_type = request
                .headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let body = String::from_utf8_lossy(&request.body).to_string();

            if content_type.starts_with("multipart/form-data")
                && body.contains("name=\"file\"")
                && body.contains("filename=\"scan.pdf\"")
                && body.contains("application/pdf")
                && body.contains("%PDF-1.4")
            {
                ResponseTemplate::new(201)
                    .set_body_json(json!({"id": 1, "file": "/media/scan.pdf", "text": "Q1 ..."}))
            } else {
                ResponseTemplate::new(400)
            }
        })
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("scan.pdf");
    std::fs::write(&pdf, MINIMAL_PDF).unwrap();

    let client = create_test_client(&mock_server);
    let receipt = client.upload_pdf_file(&pdf).await.expect("upload failed");

    assert_eq!(receipt.file.as_deref(), Some("/media/scan.pdf"));
    assert_eq!(receipt.text.as_deref(), Some("Q1 ..."));
}

#[tokio::test]
async fn test_upload_rejects_non_pdf_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/core/upload/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("answers.png");
    std::fs::write(&image, b"\x89PNG\r\n\x1a\n").unwrap();
    let disguised = dir.path().join("answers.pdf");
    std::fs::write(&disguised, b"not really a pdf").unwrap();

    let client = create_test_client(&mock_server);
    for file in [&image, &disguised] {
        let err = client.upload_pdf_file(file).await.unwrap_err();
        assert!(matches!(err, ApiError::Upload(_)), "{:?}", err);
        assert!(err.to_string().contains("only PDF files"));
    }
}

#[tokio::test]
async fn test_user_agent_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .and(header("user-agent", CLIENT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let page = client.list_exams(None).await.expect("list failed");
    assert_eq!(page.count, 0);
}

#[tokio::test]
async fn test_no_auth_when_no_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client =
        ExamClient::new(ClientConfig::default().with_url(mock_server.uri())).unwrap();
    assert!(client.list_exams(None).await.is_ok());
}

#[tokio::test]
async fn test_api_serves_list_from_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([exam_json(1, "Midterm")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = create_test_api(&mock_server);
    let first = api.list(None).await.unwrap();
    let second = api.list(None).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_api_retrieve_without_id_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exam_json(1, "Midterm")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let api = create_test_api(&mock_server);
    let invalid = ResourceId::parse("   ");
    assert!(api.retrieve(invalid.as_ref()).await.unwrap().is_none());
    assert!(api.retrieve(None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_api_delete_refetches_list_and_keeps_other_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            exam_json(1, "Midterm"),
            exam_json(2, "Final"),
            exam_json(3, "Quiz")
        ])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/core/exams/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([exam_json(1, "Midterm"), exam_json(3, "Quiz")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/core/exams/2/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = create_test_api(&mock_server);
    let before = api.list(None).await.unwrap();
    assert_eq!(before.count, 3);

    api.delete(&ResourceId::Int(2)).await.unwrap();

    let after = api.list(None).await.unwrap();
    let ids: Vec<ResourceId> = after.items.iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![ResourceId::Int(1), ResourceId::Int(3)]);

    // Served from the refreshed cache.
    assert_eq!(api.list(None).await.unwrap(), after);
}

#[tokio::test]
async fn test_api_update_invalidates_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/exams/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exam_json(4, "Draft")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/core/exams/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exam_json(4, "Published")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/core/exams/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exam_json(4, "Published")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = create_test_api(&mock_server);
    let id = ResourceId::Int(4);
    let exam = api.retrieve(Some(&id)).await.unwrap().unwrap();
    assert_eq!(exam.title, "Draft");
    // Cached.
    assert_eq!(api.retrieve(Some(&id)).await.unwrap().unwrap().title, "Draft");

    let mut payload = ExamPayload::from(&exam);
    payload.title = "Published".into();
    api.update(&id, &payload).await.unwrap();

    let refetched = api.retrieve(Some(&id)).await.unwrap().unwrap();
    assert_eq!(refetched.title, "Published");
}

#[tokio::test]
async fn test_wizard_submits_through_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/core/exams/create/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/core/exams/create/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(exam_json(8, "Midterm")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = create_test_api(&mock_server);
    let mut wizard = ExamWizard::create();
    wizard.draft_mut().title = "Midterm".into();
    wizard.draft_mut().subject = "Physics".into();
    wizard.advance().unwrap();
    wizard.draft_mut().questions.append(QuestionDraft {
        text: "Define force.".into(),
        ideal_answer: "F = ma".into(),
        mark: "2".into(),
        ..QuestionDraft::default()
    });
    wizard.advance().unwrap();

    let err = wizard.submit(&api).await.unwrap_err();
    assert!(matches!(err, WizardError::Backend(_)));
    assert_eq!(wizard.step(), WizardStep::Review);

    let exam = wizard.submit(&api).await.expect("retry should succeed");
    assert_eq!(exam.id, ResourceId::Int(8));
    assert!(wizard.is_closed());
}
