//! API client behaviour against an in-memory transport

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use super::*;
use crate::backups::RestoreGate;
use crate::config::AppConfig;
use crate::domain::{Backup, BackupStatus, EntityKind, LeadPage};
use crate::sorting::LegacySortOrder;

#[derive(Debug, Clone, PartialEq)]
struct Sent {
    url: String,
    method: Method,
    token: Option<String>,
    body: RequestBody,
}

#[derive(Clone, Default)]
struct FakeTransport {
    responses: Rc<RefCell<VecDeque<Result<ApiResponse, TransportError>>>>,
    sent: Rc<RefCell<Vec<Sent>>>,
}

impl FakeTransport {
    fn respond(&self, response: Result<ApiResponse, TransportError>) -> &Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    fn json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond(Ok(ApiResponse {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.to_string().into_bytes(),
        }))
    }

    fn text(&self, status: u16, content_type: &str, body: &str) -> &Self {
        self.respond(Ok(ApiResponse {
            status,
            content_type: Some(content_type.to_string()),
            body: body.as_bytes().to_vec(),
        }))
    }

    fn last(&self) -> Sent {
        self.sent.borrow().last().cloned().expect("no request sent")
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, url: &str, request: &ApiRequest, token: Option<&str>) -> Result<ApiResponse, TransportError> {
        self.sent.borrow_mut().push(Sent {
            url: url.to_string(),
            method: request.method,
            token: token.map(str::to_string),
            body: request.body.clone(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no response queued".to_string())))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Unauthorized,
    Toast(String),
    Capture(ErrorReport),
}

#[derive(Clone, Default)]
struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

impl ApiEvents for Recorder {
    fn unauthorized(&self) {
        self.events.borrow_mut().push(Event::Unauthorized);
    }

    fn toast_error(&self, message: &str) {
        self.events.borrow_mut().push(Event::Toast(message.to_string()));
    }

    fn capture(&self, report: ErrorReport) {
        self.events.borrow_mut().push(Event::Capture(report));
    }
}

fn client(token: Option<&str>) -> (ApiClient<FakeTransport, Recorder>, FakeTransport, Recorder) {
    let transport = FakeTransport::default();
    let recorder = Recorder::default();
    let api = ApiClient::new("https://crm.test/api/", transport.clone(), recorder.clone(), token.map(str::to_string));
    (api, transport, recorder)
}

#[tokio::test]
async fn test_unauthorized_emits_one_event_and_returns_response() {
    let (api, transport, recorder) = client(Some("expired"));
    transport.json(401, serde_json::json!({"error": "Token expired"}));

    let response = api.fetch(&ApiRequest::get("/clients/")).await.unwrap();

    assert_eq!(response.status, 401);
    assert_eq!(recorder.count(|e| *e == Event::Unauthorized), 1);
    assert_eq!(recorder.events(), vec![Event::Toast(MSG_UNAUTHORIZED.to_string()), Event::Unauthorized]);
}

#[tokio::test]
async fn test_token_and_url() {
    let (api, transport, _) = client(Some("abc"));
    transport.json(200, serde_json::json!({"leads": [], "total": 0}));

    let query = PageQuery { page: 2, per_page: 25, sort: LegacySortOrder::Alphabetical };
    let page: LeadPage = api.list_leads(&query).await.unwrap();

    assert_eq!(page.total, 0);
    let sent = transport.last();
    assert_eq!(sent.url, "https://crm.test/api/leads/?page=2&per_page=25&sort=alphabetical");
    assert_eq!(sent.token.as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_empty_token_not_sent() {
    let (api, transport, _) = client(Some(""));
    transport.json(200, serde_json::json!([]));
    let _ = api.list_users().await.unwrap();
    assert!(transport.last().token.is_none());
}

#[tokio::test]
async fn test_json_error_message_is_toasted() {
    let (api, transport, recorder) = client(None);
    transport.json(400, serde_json::json!({"message": "Name already exists"}));

    let err = api.execute(&ApiRequest::post("/clients/")).await.unwrap_err();

    assert_eq!(err, ApiError::Status { status: 400, message: "Name already exists".to_string() });
    assert_eq!(recorder.events(), vec![Event::Toast("Name already exists".to_string())]);
}

#[tokio::test]
async fn test_error_field_wins_over_message() {
    let (api, transport, recorder) = client(None);
    transport.json(422, serde_json::json!({"error": "Invalid status", "message": "ignored"}));
    let _ = api.fetch(&ApiRequest::get("/leads/")).await.unwrap();
    assert_eq!(recorder.events(), vec![Event::Toast("Invalid status".to_string())]);
}

#[tokio::test]
async fn test_html_error_page_and_server_capture() {
    let (api, transport, recorder) = client(None);
    transport.text(502, "text/html", "<!DOCTYPE html><html><body>Bad gateway</body></html>");

    let response = api.fetch(&ApiRequest::delete("/clients/4")).await.unwrap();

    assert_eq!(response.status, 502);
    let events = recorder.events();
    assert_eq!(events[0], Event::Toast(MSG_HTML_ERROR_PAGE.to_string()));
    match &events[1] {
        Event::Capture(report) => {
            assert_eq!(report.level, ErrorLevel::Error);
            assert_eq!(report.status, Some(502));
            assert_eq!(report.method, Some("DELETE"));
            assert_eq!(report.url, "https://crm.test/api/clients/4");
        }
        other => panic!("expected capture, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_error_and_no_capture_below_500() {
    let (api, transport, recorder) = client(None);
    transport.text(404, "text/plain", "Not Found");
    let _ = api.fetch(&ApiRequest::get("/nope")).await.unwrap();
    assert_eq!(recorder.events(), vec![Event::Toast("Error: 404 Not Found".to_string())]);
}

#[tokio::test]
async fn test_unreadable_json_error_body() {
    let (api, transport, recorder) = client(None);
    transport.text(500, "application/json", "{not json");
    let _ = api.fetch(&ApiRequest::get("/reports/pipeline")).await.unwrap();
    assert_eq!(recorder.events()[0], Event::Toast("Error: 500 - Unable to read error details".to_string()));
}

#[tokio::test]
async fn test_network_failure_is_reported_as_warning() {
    let (api, transport, recorder) = client(None);
    transport.respond(Err(TransportError::Network("Failed to fetch".to_string())));

    let err = api.fetch(&ApiRequest::get("/clients/")).await.unwrap_err();

    assert_eq!(err, ApiError::Network("Failed to fetch".to_string()));
    let events = recorder.events();
    assert_eq!(events[0], Event::Toast(MSG_NETWORK.to_string()));
    assert!(matches!(&events[1], Event::Capture(r) if r.level == ErrorLevel::Warning));
}

#[tokio::test]
async fn test_other_transport_failure_is_unexpected() {
    let (api, transport, recorder) = client(None);
    transport.respond(Err(TransportError::Request("body stream closed".to_string())));
    assert!(api.fetch(&ApiRequest::get("/clients/")).await.is_err());
    assert_eq!(recorder.events()[0], Event::Toast(MSG_UNEXPECTED.to_string()));
    assert!(matches!(&recorder.events()[1], Event::Capture(r) if r.level == ErrorLevel::Error));
}

#[tokio::test]
async fn test_fetch_json_rejects_non_json_success() {
    let (api, transport, recorder) = client(None);
    transport.text(200, "text/html", "<html></html>");
    let result: Result<serde_json::Value, _> = api.fetch_json(&ApiRequest::get("/users/")).await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
    assert_eq!(recorder.events(), vec![Event::Toast(MSG_NOT_JSON.to_string())]);
}

#[tokio::test]
async fn test_fetch_json_rejects_bad_shape() {
    let (api, transport, recorder) = client(None);
    transport.json(200, serde_json::json!({"unexpected": true}));
    let result = api.list_users().await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
    assert_eq!(recorder.events(), vec![Event::Toast(MSG_INVALID_JSON.to_string())]);
}

#[tokio::test]
async fn test_fetch_json_unauthorized_is_error_with_single_event() {
    let (api, transport, recorder) = client(Some("t"));
    transport.json(401, serde_json::json!({}));
    assert_eq!(api.list_users().await, Err(ApiError::Unauthorized));
    assert_eq!(recorder.count(|e| *e == Event::Unauthorized), 1);
}

#[tokio::test]
async fn test_admin_listing_encodes_email() {
    let (api, transport, _) = client(None);
    transport.json(200, serde_json::json!({"clients": [], "total": 0}));
    let query = PageQuery { page: 1, per_page: 10, sort: LegacySortOrder::Newest };
    let _: crate::domain::ClientPage = api
        .list_all_page(EntityKind::Client, &query, Some("pat+sales@example.com"))
        .await
        .unwrap();
    assert!(transport.last().url.ends_with("&user_email=pat%2Bsales%40example.com"));
}

#[tokio::test]
async fn test_report_filters_and_envelope() {
    let (api, transport, _) = client(None);
    transport.json(200, serde_json::json!({
        "pipeline": [{"status": "new", "count": 3, "percentage": 50.0}]
    }));
    let filters = ReportFilters { user_id: Some(0), ..ReportFilters::date_range("2024-01-01", "") };

    let rows = api.pipeline_report(&filters).await.unwrap();

    assert_eq!(rows[0].count, 3);
    assert_eq!(transport.last().url, "https://crm.test/api/reports/pipeline?start_date=2024-01-01");
}

#[tokio::test]
async fn test_mutation_bodies() {
    let (api, transport, _) = client(None);
    transport.json(200, serde_json::json!({"message": "ok"}));
    transport.json(200, serde_json::json!({"message": "ok"}));

    api.assign_entity(EntityKind::Lead, 7, 3).await.unwrap();
    let sent = transport.last();
    assert_eq!(sent.url, "https://crm.test/api/leads/7/assign");
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.body, RequestBody::Json(serde_json::json!({"assigned_to": 3})));

    api.bulk_delete_leads(&[1, 2]).await.unwrap();
    assert_eq!(transport.last().body, RequestBody::Json(serde_json::json!({"lead_ids": [1, 2]})));
}

#[tokio::test]
async fn test_upload_uses_files_field() {
    let (api, transport, _) = client(None);
    transport.json(200, serde_json::json!({}));
    let files = vec![
        UploadFile { name: "a.pdf".to_string(), content_type: None, bytes: vec![1] },
        UploadFile { name: "b.png".to_string(), content_type: Some("image/png".to_string()), bytes: vec![2] },
    ];
    api.upload_files(files).await.unwrap();

    match transport.last().body {
        RequestBody::Multipart(parts) => {
            assert_eq!(parts.len(), 2);
            assert!(parts.iter().all(|p| p.name == "files"));
        }
        other => panic!("expected multipart, got {:?}", other),
    }
}

#[tokio::test]
async fn test_restore_only_through_gate() {
    let (api, transport, _) = client(None);
    transport.json(200, serde_json::json!({"message": "started"}));
    let backup: Backup = serde_json::from_value(serde_json::json!({
        "id": 12, "filename": "b.sql.gz", "type": "manual", "status": "completed",
        "created_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(backup.status, BackupStatus::Completed);

    let mut gate = RestoreGate::open(&backup).unwrap();
    gate.acknowledge();
    gate.set_input("RESTORE");
    api.restore_backup(gate.confirm().unwrap()).await.unwrap();

    let sent = transport.last();
    assert_eq!(sent.url, "https://crm.test/api/admin/backups/12/restore");
    assert_eq!(sent.method, Method::Post);
}

#[test]
fn test_client_url_matches_config_url() {
    let config = AppConfig { api_base: "https://crm.test/api".to_string(), ..Default::default() };
    let api = ApiClient::new(config.api_base.clone(), FakeTransport::default(), Recorder::default(), None);
    let request = ApiRequest::get("/clients/");
    assert_eq!(api.url(&request), config.url("/clients/"));
    assert_eq!(api.url(&request), "https://crm.test/api/clients/");
}

#[tokio::test]
async fn test_backup_envelopes() {
    let (api, transport, _) = client(None);
    transport.json(200, serde_json::json!({"backups": []}));
    transport.json(200, serde_json::json!({"restores": []}));
    assert!(api.list_backups().await.unwrap().is_empty());
    assert!(api.list_restores().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_backup_envelopes_null_or_missing_are_empty() {
    let (api, transport, recorder) = client(None);
    transport.json(200, serde_json::json!({"backups": null}));
    transport.json(200, serde_json::json!({}));
    assert!(api.list_backups().await.unwrap().is_empty());
    assert!(api.list_restores().await.unwrap().is_empty());
    assert!(recorder.events().is_empty());
}

#[test]
fn test_query_encoding_matches_uri_component() {
    assert_eq!(encode_query_value("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
    assert_eq!(encode_query_value("keep-_.!~*'()"), "keep-_.!~*'()");
}
