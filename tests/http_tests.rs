/// HTTP-level tests: the `ureq` client and the web host against a stub
/// prediction service served by `tiny_http` on an ephemeral port.
use std::io::Read;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use scorecard::api::{ApiError, HttpClient, PredictionService};
use scorecard::config::schema::ApiConfig;
use scorecard::controller::FormController;
use scorecard::form::{FormValues, PredictionRequest};
use scorecard::logger::Logger;
use scorecard::page::{Container, MemoryPage};
use scorecard::web;
use tiny_http::{Header, Method, Response, Server};

// ---------------------------------------------------------------------------
// Stub service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    body: String,
}

/// Serves one scripted `(status, body)` reply per request, then stops.
struct StubService {
    base_url: String,
    recorded: Arc<Mutex<Vec<Recorded>>>,
    handle: JoinHandle<()>,
}

impl StubService {
    fn start(replies: Vec<(u16, &'static str)>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind stub server");
        let addr = server.server_addr().to_ip().expect("ip listener");
        let recorded = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&recorded);
        let handle = thread::spawn(move || {
            for (status, body) in replies {
                let Ok(mut request) = server.recv() else {
                    return;
                };
                let mut buf = String::new();
                let _ = request.as_reader().read_to_string(&mut buf);
                log.lock().unwrap().push(Recorded {
                    method: request.method().to_string(),
                    path: request.url().to_string(),
                    body: buf,
                });

                let header = Header::from_bytes("Content-Type", "application/json").unwrap();
                let response = Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            recorded,
            handle,
        }
    }

    fn client(&self) -> HttpClient {
        HttpClient::from_config(&ApiConfig {
            base_url: self.base_url.clone(),
            timeout_ms: 5_000,
        })
    }

    /// Wait for every scripted reply to be served and return the requests.
    fn finish(self) -> Vec<Recorded> {
        self.handle.join().unwrap();
        let recorded = self.recorded.lock().unwrap();
        recorded.clone()
    }
}

const PREDICT_OK: &str = r#"{
    "success": true,
    "prediction": {
        "predicted_score": 84.37,
        "category": "Good",
        "confidence": "High",
        "contributions": {"attendance": 27.45, "tests": 32.4, "assignment": 17.6, "study_hours": 7.0}
    }
}"#;

const STATS_OK: &str = r#"{
    "success": true,
    "statistics": {"total": 5, "average_score": 72.4, "by_category": {"Good": 3, "Average": 2}}
}"#;

fn sample_request() -> PredictionRequest {
    PredictionRequest {
        student_id: "S-1042".to_string(),
        attendance: 91.5,
        internal_test_1: 78,
        internal_test_2: 84,
        assignment: 88,
        study_hours: 3.5,
    }
}

// ---------------------------------------------------------------------------
// HttpClient
// ---------------------------------------------------------------------------

#[test]
fn predict_posts_spaced_wire_keys() {
    let stub = StubService::start(vec![(200, PREDICT_OK)]);
    let response = stub.client().predict(&sample_request()).unwrap();

    assert!(response.success);
    let prediction = response.prediction.unwrap();
    assert_eq!(prediction.predicted_score, 84.37);
    assert_eq!(prediction.category, "Good");

    let recorded = stub.finish();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].path, "/predict");

    let body: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
    assert_eq!(body["student_id"], "S-1042");
    assert_eq!(body["Attendance"], 91.5);
    assert_eq!(body["Internal Test 1"], 78);
    assert_eq!(body["Internal Test 2"], 84);
    assert_eq!(body["Assignment"], 88);
    assert_eq!(body["Study Hours"], 3.5);
    assert_eq!(body.as_object().unwrap().len(), 6);
}

#[test]
fn error_status_with_json_body_is_an_application_response() {
    let stub = StubService::start(vec![(
        400,
        r#"{"error": "Missing required features", "missing": ["Assignment"]}"#,
    )]);
    let response = stub.client().predict(&sample_request()).unwrap();

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Missing required features"));
    assert_eq!(response.missing, vec!["Assignment"]);
    stub.finish();
}

#[test]
fn non_json_body_is_a_decode_error() {
    let stub = StubService::start(vec![(500, "<html>Internal Server Error</html>")]);
    let err = stub.client().statistics().unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(err.to_string().contains("HTTP 500"));
    stub.finish();
}

#[test]
fn refused_connection_is_a_transport_error() {
    // Grab a free port and release it again
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = HttpClient::from_config(&ApiConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        timeout_ms: 2_000,
    });

    let err = client.statistics().unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
}

#[test]
fn statistics_keep_category_order() {
    let stub = StubService::start(vec![(
        200,
        r#"{"success": true, "statistics": {"total": 4, "average_score": 61.0,
            "by_category": {"Poor": 1, "Excellent": 1, "Average": 2}}}"#,
    )]);
    let stats = stub.client().statistics().unwrap().statistics.unwrap();

    let labels: Vec<&str> = stats.by_category.iter().map(|(k, _)| k).collect();
    assert_eq!(labels, vec!["Poor", "Excellent", "Average"]);

    let recorded = stub.finish();
    assert_eq!(recorded[0].method, "GET");
    assert_eq!(recorded[0].path, "/statistics");
}

#[test]
fn service_info_and_history_decode() {
    let stub = StubService::start(vec![
        (
            200,
            r#"{"project": "Student Performance Predictor", "type": "AI/ML",
                "model": "Linear Regression", "status": "operational",
                "endpoints": {"/predict": "POST", "/statistics": "GET", "/predictions": "GET"}}"#,
        ),
        (
            200,
            r#"{"success": true, "count": 1, "predictions": [
                {"timestamp": "2024-03-01 10:00:00", "student_id": 1042, "attendance": 91.5,
                 "predicted_score": 84.37, "category": "Good"}]}"#,
        ),
    ]);
    let client = stub.client();

    let info = client.service_info().unwrap();
    assert_eq!(info.kind, "AI/ML");
    assert_eq!(info.status, "operational");
    assert_eq!(info.endpoints.len(), 3);
    assert_eq!(info.endpoints.iter().next().map(|(k, _)| k), Some("/predict"));

    let history = client.predictions().unwrap();
    assert_eq!(history.count, 1);
    assert_eq!(history.predictions[0].student_label(), "1042");
    assert_eq!(history.predictions[0].test1, None);

    let recorded = stub.finish();
    assert_eq!(recorded[0].path, "/");
    assert_eq!(recorded[1].path, "/predictions");
}

// ---------------------------------------------------------------------------
// Controller over HTTP
// ---------------------------------------------------------------------------

#[test]
fn submission_round_trip_over_http() {
    let stub = StubService::start(vec![(200, PREDICT_OK), (200, STATS_OK)]);
    let mut controller = FormController::new(stub.client(), MemoryPage::new());

    let values = FormValues {
        student_id: "S-1042".to_string(),
        attendance: "91.5".to_string(),
        test1: "78".to_string(),
        test2: "84".to_string(),
        assignment: "88".to_string(),
        study_hours: "3.5".to_string(),
    };
    controller.submit_prediction(&values).unwrap();

    let page = controller.into_page();
    assert!(page.alerts.is_empty());
    assert!(page.contents(Container::Results).contains("Good Performance"));
    assert!(page.contents(Container::Statistics).contains("72.4"));

    let paths: Vec<String> = stub.finish().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/predict", "/statistics"]);
}

// ---------------------------------------------------------------------------
// Web host
// ---------------------------------------------------------------------------

#[test]
fn page_load_renders_statistics() {
    let stub = StubService::start(vec![(200, STATS_OK)]);
    let client = stub.client();

    let reply = web::dispatch(&client, &Logger::silent(), &Method::Get, "/", None);
    assert_eq!(reply.status, 200);
    assert!(reply.content_type.starts_with("text/html"));

    let html = reply.body;
    assert!(html.contains(r#"<div id="statistics">"#));
    assert!(html.contains("Total AI Predictions"));
    assert!(!html.contains(r#"role="alert""#));

    let paths: Vec<String> = stub.finish().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/statistics"]);
}

#[test]
fn form_post_renders_result_and_statistics() {
    let stub = StubService::start(vec![(200, PREDICT_OK), (200, STATS_OK)]);
    let client = stub.client();

    let body = "studentId=S-1042&attendance=91.5&test1=78&test2=84&assignment=88&studyHours=3.5";
    let html = web::dispatch(
        &client,
        &Logger::silent(),
        &Method::Post,
        "/predict",
        Some(body),
    )
    .body;
    assert!(html.contains("Good Performance"));
    assert!(html.contains("27.45%"));
    assert!(html.contains(r#"value="S-1042""#));

    let recorded = stub.finish();
    let paths: Vec<&str> = recorded.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/predict", "/statistics"]);
}

#[test]
fn invalid_form_post_shows_alert_without_predicting() {
    let stub = StubService::start(vec![(200, STATS_OK)]);
    let client = stub.client();

    let body = "studentId=&attendance=abc&test1=78&test2=84&assignment=88&studyHours=3.5";
    let html = web::dispatch(
        &client,
        &Logger::silent(),
        &Method::Post,
        "/predict",
        Some(body),
    )
    .body;
    assert!(html.contains(r#"role="alert""#));
    assert!(html.contains("Please fill all fields correctly"));
    assert!(html.contains(r#"value="abc""#));

    let paths: Vec<String> = stub.finish().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/statistics"]);
}

#[test]
fn rejected_form_post_still_shows_statistics() {
    let stub = StubService::start(vec![
        (200, r#"{"success": false, "error": "AI system not initialized"}"#),
        (200, STATS_OK),
    ]);
    let client = stub.client();

    let body = "studentId=S-1042&attendance=91.5&test1=78&test2=84&assignment=88&studyHours=3.5";
    let html = web::dispatch(
        &client,
        &Logger::silent(),
        &Method::Post,
        "/predict",
        Some(body),
    )
    .body;
    assert!(html.contains("Error: AI system not initialized"));
    assert!(html.contains("Total AI Predictions"));

    let paths: Vec<String> = stub.finish().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/predict", "/statistics"]);
}

#[test]
fn unknown_route_is_not_found() {
    let client = HttpClient::from_config(&ApiConfig::default());
    let reply = web::dispatch(&client, &Logger::silent(), &Method::Get, "/admin", None);
    assert_eq!(reply.status, 404);
}
