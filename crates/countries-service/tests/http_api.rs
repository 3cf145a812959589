use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use countries_lib::FileSource;
use countries_service::{router, AppState, SearchResult};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/countries_minimal.json")
}

fn server_for(path: PathBuf) -> (TestServer, AppState) {
    let state = AppState::new(Arc::new(FileSource::new(path)));
    let server = TestServer::new(router(state.clone())).expect("test server starts");
    (server, state)
}

fn fixture_server() -> TestServer {
    server_for(fixture_path()).0
}

fn assert_problem(body: &Value, status: u16, type_uri: &str) {
    assert_eq!(body["status"], status);
    assert_eq!(body["type"], type_uri);
    assert!(body["instance"].is_string(), "problem carries request id");
}

#[tokio::test]
async fn search_returns_projected_results() {
    let server = fixture_server();

    let response = server
        .get("/countries")
        .add_query_param("search", "land")
        .await;

    response.assert_status_ok();
    let results: Vec<SearchResult> = response.json();
    let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Netherlands", "Switzerland", "Ireland", "Iceland"]);

    let swiss = &results[1];
    assert_eq!(swiss.code, "CHE");
    assert_eq!(swiss.currency, "CHF");
    assert_eq!(swiss.flag.as_deref(), Some("https://flagcdn.com/ch.svg"));
    assert_eq!(swiss.regional_blocks, "N/A");
}

#[tokio::test]
async fn search_without_query_is_bad_request() {
    let server = fixture_server();

    let response = server.get("/countries").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.header("content-type"),
        HeaderValue::from_static("application/problem+json")
    );
    assert_problem(&response.json::<Value>(), 400, "/problems/invalid-request");
}

#[tokio::test]
async fn detail_is_case_insensitive() {
    let server = fixture_server();

    let response = server.get("/country/fra").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "France");
    assert_eq!(body["capital"], "Paris");
    assert_eq!(body["currencies"], "Euro (€)");
    assert_eq!(body["languages"], "French");
    assert_eq!(body["borders"][0], "AND");
    assert_eq!(body["content_type"], "application/json");
}

#[tokio::test]
async fn detail_for_unknown_code_is_not_found() {
    let server = fixture_server();

    let response = server.get("/country/XYZ").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_problem(&response.json::<Value>(), 404, "/problems/unknown-country");
}

#[tokio::test]
async fn detail_for_misspelled_code_suggests_matches() {
    let server = fixture_server();

    let response = server.get("/country/Germny").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    let detail = body["detail"].as_str().unwrap_or_default();
    assert!(detail.contains("Did you mean"));
    assert!(detail.contains("DEU"));
}

#[tokio::test]
async fn route_lists_country_names() {
    let server = fixture_server();

    let response = server
        .get("/route")
        .add_query_param("start", "prt")
        .add_query_param("end", "DEU")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "found");
    assert_eq!(body["hops"], 3);
    assert_eq!(
        body["route"],
        serde_json::json!(["Portugal", "Spain", "France", "Germany"])
    );
    assert_eq!(body["codes"], serde_json::json!(["PRT", "ESP", "FRA", "DEU"]));
}

#[tokio::test]
async fn disconnected_countries_are_no_route_not_error() {
    let server = fixture_server();

    let response = server
        .get("/route")
        .add_query_param("start", "ISL")
        .add_query_param("end", "FRA")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "no_route");
    assert_eq!(body["route"], serde_json::json!([]));
    assert!(body.get("hops").is_none());
}

#[tokio::test]
async fn route_with_unknown_endpoint_is_not_found() {
    let server = fixture_server();

    let response = server
        .get("/route")
        .add_query_param("start", "FRA")
        .add_query_param("end", "Germny")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_problem(&body, 404, "/problems/unknown-country");
    assert!(body["detail"].as_str().unwrap().contains("DEU"));
}

#[tokio::test]
async fn route_with_missing_parameter_is_bad_request() {
    let server = fixture_server();

    let response = server.get("/route").add_query_param("start", "FRA").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("'end'"));
}

#[tokio::test]
async fn missing_parameter_does_not_load_dataset() {
    let (server, state) = server_for(fixture_path());

    server.get("/route").await.assert_status(StatusCode::BAD_REQUEST);
    server.get("/countries").await.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(state.service().cache().stats().fetches, 0);
}

#[tokio::test]
async fn unavailable_dataset_is_service_unavailable() {
    let (server, state) = server_for(PathBuf::from("/nonexistent/countries.json"));

    let search = server
        .get("/countries")
        .add_query_param("search", "fr")
        .await;
    search.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_problem(&search.json::<Value>(), 503, "/problems/dataset-unavailable");

    server
        .get("/country/FRA")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    server
        .get("/route")
        .add_query_param("start", "FRA")
        .add_query_param("end", "DEU")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    // Every query retried the fetch; nothing was cached.
    assert_eq!(state.service().cache().stats().fetches, 3);
    server
        .get("/health/ready")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn readiness_follows_first_load() {
    let server = fixture_server();

    server.get("/health/live").await.assert_status_ok();
    server
        .get("/health/ready")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    server.get("/country/DEU").await.assert_status_ok();

    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    assert_eq!(ready.json::<Value>()["countries_loaded"], 15);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let server = fixture_server();

    let response = server
        .get("/country/XYZ")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-42"),
        )
        .await;

    assert_eq!(
        response.header("x-request-id"),
        HeaderValue::from_static("trace-42")
    );
    assert_eq!(response.json::<Value>()["instance"], "trace-42");
}
