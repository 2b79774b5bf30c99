use std::sync::Arc;
use std::time::Duration;

use fuelmap::core::action::{Action, update};
use fuelmap::core::fuel::FuelType;
use fuelmap::core::selector::cheapest;
use fuelmap::core::state::App;
use fuelmap::core::station::Position;
use fuelmap::core::view::ViewMode;
use fuelmap::core::CoreError;
use fuelmap::location::{FixedPosition, NoPosition};
use fuelmap::stations::providers::HttpStationSource;
use fuelmap::stations::{FetchPipeline, SourceError, StationRepository, StationSource};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn here() -> Position {
    Position::new(-43.5321, 172.6362).unwrap()
}

fn source_for(server: &MockServer) -> HttpStationSource {
    HttpStationSource::new(
        format!("{}/api/v1/gas-stations", server.uri()),
        5000,
        Duration::from_secs(5),
    )
    .unwrap()
}

fn shell_and_bp() -> serde_json::Value {
    json!([
        {
            "location_name": "Shell",
            "address_line1": "1 Riccarton Rd",
            "city": "Christchurch",
            "state_province": "Canterbury",
            "country": "New Zealand",
            "latitude": "-43.53",
            "longitude": 172.63,
            "fuel_types": ["Unleaded 91", "Unleaded 95"],
            "prices": [2.10, "2.30"]
        },
        {
            "location_name": "BP",
            "address_line1": "2 Blenheim Rd",
            "city": "Christchurch",
            "country": "New Zealand",
            "latitude": -43.52,
            "longitude": 172.64,
            "fuel_types": ["Unleaded 91", "Diesel"],
            "prices": [2.05, 2.00]
        }
    ])
}

// ============================================================================
// HTTP Station Source Tests
// ============================================================================

#[tokio::test]
async fn test_http_source_sends_position_and_radius() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gas-stations"))
        .and(query_param("latitude", "-43.5321"))
        .and(query_param("longitude", "172.6362"))
        .and(query_param("radius", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shell_and_bp()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stations = source_for(&mock_server).fetch(here()).await.unwrap();

    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].location_name.as_deref(), Some("Shell"));
}

#[tokio::test]
async fn test_http_source_accepts_wrapped_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gas-stations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "results": shell_and_bp() })),
        )
        .mount(&mock_server)
        .await;

    let stations = source_for(&mock_server).fetch(here()).await.unwrap();

    assert_eq!(stations.len(), 2);
}

#[tokio::test]
async fn test_http_source_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gas-stations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch(here()).await;

    match result {
        Err(SourceError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_source_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gas-stations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"stations\": 42}"))
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch(here()).await;

    assert!(matches!(result, Err(SourceError::Parse(_))));
}

#[tokio::test]
async fn test_http_source_connection_refused() {
    let source = HttpStationSource::new(
        "http://127.0.0.1:9/api/v1/gas-stations".to_string(),
        5000,
        Duration::from_secs(5),
    )
    .unwrap();

    let result = source.fetch(here()).await;

    assert!(matches!(result, Err(SourceError::Network(_))));
}

// ============================================================================
// Repository + Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_repository_normalizes_http_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gas-stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shell_and_bp()))
        .mount(&mock_server)
        .await;

    let repository = StationRepository::new(Arc::new(source_for(&mock_server)));
    let collection = repository.load(here()).await.unwrap();

    let shell = &collection.stations()[0];
    assert_eq!(shell.price_for(FuelType::Unleaded95), Some(2.30));
    assert_eq!(
        shell.address.one_line(),
        "1 Riccarton Rd, Christchurch, Canterbury, New Zealand"
    );
    assert_eq!(
        cheapest(collection.stations(), FuelType::Unleaded91).map(|s| s.name.as_str()),
        Some("BP")
    );
}

#[tokio::test]
async fn test_repository_reports_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gas-stations"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let repository = StationRepository::new(Arc::new(source_for(&mock_server)));
    let err = repository.load(here()).await.unwrap_err();

    assert_eq!(
        err,
        CoreError::fetch_failure("API error (HTTP 503): maintenance")
    );
}

#[tokio::test]
async fn test_pipeline_end_to_end_into_app() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gas-stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shell_and_bp()))
        .mount(&mock_server)
        .await;

    let pipeline = FetchPipeline::new(
        Arc::new(FixedPosition(here())),
        StationRepository::new(Arc::new(source_for(&mock_server))),
        Position::new(-43.525, 172.643).unwrap(),
        Duration::from_secs(1),
    );
    let mut app = App::new(Some(FuelType::Unleaded91), ViewMode::Spatial);
    let token = app.fetches.issue();

    update(&mut app, pipeline.run(token).await);

    assert_eq!(app.stations.len(), 2);
    assert_eq!(app.focus.focused().map(|s| s.name.as_str()), Some("BP"));
    assert!(app.advisory.is_none());

    update(&mut app, Action::SelectFuel(Some(FuelType::Diesel)));
    assert_eq!(app.focus.focused().map(|s| s.name.as_str()), Some("BP"));
}

#[tokio::test]
async fn test_pipeline_without_position_fetches_at_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gas-stations"))
        .and(query_param("latitude", "-43.525"))
        .and(query_param("longitude", "172.643"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipeline = FetchPipeline::new(
        Arc::new(NoPosition),
        StationRepository::new(Arc::new(source_for(&mock_server))),
        Position::new(-43.525, 172.643).unwrap(),
        Duration::from_secs(1),
    );
    let mut app = App::new(Some(FuelType::Unleaded91), ViewMode::Spatial);
    let token = app.fetches.issue();

    update(&mut app, pipeline.run(token).await);

    assert!(app.position.as_ref().unwrap().is_default());
    assert!(app.stations.is_empty());
    assert!(app.advisory.as_deref().unwrap().contains("default position"));
}
