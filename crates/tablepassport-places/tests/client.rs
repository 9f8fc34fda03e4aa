//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use serde_json::json;
use tablepassport_core::LatLng;
use tablepassport_places::{PlacesClient, PlacesError, SearchStatus};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", "TablePassport/1.0", 5, base_url)
        .expect("client construction should not fail")
}

const CENTER: LatLng = LatLng {
    lat: 40.0,
    lng: -75.0,
};

#[tokio::test]
async fn nearby_search_sends_expected_query_and_parses_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("location", "40,-75"))
        .and(query_param("radius", "400"))
        .and(query_param("type", "restaurant"))
        .and(query_param("keyword", "pizza"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                {
                    "place_id": "p1",
                    "name": "Slice",
                    "vicinity": "1 Main St",
                    "geometry": { "location": { "lat": 40.001, "lng": -75.0 } },
                    "types": ["restaurant"],
                    "rating": 4.2
                },
                { "name": "no id, skipped" },
                {
                    "place_id": "p2",
                    "name": "Ghost Kitchen"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let search = test_client(&server.uri())
        .nearby_search(CENTER, 400.0, "restaurant", Some("pizza"))
        .await
        .expect("search should succeed");

    assert_eq!(search.status, SearchStatus::Ok);
    assert_eq!(search.candidates.len(), 2);
    assert_eq!(search.candidates[0].place_id, "p1");
    assert!(search.candidates[0].location().is_some());
    assert!(search.candidates[1].location().is_none());
}

#[tokio::test]
async fn nearby_search_omits_keyword_when_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param_is_missing("keyword"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let search = test_client(&server.uri())
        .nearby_search(CENTER, 400.0, "restaurant", None)
        .await
        .expect("zero results is not an error");

    assert_eq!(search.status, SearchStatus::ZeroResults);
    assert!(search.candidates.is_empty());
}

#[tokio::test]
async fn nearby_search_maps_failure_status_to_api_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota for this API.",
            "results": []
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .nearby_search(CENTER, 400.0, "restaurant", None)
        .await
        .unwrap_err();

    match err {
        PlacesError::ApiStatus { status, message } => {
            assert_eq!(status, "OVER_QUERY_LIMIT");
            assert!(message.unwrap_or_default().contains("quota"));
        }
        other => panic!("expected ApiStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn http_errors_do_not_leak_the_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .nearby_search(CENTER, 400.0, "restaurant", None)
        .await
        .unwrap_err();

    assert!(matches!(err, PlacesError::Http(_)), "got {err:?}");
    assert!(!err.to_string().contains("test-key"), "leaked: {err}");
}

#[tokio::test]
async fn place_details_requests_fields_and_returns_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p1"))
        .and(query_param("fields", "formatted_address,website"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "formatted_address": "1 Main St, Philadelphia, PA 19103, USA",
                "website": "https://slice.example.com",
                "opening_hours": { "open_now": false, "weekday_text": ["Monday: Closed"] }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details = test_client(&server.uri())
        .place_details("p1", &["formatted_address", "website"])
        .await
        .expect("details should succeed");

    assert_eq!(
        details.formatted_address.as_deref(),
        Some("1 Main St, Philadelphia, PA 19103, USA")
    );
    assert_eq!(details.website.as_deref(), Some("https://slice.example.com"));
    assert!(details.formatted_phone_number.is_none());
    assert_eq!(
        details.opening_hours.map(|h| h.weekday_text),
        Some(vec!["Monday: Closed".to_string()])
    );
}

#[tokio::test]
async fn place_details_rejects_not_found_and_missing_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "NOT_FOUND" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "empty"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "OK" })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let err = client.place_details("gone", &["name"]).await.unwrap_err();
    assert!(
        matches!(err, PlacesError::ApiStatus { ref status, .. } if status == "NOT_FOUND"),
        "got {err:?}"
    );

    let err = client.place_details("empty", &["name"]).await.unwrap_err();
    assert!(
        matches!(err, PlacesError::MissingResult { ref place_id } if place_id == "empty"),
        "got {err:?}"
    );
}
