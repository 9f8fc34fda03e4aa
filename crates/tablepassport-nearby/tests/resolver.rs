//! End-to-end tests for `NearbyResolver` against wiremock stand-ins for
//! Nominatim and Google Places. Both providers are served by one mock server;
//! their paths do not overlap.

use serde_json::{json, Value};
use tablepassport_core::EARTH_RADIUS_METERS;
use tablepassport_geocode::NominatimClient;
use tablepassport_nearby::{LocationQuery, NearbyError, NearbyResolver};
use tablepassport_places::PlacesClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CENTER_LAT: f64 = 40.0;
const CENTER_LNG: f64 = -75.0;

fn resolver(server: &MockServer) -> NearbyResolver {
    let geocoder = NominatimClient::with_base_url("TablePassport/1.0", 5, "us", &server.uri())
        .expect("geocoder");
    let places = PlacesClient::with_base_url("test-key", "TablePassport/1.0", 5, &server.uri())
        .expect("places client");
    NearbyResolver::new(geocoder, places)
}

fn lat_meters_north(meters: f64) -> f64 {
    CENTER_LAT + meters / (EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0)
}

fn result_at(id: &str, lat: f64, lng: f64) -> Value {
    json!({
        "place_id": id,
        "name": format!("Restaurant {id}"),
        "vicinity": format!("{id} Walnut St"),
        "geometry": { "location": { "lat": lat, "lng": lng } },
        "types": ["restaurant", "food"],
        "rating": 4.1,
        "user_ratings_total": 87,
        "price_level": 2,
        "opening_hours": { "open_now": true }
    })
}

fn gps_query(radius: f64) -> LocationQuery {
    LocationQuery {
        lat: Some(CENTER_LAT),
        lng: Some(CENTER_LNG),
        radius_meters: Some(radius),
        ..LocationQuery::default()
    }
}

async fn mount_search(server: &MockServer, status: &str, results: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": status,
            "results": results
        })))
        .mount(server)
        .await;
}

async fn mount_details_ok(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "formatted_address": "100 Detail Ave, Philadelphia, PA",
                "formatted_phone_number": "(215) 555-0199",
                "website": "https://detail.example.com"
            }
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn forbid_geocoding(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn excludes_results_beyond_the_true_radius() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "OK",
        vec![
            result_at("far", lat_meters_north(450.0), CENTER_LNG),
            result_at("near", lat_meters_north(250.0), CENTER_LNG),
        ],
    )
    .await;
    mount_details_ok(&server, 1).await;

    let result = resolver(&server)
        .resolve(&gps_query(300.0))
        .await
        .expect("resolve should succeed");

    assert_eq!(result.total, 1);
    assert_eq!(result.places.len(), 1);
    assert_eq!(result.places[0].place_id, "near");
    assert!((result.places[0].distance_meters - 250.0).abs() < 1.0);
    assert_eq!(result.detail_failures, 0);
}

#[tokio::test]
async fn total_counts_filtered_candidates_before_truncation() {
    let server = MockServer::start().await;
    let mut results: Vec<Value> = (0..17)
        .map(|i| result_at(&format!("in{i}"), lat_meters_north(10.0 * f64::from(i)), CENTER_LNG))
        .collect();
    results.push(result_at("out", lat_meters_north(5_000.0), CENTER_LNG));
    results.push(json!({ "place_id": "no-geometry", "name": "Floating Bistro" }));
    mount_search(&server, "OK", results).await;
    mount_details_ok(&server, 10).await;

    let result = resolver(&server)
        .resolve(&gps_query(400.0))
        .await
        .expect("resolve should succeed");

    assert_eq!(result.total, 17);
    assert_eq!(result.places.len(), 10);
    let ids: Vec<&str> = result.places.iter().map(|p| p.place_id.as_str()).collect();
    assert_eq!(ids, (0..10).map(|i| format!("in{i}")).collect::<Vec<_>>());
    assert_eq!(
        result.places[0].address.as_deref(),
        Some("100 Detail Ave, Philadelphia, PA")
    );
}

#[tokio::test]
async fn coordinates_take_priority_over_city_and_zipcode() {
    let server = MockServer::start().await;
    forbid_geocoding(&server).await;
    mount_search(&server, "ZERO_RESULTS", vec![]).await;

    let query = LocationQuery {
        city: Some("Pittsburgh".to_string()),
        zipcode: Some("15222".to_string()),
        ..gps_query(400.0)
    };
    let result = resolver(&server).resolve(&query).await.expect("resolve");

    assert_eq!(result.resolved_location, "Pittsburgh");
    assert!((result.lat - CENTER_LAT).abs() < f64::EPSILON);
    assert!((result.lng - CENTER_LNG).abs() < f64::EPSILON);
}

#[tokio::test]
async fn gps_without_label_uses_fallback_literal() {
    let server = MockServer::start().await;
    forbid_geocoding(&server).await;
    mount_search(&server, "ZERO_RESULTS", vec![]).await;

    let result = resolver(&server)
        .resolve(&gps_query(400.0))
        .await
        .expect("resolve");

    assert_eq!(result.resolved_location, "Current Location");
    assert!(result.places.is_empty());
    assert_eq!(result.total, 0);
}

#[tokio::test]
async fn zipcode_is_geocoded_and_labelled_from_display_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("postalcode", "19103"))
        .and(query_param("countrycodes", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "lat": "39.9526",
            "lon": "-75.1652",
            "display_name": "19103, Center City, Philadelphia, Pennsylvania, United States"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("location", "39.9526,-75.1652"))
        .and(query_param("radius", "400"))
        .and(query_param("type", "restaurant"))
        .and(query_param("keyword", "ramen"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let query = LocationQuery {
        zipcode: Some("19103".to_string()),
        keyword: Some("ramen".to_string()),
        ..LocationQuery::default()
    };
    let result = resolver(&server).resolve(&query).await.expect("resolve");

    assert_eq!(result.resolved_location, "19103, Center City");
    assert!((result.lat - 39.9526).abs() < 1e-9);
}

#[tokio::test]
async fn unknown_zipcode_falls_back_to_city_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("postalcode", "00000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Media, PA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "lat": "39.9168",
            "lon": "-75.3877",
            "display_name": "Media, Delaware County, Pennsylvania, United States"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    mount_search(&server, "ZERO_RESULTS", vec![]).await;

    let query = LocationQuery {
        zipcode: Some("00000".to_string()),
        city: Some("Media, PA".to_string()),
        ..LocationQuery::default()
    };
    let result = resolver(&server).resolve(&query).await.expect("resolve");

    assert_eq!(result.resolved_location, "Media, Delaware County");
}

#[tokio::test]
async fn missing_location_is_a_validation_error_without_any_search() {
    let server = MockServer::start().await;
    forbid_geocoding(&server).await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let query = LocationQuery {
        lat: Some(CENTER_LAT),
        city: Some("  ".to_string()),
        ..LocationQuery::default()
    };
    let err = resolver(&server).resolve(&query).await.unwrap_err();

    assert!(matches!(err, NearbyError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn unresolvable_city_is_a_validation_error_without_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let query = LocationQuery {
        city: Some("Atlantis".to_string()),
        ..LocationQuery::default()
    };
    let err = resolver(&server).resolve(&query).await.unwrap_err();

    match err {
        NearbyError::Validation(msg) => assert!(msg.contains("Atlantis"), "message: {msg}"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn failure_status_becomes_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "quota exceeded",
            "results": []
        })))
        .mount(&server)
        .await;

    let err = resolver(&server)
        .resolve(&gps_query(400.0))
        .await
        .unwrap_err();

    match err {
        NearbyError::Upstream { status, message } => {
            assert_eq!(status, "OVER_QUERY_LIMIT");
            assert_eq!(message.as_deref(), Some("quota exceeded"));
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_detail_lookup_keeps_place_with_blank_fields() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "OK",
        vec![
            result_at("good", lat_meters_north(50.0), CENTER_LNG),
            result_at("broken", lat_meters_north(60.0), CENTER_LNG),
            result_at("denied", lat_meters_north(70.0), CENTER_LNG),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": { "formatted_phone_number": "(215) 555-0123" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "denied"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "REQUEST_DENIED" })),
        )
        .mount(&server)
        .await;

    let result = resolver(&server)
        .resolve(&gps_query(400.0))
        .await
        .expect("detail failures must not fail the request");

    assert_eq!(result.places.len(), 3);
    assert_eq!(result.detail_failures, 2);

    let good = &result.places[0];
    assert_eq!(good.phone.as_deref(), Some("(215) 555-0123"));
    assert_eq!(good.address.as_deref(), Some("good Walnut St"));

    for failed in &result.places[1..] {
        assert!(failed.phone.is_none());
        assert!(failed.website.is_none());
        assert_eq!(
            failed.address.as_deref(),
            Some(format!("{} Walnut St", failed.place_id).as_str())
        );
        assert_eq!(failed.rating, Some(4.1));
    }
}

#[tokio::test]
async fn invalid_radius_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    forbid_geocoding(&server).await;

    let err = resolver(&server)
        .resolve(&gps_query(75_000.0))
        .await
        .unwrap_err();

    assert!(matches!(err, NearbyError::Validation(_)), "got {err:?}");
}
