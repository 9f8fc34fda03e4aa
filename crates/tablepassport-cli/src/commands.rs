//! Command handlers. Each builds the clients it needs from [`AppConfig`] and
//! prints its result to stdout as pretty JSON; logs go to stderr.

use anyhow::Context;
use tablepassport_core::{AppConfig, LatLng};
use tablepassport_geocode::NominatimClient;
use tablepassport_nearby::{LocationQuery, NearbyResolver};
use tablepassport_places::PlacesClient;

fn geocoder(config: &AppConfig) -> anyhow::Result<NominatimClient> {
    NominatimClient::with_base_url(
        &config.user_agent,
        config.request_timeout_secs,
        &config.geocode_country,
        &config.nominatim_base_url,
    )
    .context("failed to build geocoding client")
}

pub(crate) async fn run_nearby(config: &AppConfig, query: &LocationQuery) -> anyhow::Result<()> {
    let key = config
        .google_places_key
        .as_deref()
        .context("GOOGLE_PLACES_KEY must be set to search for places")?;
    let places = PlacesClient::with_base_url(
        key,
        &config.user_agent,
        config.request_timeout_secs,
        &config.places_base_url,
    )
    .context("failed to build places client")?;
    let resolver = NearbyResolver::new(geocoder(config)?, places);

    let result = resolver.resolve(query).await?;
    tracing::info!(
        location = %result.resolved_location,
        returned = result.places.len(),
        total = result.total,
        "nearby search complete"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) async fn run_reverse(config: &AppConfig, lat: f64, lng: f64) -> anyhow::Result<()> {
    let point = LatLng::new(lat, lng)?;
    let summary = geocoder(config)?.reverse(point).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
