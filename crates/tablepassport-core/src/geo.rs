//! Spherical-Earth geometry.
//!
//! Distances are great-circle distances on a sphere of radius
//! [`EARTH_RADIUS_METERS`], computed with the haversine formula, which stays
//! numerically stable for the short (sub-kilometre) distances the nearby
//! search deals in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Builds a validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] when either component is non-finite or out of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    #[must_use]
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        haversine_meters(*self, *other)
    }
}

/// Great-circle distance in meters between two points.
#[must_use]
pub fn haversine_meters(from: LatLng, to: LatLng) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
}
