//! Coordinates

use std::str::FromStr;

use thiserror::Error;

/// Mean Earth radius in kilometres, as used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub latitude: f64,

    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate from decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another coordinate, in kilometres.
    pub fn distance_km(&self, other: Coordinate) -> f64 {
        distance_km(*self, other)
    }
}

/// Errors parsing a `"lat,lon"` coordinate string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateParseError {
    /// The string did not contain exactly one comma.
    #[error("expected format 'LAT,LON', got: {0}")]
    MissingSeparator(String),

    /// A component was not a valid decimal number.
    #[error("invalid coordinate component: {0}")]
    InvalidComponent(String),
}

impl FromStr for Coordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoordinateParseError::MissingSeparator(s.to_string()))?;

        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_err| CoordinateParseError::InvalidComponent(lat.to_string()))?;

        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|_err| CoordinateParseError::InvalidComponent(lon.to_string()))?;

        Ok(Coordinate {
            latitude,
            longitude,
        })
    }
}

/// Great-circle (haversine) distance between two coordinates, in kilometres.
///
/// The same metric is used everywhere a distance appears: route objectives,
/// itinerary totals and radius filters.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat_a.cos() * lat_b.cos();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
