//! Coordinates for patrol routes and map alerts.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum number of waypoints a patrol route needs (start and end).
pub const MIN_ROUTE_WAYPOINTS: usize = 2;

/// Maximum number of waypoints stored per route.
pub const MAX_ROUTE_WAYPOINTS: usize = 500;

/// A WGS84 point as sent by the map client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
}

/// Validate a latitude/longitude pair.
pub fn validate_point(lat: f64, lng: f64) -> Result<(), CoreError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(CoreError::Validation(format!(
            "latitude must be between -90 and 90, got {lat}"
        )));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(CoreError::Validation(format!(
            "longitude must be between -180 and 180, got {lng}"
        )));
    }
    Ok(())
}

/// Validate the waypoint list of a patrol route.
pub fn validate_route(waypoints: &[Waypoint]) -> Result<(), CoreError> {
    if waypoints.len() < MIN_ROUTE_WAYPOINTS {
        return Err(CoreError::Validation(format!(
            "A route needs at least {MIN_ROUTE_WAYPOINTS} waypoints"
        )));
    }
    if waypoints.len() > MAX_ROUTE_WAYPOINTS {
        return Err(CoreError::Validation(format!(
            "A route can have at most {MAX_ROUTE_WAYPOINTS} waypoints"
        )));
    }
    waypoints
        .iter()
        .try_for_each(|w| validate_point(w.lat, w.lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(lat: f64, lng: f64) -> Waypoint {
        Waypoint { lat, lng }
    }

    #[test]
    fn two_point_route_is_valid() {
        assert!(validate_route(&[wp(-33.45, -70.66), wp(-33.44, -70.65)]).is_ok());
    }

    #[test]
    fn single_point_route_is_rejected() {
        assert!(validate_route(&[wp(-33.45, -70.66)]).is_err());
    }

    #[test]
    fn out_of_range_points_are_rejected() {
        assert!(validate_point(91.0, 0.0).is_err());
        assert!(validate_point(0.0, -181.0).is_err());
        assert!(validate_point(f64::NAN, 0.0).is_err());
        assert!(validate_route(&[wp(0.0, 0.0), wp(100.0, 0.0)]).is_err());
    }
}
