use crate::meetup::InvalidInput;
use std::fmt::{Display, Formatter};

const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A latitude/longitude pair in decimal degrees (WGS-84).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidInput> {
        let point = GeoPoint { latitude, longitude };
        point.validate()?;
        Ok(point)
    }

    /// Checks the coordinate ranges, NaN is never in range.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(InvalidInput::LatitudeOutOfRange(self.latitude));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(InvalidInput::LongitudeOutOfRange(self.longitude));
        }

        Ok(())
    }

    /// Great-circle distance in meters using the haversine formula.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lng = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

// Formats as the `lat,lng` pair the maps API expects
impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
