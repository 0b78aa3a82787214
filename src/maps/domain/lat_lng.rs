use crate::domain::GeoPoint;
use crate::meetup::InvalidInput;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl TryFrom<LatLng> for GeoPoint {
    type Error = InvalidInput;

    fn try_from(value: LatLng) -> Result<Self, Self::Error> {
        GeoPoint::new(value.lat, value.lng)
    }
}
