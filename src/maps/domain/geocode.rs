use crate::maps::domain::{ApiStatus, HasApiStatus, LatLng};
use serde::Deserialize;

// API: https://developers.google.com/maps/documentation/geocoding/requests-geocoding#GeocodingResponses
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub status: ApiStatus,
    pub error_message: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

impl HasApiStatus for GeocodeResponse {
    fn status(&self) -> &ApiStatus {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
