use crate::maps::domain::{ApiStatus, Geometry, HasApiStatus};
use serde::Deserialize;

// API: https://developers.google.com/maps/documentation/places/web-service/search-nearby
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    pub status: ApiStatus,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    pub vicinity: Option<String>,
    pub geometry: Geometry,
    pub rating: Option<f64>,
}

impl HasApiStatus for NearbySearchResponse {
    fn status(&self) -> &ApiStatus {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
