use crate::maps::domain::{ApiStatus, HasApiStatus};
use serde::Deserialize;

// API: https://developers.google.com/maps/documentation/distance-matrix/distance-matrix#DistanceMatrixResponse
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
    pub status: ApiStatus,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceMatrixRow {
    pub elements: Vec<DistanceMatrixElement>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixElement {
    pub status: ApiStatus,
    pub duration: Option<TextValue>,
    pub distance: Option<TextValue>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

impl DistanceMatrixResponse {
    pub fn first_element(&self) -> Option<&DistanceMatrixElement> {
        self.rows.first().and_then(|row| row.elements.first())
    }
}

impl HasApiStatus for DistanceMatrixResponse {
    fn status(&self) -> &ApiStatus {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
