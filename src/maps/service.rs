use crate::domain::{GeoPoint, TravelMode, TravelTimeSample, Venue};
use crate::maps::domain::ApiStatus;
use crate::meetup::InvalidInput;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

/// The maps platform operations the planner relies on.
#[async_trait]
pub trait MapsService: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, MapsError>;

    async fn travel_time(
        &self,
        member_id: &str,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: TravelMode,
        departure: Option<DateTime<Utc>>,
    ) -> Result<TravelTimeSample, MapsError>;

    async fn nearby(&self, center: GeoPoint, radius_m: u32, venue_type: &str) -> Result<Vec<Venue>, MapsError>;
}

#[derive(Error, Debug)]
pub enum MapsError {
    /// Built through `MapsError::request`, which strips the URL and with it the API key.
    #[error("request error: {0}")]
    Request(reqwest::Error),
    #[error("maps API responded with HTTP {0}")]
    Http(StatusCode),
    #[error("maps API returned {status:?}: {}", message.as_deref().unwrap_or("no details"))]
    Api { status: ApiStatus, message: Option<String> },
    #[error("no results found for '{0}'")]
    NotFound(String),
    #[error("no route found for member '{member_id}': {status:?}")]
    NoRoute { member_id: String, status: ApiStatus },
    #[error("maps API returned an invalid location: {0}")]
    InvalidLocation(#[from] InvalidInput),
}

impl MapsError {
    pub fn request(error: reqwest::Error) -> Self {
        MapsError::Request(error.without_url())
    }

    /// Whether the same request may succeed when repeated.
    pub fn is_transient(&self) -> bool {
        match self {
            MapsError::Request(e) => !e.is_decode() && !e.is_builder(),
            MapsError::Http(status) => status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS,
            MapsError::Api { status, .. } => matches!(status, ApiStatus::OverQueryLimit | ApiStatus::UnknownError),
            MapsError::NotFound(_) | MapsError::NoRoute { .. } | MapsError::InvalidLocation(_) => false,
        }
    }
}
