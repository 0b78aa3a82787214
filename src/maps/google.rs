use crate::app_config::AppConfig;
use crate::domain::{GeoPoint, TravelMode, TravelTimeSample, Venue};
use crate::maps::domain::{ApiStatus, DistanceMatrixResponse, GeocodeResponse, HasApiStatus, NearbySearchResponse};
use crate::maps::retry::backoff;
use crate::maps::{MapsError, MapsService};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_retry::RetryIf;
use tracing::{debug, info, instrument, warn};

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";
const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";

#[derive(Debug)]
pub struct GoogleMapsClient {
    client: Client,
    config: Arc<AppConfig>,
}

impl GoogleMapsClient {
    pub fn new(client: Client, config: Arc<AppConfig>) -> Self {
        GoogleMapsClient { client, config }
    }

    /// Sends a GET request, retrying transient failures. `ZERO_RESULTS` is left to the caller.
    #[instrument(skip(self, query))]
    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, MapsError>
    where
        T: DeserializeOwned + HasApiStatus,
    {
        let url = format!("{}{}", self.config.maps().url(), path);
        let url = url.as_str();
        let client = &self.client;
        let api_key = self.config.maps().api_key();

        RetryIf::spawn(
            backoff(self.config.maps()),
            move || async move {
                let response = client.get(url).query(query).query(&[("key", api_key)]).send().await.map_err(MapsError::request)?;

                let status = response.status();
                if !status.is_success() {
                    warn!(status_code = %status, "⚠️ Request to {} failed", path);
                    return Err(MapsError::Http(status));
                }

                let body = response.json::<T>().await.map_err(MapsError::request)?;
                match body.status().clone() {
                    ApiStatus::Ok | ApiStatus::ZeroResults => Ok(body),
                    status => {
                        warn!(?status, "⚠️ Maps API rejected the request to {}", path);
                        Err(MapsError::Api {
                            status,
                            message: body.error_message().map(str::to_owned),
                        })
                    }
                }
            },
            |e: &MapsError| e.is_transient(),
        )
        .await
    }
}

#[async_trait]
impl MapsService for GoogleMapsClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeoPoint, MapsError> {
        debug!("Geocoding '{}'...", address);
        let response = self.get_json::<GeocodeResponse>(GEOCODE_PATH, &[("address", address.to_string())]).await?;

        let result = response.results.into_iter().next().ok_or_else(|| MapsError::NotFound(address.to_string()))?;
        let point = GeoPoint::try_from(result.geometry.location)?;
        debug!("Geocoding '{}'... OK, {}", address, point);

        Ok(point)
    }

    #[instrument(skip(self))]
    async fn travel_time(
        &self,
        member_id: &str,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: TravelMode,
        departure: Option<DateTime<Utc>>,
    ) -> Result<TravelTimeSample, MapsError> {
        let mut query = vec![
            ("origins", origin.to_string()),
            ("destinations", destination.to_string()),
            ("mode", mode.as_api_str().to_string()),
        ];
        if let Some(departure) = departure {
            query.push(("departure_time", departure.timestamp().to_string()));
        }

        let response = self.get_json::<DistanceMatrixResponse>(DISTANCE_MATRIX_PATH, &query).await?;
        let no_route = |status: ApiStatus| MapsError::NoRoute {
            member_id: member_id.to_string(),
            status,
        };

        let element = response.first_element().ok_or_else(|| no_route(ApiStatus::ZeroResults))?;
        let duration = match (&element.status, &element.duration) {
            (ApiStatus::Ok, Some(duration)) => duration,
            (status, _) => return Err(no_route(status.clone())),
        };

        Ok(TravelTimeSample {
            member_id: member_id.to_string(),
            minutes: duration.value as f64 / 60.0,
        })
    }

    #[instrument(skip(self))]
    async fn nearby(&self, center: GeoPoint, radius_m: u32, venue_type: &str) -> Result<Vec<Venue>, MapsError> {
        info!("Searching for venues of type '{}' near {}...", venue_type, center);
        let query = [
            ("location", center.to_string()),
            ("radius", radius_m.to_string()),
            ("type", venue_type.to_string()),
        ];
        let response = self.get_json::<NearbySearchResponse>(NEARBY_SEARCH_PATH, &query).await?;

        let venues = response
            .results
            .into_iter()
            .map(|place| -> Result<Venue, MapsError> {
                Ok(Venue {
                    place_id: place.place_id,
                    name: place.name,
                    vicinity: place.vicinity,
                    location: GeoPoint::try_from(place.geometry.location)?,
                    rating: place.rating,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!("Searching for venues of type '{}' near {}... OK, {} found", venue_type, center, venues.len());

        Ok(venues)
    }
}
