use crate::domain::{GeoPoint, TravelMode};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SerializedGroup {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) venue_type: Option<String>,
    pub(crate) meet_at: Option<DateTime<Utc>>,
    pub(crate) members: Vec<SerializedMember>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SerializedMember {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) address: Option<String>,
    pub(crate) location: Option<GeoPoint>,
    #[serde(default)]
    pub(crate) travel_mode: TravelMode,
}
