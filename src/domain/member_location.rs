use crate::domain::{GeoPoint, TravelMode};
use serde::Serialize;

/// The resolved location of one group member.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberLocation {
    pub member_id: String,
    pub point: GeoPoint,
    pub address: Option<String>,
    pub travel_mode: TravelMode,
}

/// Travel time in minutes from a member's location to the meeting point.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelTimeSample {
    pub member_id: String,
    pub minutes: f64,
}
