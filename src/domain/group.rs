use crate::domain::{GeoPoint, TravelMode};
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub venue_type: Option<String>,
    pub meet_at: Option<DateTime<Utc>>,
    pub members: Vec<Member>,
}

/// A group member, at least one of `address` and `location` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
    pub travel_mode: TravelMode,
}
