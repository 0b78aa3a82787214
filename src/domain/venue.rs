use crate::domain::GeoPoint;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub place_id: String,
    pub name: String,
    pub vicinity: Option<String>,
    pub location: GeoPoint,
    pub rating: Option<f64>,
}
