use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    #[default]
    Transit,
    Driving,
    Walking,
}

impl TravelMode {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            TravelMode::Transit => "transit",
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
        }
    }
}
