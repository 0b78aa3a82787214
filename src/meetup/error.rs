use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("at least one location is required to compute a midpoint")]
    NoPoints,
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("at least one travel time is required to compute fairness")]
    NoTravelTimes,
    #[error("travel time {0} must be a finite, non-negative number of minutes")]
    InvalidTravelTime(f64),
}
