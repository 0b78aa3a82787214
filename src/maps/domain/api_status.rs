use serde::Deserialize;

// API: https://developers.google.com/maps/documentation/geocoding/requests-geocoding#StatusCodes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    NotFound,
    OverQueryLimit,
    OverDailyLimit,
    RequestDenied,
    InvalidRequest,
    MaxElementsExceeded,
    MaxDimensionsExceeded,
    UnknownError,
    #[serde(other)]
    Other,
}

/// Implemented by every top-level response, the HTTP status is 200 even when the request failed.
pub trait HasApiStatus {
    fn status(&self) -> &ApiStatus;

    fn error_message(&self) -> Option<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\"OK\"", ApiStatus::Ok)]
    #[case("\"ZERO_RESULTS\"", ApiStatus::ZeroResults)]
    #[case("\"OVER_QUERY_LIMIT\"", ApiStatus::OverQueryLimit)]
    #[case("\"REQUEST_DENIED\"", ApiStatus::RequestDenied)]
    #[case("\"SOMETHING_NEW\"", ApiStatus::Other)]
    fn deserializes_status_codes(#[case] json: &str, #[case] expected: ApiStatus) {
        assert_eq!(serde_json::from_str::<ApiStatus>(json).unwrap(), expected);
    }
}
