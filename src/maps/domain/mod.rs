mod api_status;
mod distance_matrix;
mod geocode;
mod lat_lng;
mod nearby_search;

pub use api_status::{ApiStatus, HasApiStatus};
pub use distance_matrix::{DistanceMatrixElement, DistanceMatrixResponse, DistanceMatrixRow, TextValue};
pub use geocode::{GeocodeResponse, GeocodeResult, Geometry};
pub use lat_lng::LatLng;
pub use nearby_search::{NearbySearchResponse, PlaceResult};
