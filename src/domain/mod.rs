pub mod events;
mod geo_point;
mod group;
mod member_location;
mod travel_mode;
mod venue;

pub use geo_point::GeoPoint;
pub use group::{Group, Member};
pub use member_location::{MemberLocation, TravelTimeSample};
pub use travel_mode::TravelMode;
pub use venue::Venue;
