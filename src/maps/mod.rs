pub mod client;
pub mod domain;
mod google;
mod retry;
mod service;

pub use google::GoogleMapsClient;
pub use service::{MapsError, MapsService};
