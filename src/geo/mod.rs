//! Best-effort IP geolocation over an ordered chain of external providers.

pub mod provider;
pub mod resolver;
pub mod shape;

pub use provider::{GeoError, GeoProvider, HttpGeoProvider};
pub use resolver::{GeoResolver, is_local_ip};
