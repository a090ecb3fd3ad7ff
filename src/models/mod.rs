pub mod device;
pub mod location;
pub mod requests;
pub mod responses;
pub mod session;
