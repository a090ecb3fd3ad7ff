pub mod client_info;
pub mod rate_limiter;
pub mod token;
pub mod user_agent;
