pub mod app;
pub mod config;
pub mod geo;
pub mod managers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;
