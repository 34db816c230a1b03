pub mod api_docs;
pub mod app;
pub mod app_state;
pub mod config;
pub mod core;
pub mod database;
pub mod enums;
pub mod errors;
pub mod models;
pub mod routes;
pub mod utils;
