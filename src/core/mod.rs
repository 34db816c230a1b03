pub mod cron_auth;
pub mod dashboard;
pub mod middleware;
pub mod notifier;
pub mod store;
pub mod text_generation;
