pub mod cron;
pub mod dashboard;
pub mod dog;
pub mod event;
pub mod health;
pub mod notification;
