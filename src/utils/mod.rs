pub mod extractor;
pub mod models;
pub mod time;
pub mod tracing;
