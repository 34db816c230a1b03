use std::net::IpAddr;

use axum::http::Request;
use http::Method;
use tower_governor::{
    GovernorError,
    key_extractor::{KeyExtractor, SmartIpKeyExtractor},
};

/// Rate-limit key: client ip plus the route being hit, so a scheduler
/// calling the cron endpoint does not eat into an owner's budget for the
/// event and notification endpoints.
#[derive(Debug, Clone)]
pub struct IpAndRouteKeyExtractor;

#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct RequestKey {
    pub ip: IpAddr,
    pub method: Method,
    pub path: String,
}

impl KeyExtractor for IpAndRouteKeyExtractor {
    type Key = RequestKey;

    fn extract<B>(&self, req: &Request<B>) -> Result<Self::Key, GovernorError> {
        let ip = SmartIpKeyExtractor.extract(req)?;
        Ok(RequestKey {
            ip,
            method: req.method().clone(),
            path: req.uri().path().to_string(),
        })
    }

    fn key_name(&self, key: &Self::Key) -> Option<String> {
        Some(format!("{} {} {}", key.ip, key.method, key.path))
    }

    fn name(&self) -> &'static str {
        "IpAndRouteKeyExtractor"
    }
}
