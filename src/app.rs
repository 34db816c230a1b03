use crate::api_docs::ApiDoc;
use crate::app_state::AppState;
use crate::config::Config;
use crate::core::middleware::http_logger::{REQUEST_ID_HEADER, http_logger};
use crate::routes;
use crate::utils::extractor::IpAndRouteKeyExtractor;
use axum::{Router, middleware};
use http::{HeaderValue, header};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::{ServiceBuilderExt, cors::CorsLayer, propagate_header::PropagateHeaderLayer};
use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiDocument;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

/// Every route with its state applied, no outer middleware.
pub fn create_router(app_state: AppState) -> (Router, OpenApiDocument) {
    OpenApiRouter::<AppState>::with_openapi(ApiDoc::openapi())
        .nest("/health", routes::health::route::create_route())
        .nest(
            "/api/v1",
            OpenApiRouter::new()
                .merge(routes::event::route::create_route())
                .merge(routes::dog::route::create_route())
                .merge(routes::dashboard::route::create_route())
                .merge(routes::notification::route::create_route())
                .merge(routes::cron::route::create_route()),
        )
        .with_state(app_state)
        .split_for_parts()
}

pub async fn create_app(config: &Config) -> eyre::Result<Router> {
    let app_state = AppState::init(config).await?;
    let (mut router, api) = create_router(app_state);

    if config.swagger_enabled {
        let swagger_config = utoipa_swagger_ui::Config::new(["/"]).display_request_duration(true);
        let swagger_ui = SwaggerUi::new("/swagger-ui")
            .url("/", api)
            .config(swagger_config);
        router = router.merge(swagger_ui);
    }

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(config.rate_limit_req_per_sec)
            .key_extractor(IpAndRouteKeyExtractor)
            .finish()
            .ok_or_else(|| eyre::eyre!("invalid rate limit configuration"))?,
    );
    let governor_limiter = governor_conf.limiter().clone();
    let interval = Duration::from_secs(60);
    tokio::spawn(async move {
        loop {
            sleep(interval).await;
            tracing::debug!("rate limiting storage size: {}", governor_limiter.len());
            governor_limiter.retain_recent();
        }
    });

    let cors_layer = if let Some(whitelist) = &config.cors_origin_whitelist {
        let origins = whitelist
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_headers(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .expose_headers(tower_http::cors::Any)
            .allow_origin(origins)
    } else {
        CorsLayer::permissive()
    };

    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    let middleware = ServiceBuilder::new()
        .layer(PropagateHeaderLayer::new(header::HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .sensitive_request_headers(sensitive_headers.clone())
        .layer(middleware::from_fn(http_logger))
        .sensitive_response_headers(sensitive_headers)
        .compression()
        .layer(cors_layer)
        .layer(GovernorLayer {
            config: governor_conf,
        });

    let router = Router::new().merge(router).layer(middleware);
    Ok(router)
}
