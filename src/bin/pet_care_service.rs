use std::net::SocketAddr;

use pet_care_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    let app = app::create_app(&APP_CONFIG).await?;

    let address = format!("0.0.0.0:{}", APP_CONFIG.port);

    tracing::info!("Server listening on {}", &address);
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
