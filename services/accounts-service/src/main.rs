use accounts_service::config::load_accounts_config;
use accounts_service::extract::CORRELATION_ID_HEADER;
use accounts_service::service::HttpCustomersService;
use accounts_service::{router, AppState};
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = load_accounts_config()?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.customers_timeout_seconds))
        .build()?;
    let customers = Arc::new(HttpCustomersService::new(client, config.customers_base_url.clone()));

    let state = AppState { customers };

    let allowed_origins = [
        "http://localhost:3000",
        "http://localhost:3001",
        "http://localhost:5173",
    ];

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        ))
        .allow_methods([Method::GET])
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static(CORRELATION_ID_HEADER),
        ]);

    let app = router(state).layer(cors);

    let ip: IpAddr = config.host.parse()?;
    let addr = SocketAddr::from((ip, config.port));

    println!("starting accounts-service on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
