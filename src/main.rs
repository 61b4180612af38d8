use fullstack_api::auth::verifier_from_config;
use fullstack_api::config::config;
use fullstack_api::{app, database, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config();
    tracing::info!("Starting fullstack-api in {:?} mode", config.environment);

    let pool = database::connect(&config.database.url, config.database.max_connections).await?;
    database::migrate(&pool).await?;

    let verifier = verifier_from_config(config);
    let state = AppState::new(pool, verifier);

    let addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
