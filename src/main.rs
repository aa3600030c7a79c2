use stockroom::{app, apply_migrations, connect, ensure_database_exists, AppState, Settings, TokenVerifier};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stockroom=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = connect(&settings).await?;
    if settings.run_migrations {
        apply_migrations(&pool).await?;
    }

    let state = AppState::new(
        pool,
        TokenVerifier::new(&settings.jwt_secret),
        &settings.api_prefix,
    );
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(
        "stockroom listening on http://{} (api prefix '{}')",
        listener.local_addr()?,
        settings.api_prefix
    );
    axum::serve(listener, app(state)).await?;
    Ok(())
}
