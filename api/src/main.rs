use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tally_api::{create_app, AppState};
use tally_core::repositories::{InMemoryUserRepository, UserRepository};
use tally_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, TokenService, TokenServiceConfig,
};
use tally_infra::{DatabasePool, MySqlUserRepository};
use tally_shared::config::LogFormat;
use tally_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_tracing(&config);

    info!(environment = %config.environment, "Starting Tally API server");
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET not set; using the development signing secret");
    }

    match &config.database {
        Some(database) => {
            let pool = DatabasePool::new(database)
                .await
                .context("Failed to connect to the database")?;
            pool.ensure_schema().await.context("Failed to prepare schema")?;
            info!("Using MySQL user store");
            serve(Arc::new(MySqlUserRepository::new(pool.get_pool().clone())), &config).await?;
            pool.close().await;
        }
        None => {
            warn!("DATABASE_URL not set; users are kept in memory and lost on restart");
            serve(Arc::new(InMemoryUserRepository::new()), &config).await?;
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let registry = tracing_subscriber::registry().with(filter);

    match config.logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        LogFormat::Compact => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
    }
}

async fn serve<U>(user_repository: Arc<U>, config: &AppConfig) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
{
    let hasher = BcryptPasswordHasher::new(config.auth.password.bcrypt_cost)
        .context("Invalid bcrypt cost")?;
    let token_service = TokenService::new(TokenServiceConfig::from(&config.auth.jwt))
        .context("Failed to build token service")?;

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::new(hasher),
        Arc::new(token_service),
        AuthServiceConfig::from(&config.auth),
    ));
    let app_state = web::Data::new(AppState { auth_service });

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server listening");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    Ok(())
}
