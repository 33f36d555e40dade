/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (Database) → Router 組み立て
 * - Middleware の適用 (CORS / request-id / trace / body limit)
 * - DB 設定が無ければ Unconfigured、client を作れなければ Unusable
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{Config, DatabaseSettings},
    middleware,
    services::database::{Database, MongoGateway},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,comphilfe_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await;
    tracing::info!(database_configured = state.db.is_configured(), "application state ready");
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> AppState {
    let db = connect_database(&config.database).await;
    AppState::new(db, config.database.clone())
}

// Missing settings leave the database unconfigured, unusable ones leave it unusable; startup continues.
async fn connect_database(settings: &DatabaseSettings) -> Database {
    let (Some(url), Some(name)) = (settings.url.as_deref(), settings.name.as_deref()) else {
        tracing::warn!("DATABASE_URL/DATABASE_NAME not set, running without a database");
        return Database::Unconfigured;
    };

    match MongoGateway::new(url, name, settings.server_selection_timeout).await {
        Ok(gateway) => {
            tracing::info!(database = name, "database client ready");
            Database::configured(gateway)
        }
        Err(e) => {
            tracing::warn!(error = %e, "database client could not be created, running without a database");
            Database::Unusable {
                reason: e.to_string(),
            }
        }
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new().merge(api::routes()).with_state(state);

    let router = middleware::http::apply(router, config);
    middleware::cors::apply(router)
}
