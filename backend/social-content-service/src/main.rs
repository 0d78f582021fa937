use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use social_content_service::security::TokenKeys;
use social_content_service::{api_routes, db, json_config, AppState, Config};

async fn health(state: web::Data<AppState>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "social-content-service",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "social-content-service",
            }))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|err| anyhow::anyhow!(err))?;

    let pool = db::create_pool(&config.database)
        .await
        .context("failed to connect to postgres")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let state = AppState::new(
        pool,
        TokenKeys::new(&config.auth.jwt_secret, config.auth.token_ttl_secs),
        Duration::from_millis(config.database.statement_timeout_ms),
    );

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!(%bind_address, env = %config.app.env, "starting social-content-service");

    let allowed_origins = config.cors.allowed_origins.clone();
    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/health", web::get().to(health))
            .configure(api_routes)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
