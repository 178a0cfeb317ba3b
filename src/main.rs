use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repobook::services::{BookService, Converter, GithubService};
use repobook::{AppState, Config, handlers};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "repobook"
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repobook=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    info!("Starting RepoBook server on {}:{}", config.host, config.port);
    match &config.github_token {
        Some(_) => info!("GitHub token configured, authenticated rate limits apply"),
        None => info!("No GitHub token configured, anonymous rate limits apply"),
    }

    let github = GithubService::new(config.github_api_url.clone(), config.github_token.clone())
        .expect("Failed to build GitHub client");
    let books = BookService::new(github, Converter::new(config.pandoc_bin.clone()));

    let app_state = web::Data::new(AppState {
        config: config.clone(),
        books,
    });

    let server_addr = format!("{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(handlers::json_config())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .route("/health", web::get().to(health_check))
            .configure(handlers::configure_generate_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
