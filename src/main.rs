use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use ai_pops::config::{LoggingSettings, Settings};
use ai_pops::core::MatchingGateway;
use ai_pops::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use ai_pops::services::{CompletionService, OpenAiClient};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting AI Pops matching service...");

    let completions: Option<Arc<dyn CompletionService>> = match OpenAiClient::from_settings(&settings.openai) {
        Ok(Some(client)) => {
            info!("OpenAI API key found (model: {})", client.model());
            Some(Arc::new(client))
        }
        Ok(None) => {
            warn!("OPENAI_API_KEY is not set; matching is disabled and generation uses placeholder data");
            None
        }
        Err(e) => {
            error!("Failed to initialize OpenAI client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let gateway = MatchingGateway::new(completions, settings.generation);

    info!("Gateway initialized with sampling settings: {:?}", settings.generation);

    let app_state = AppState {
        gateway: Arc::new(gateway),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        // Local development tool: every origin is allowed
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
