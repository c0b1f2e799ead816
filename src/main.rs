mod config;
mod dtos;
mod error;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info};

use crate::config::Settings;
use crate::handlers::auth_handlers::SESSION_HEADER;
use crate::repositories::{MemStorage, Storage};
use crate::services::auth_services::AuthService;
use crate::services::session_store::{MemorySessionStore, SessionStore, spawn_sweeper};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new(settings.session_ttl));
    let _sweeper = spawn_sweeper(sessions.clone(), settings.session_sweep_interval);

    let auth_service = AuthService::new(
        storage.clone(),
        sessions,
        settings.session_cookie_name.clone(),
        settings.cookie_secure,
    );
    let auth_data = web::Data::new(auth_service);
    let state = web::Data::new(AppState { storage });

    info!(
        "Sessions: ttl {}s, sweep every {}s, cookie '{}'",
        settings.session_ttl.num_seconds(),
        settings.session_sweep_interval.as_secs(),
        settings.session_cookie_name
    );
    info!("Starting server on {}", settings.bind_address);

    let allowed_origins = settings.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept", "x-requested-with"])
            .expose_headers(vec![SESSION_HEADER])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(auth_data.clone())
            .configure(handlers::configure)
    })
    .bind(&settings.bind_address)?
    .run()
    .await
}
