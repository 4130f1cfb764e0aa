use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::error::{RosterError, StoreError};
use crate::generate_roster;
use crate::store::RosterStore;

/// Shared by all workers; the store is only ever read
pub struct AppState {
    pub store: Box<dyn RosterStore>,
}

impl AppState {
    pub fn new(store: Box<dyn RosterStore>) -> Self {
        AppState { store }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    seed: Option<u64>,
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// Roster preview endpoint; every call is a fresh, unsaved attempt.
// Only an explicit `?seed=` makes a preview reproducible.
async fn generate_preview(
    period: web::Path<String>,
    query: web::Query<GenerateQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let period = period.into_inner();
    let mut rng = rng_for(query.seed);

    match generate_roster(&*state.store, &period, &mut rng) {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(RosterError::Configuration(e)) => {
            tracing::warn!(period = %period, error = %e, "Roster generation rejected");
            Ok(HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })))
        }
        Err(RosterError::Store(StoreError::UnknownPeriod(_))) => Ok(HttpResponse::NotFound().json(
            serde_json::json!({"success": false, "error": "Unknown period"}),
        )),
        Err(e) => {
            tracing::error!(period = %period, error = %e, "Failed to load roster data");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": format!("Failed to load roster data: {}", e)
            })))
        }
    }
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

/// Registers the API routes (also used by tests)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        .service(web::resource("/api/periods/{period}/roster").route(web::post().to(generate_preview)));
}

pub async fn start_server(bind: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    tracing::info!(bind, port, "Starting roster preview server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((bind, port))?
    .run()
    .await
}
