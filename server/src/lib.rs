//! Assembly of the dashboard API application.

pub mod openapi;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use pulseproof_common::alert::VulnerabilityAlert;
use pulseproof_module_alert::endpoints::AppState;

pub fn configure(config: &mut web::ServiceConfig, state: web::Data<AppState>) {
    config
        .service(web::scope("/api").configure(|config| {
            pulseproof_module_alert::endpoints::configure(config, state);
        }))
        .route("/openapi.json", web::get().to(openapi_json));
}

async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(openapi::openapi())
}

/// Serve the API over the given working set until shut down.
pub async fn run(
    bind: impl std::net::ToSocketAddrs,
    alerts: Vec<VulnerabilityAlert>,
) -> anyhow::Result<()> {
    let state = web::Data::new(AppState::new(alerts));

    HttpServer::new(move || {
        let state = state.clone();
        App::new().configure(|config| configure(config, state))
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
