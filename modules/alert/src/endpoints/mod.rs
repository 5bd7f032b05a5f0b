
use crate::model::{DismissedAlerts, FilterCriteria};
use crate::service;
use crate::Error;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, Responder};
use parking_lot::RwLock;
use pulseproof_common::alert::VulnerabilityAlert;
use pulseproof_common::model::{Paginated, PaginatedResults};
use std::collections::BTreeMap;
use utoipa::OpenApi;

/// The working set of the session, owned by the HTTP layer.
///
/// The engine itself is pure; all mutation (status updates, dismissals)
/// happens here, under the lock, and the engine only ever sees snapshots.
pub struct AppState {
    session: RwLock<Session>,
}

struct Session {
    alerts: Vec<VulnerabilityAlert>,
    dismissed: DismissedAlerts,
}

impl AppState {
    pub fn new(alerts: Vec<VulnerabilityAlert>) -> Self {
        Self {
            session: RwLock::new(Session {
                alerts,
                dismissed: DismissedAlerts::default(),
            }),
        }
    }
}

pub fn configure(config: &mut web::ServiceConfig, state: web::Data<AppState>) {
    config
        .app_data(state)
        // render malformed query strings as an ErrorInformation body, like
        // every other error this module produces
        .app_data(web::QueryConfig::default().error_handler(|err, _| {
            Error::BadRequest {
                msg: err.to_string(),
                status: StatusCode::BAD_REQUEST,
            }
            .into()
        }))
        .service(all)
        .service(critical)
        .service(breakdown)
        .service(get)
        .service(acknowledge)
        .service(dismiss);
}

#[derive(OpenApi)]
#[openapi(
    paths(all, critical, breakdown, get, acknowledge, dismiss),
    components(schemas(
        pulseproof_common::alert::AlertStatus,
        pulseproof_common::alert::Category,
        pulseproof_common::alert::VulnerabilityAlert,
        pulseproof_common::model::Paginated,
        PaginatedResults<VulnerabilityAlert>,
    )),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    tag = "alert",
    operation_id = "listAlerts",
    context_path = "/api",
    params(
        FilterCriteria,
        Paginated,
    ),
    responses(
        (status = 200, description = "The matching page of alerts", body = PaginatedResults<VulnerabilityAlert>),
    ),
)]
#[get("/v1/alert")]
/// List alerts matching the filter criteria, one page at a time
pub async fn all(
    state: web::Data<AppState>,
    web::Query(criteria): web::Query<FilterCriteria>,
    web::Query(paginated): web::Query<Paginated>,
) -> actix_web::Result<impl Responder> {
    let session = state.session.read();
    let filtered = service::filter_alerts(&session.alerts, &criteria);
    Ok(HttpResponse::Ok().json(service::paginate(&filtered, paginated)))
}

#[utoipa::path(
    tag = "alert",
    operation_id = "listCriticalAlerts",
    context_path = "/api",
    params(
        FilterCriteria,
    ),
    responses(
        (status = 200, description = "Alerts needing immediate attention", body = Vec<VulnerabilityAlert>),
    ),
)]
#[get("/v1/alert/critical")]
/// List maximum-severity alerts not dismissed in this session
pub async fn critical(
    state: web::Data<AppState>,
    web::Query(criteria): web::Query<FilterCriteria>,
) -> actix_web::Result<impl Responder> {
    let session = state.session.read();
    let filtered = service::filter_alerts(&session.alerts, &criteria);
    Ok(HttpResponse::Ok().json(service::select_critical(&filtered, &session.dismissed)))
}

#[utoipa::path(
    tag = "alert",
    operation_id = "criticalAlertBreakdown",
    context_path = "/api",
    responses(
        (status = 200, description = "Count of critical alerts per category", body = BTreeMap<String, usize>),
    ),
)]
#[get("/v1/alert/critical/breakdown")]
/// Summarize the critical alerts by category
pub async fn breakdown(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let session = state.session.read();
    let critical_alerts = service::select_critical(&session.alerts, &session.dismissed);
    Ok(HttpResponse::Ok().json(service::category_breakdown(&critical_alerts)))
}

#[utoipa::path(
    tag = "alert",
    operation_id = "getAlert",
    context_path = "/api",
    params(
        ("id" = String, Path, description = "Identifier of the alert (the PoC hash)"),
    ),
    responses(
        (status = 200, description = "The matching alert", body = VulnerabilityAlert),
        (status = 404, description = "Matching alert not found"),
    ),
)]
#[get("/v1/alert/{id}")]
/// Get a single alert
pub async fn get(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let session = state.session.read();
    let alert = session
        .alerts
        .iter()
        .find(|alert| alert.id == *id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    Ok(HttpResponse::Ok().json(alert))
}

#[utoipa::path(
    tag = "alert",
    operation_id = "acknowledgeAlert",
    context_path = "/api",
    params(
        ("id" = String, Path, description = "Identifier of the alert (the PoC hash)"),
    ),
    responses(
        (status = 200, description = "The alert after acknowledgement", body = VulnerabilityAlert),
        (status = 404, description = "Matching alert not found"),
    ),
)]
#[post("/v1/alert/{id}/acknowledge")]
/// Acknowledge an alert; one-way, idempotent for anything but a new alert
pub async fn acknowledge(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let mut session = state.session.write();
    let alert = session
        .alerts
        .iter_mut()
        .find(|alert| alert.id == *id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    alert.acknowledge();
    Ok(HttpResponse::Ok().json(alert))
}

#[utoipa::path(
    tag = "alert",
    operation_id = "dismissAlert",
    context_path = "/api",
    params(
        ("id" = String, Path, description = "Identifier of the alert (the PoC hash)"),
    ),
    responses(
        (status = 204, description = "The alert is hidden for this session"),
        (status = 404, description = "Matching alert not found"),
    ),
)]
#[post("/v1/alert/{id}/dismiss")]
/// Hide a critical alert for the rest of the session
pub async fn dismiss(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let mut session = state.session.write();
    if !session.alerts.iter().any(|alert| alert.id == *id) {
        return Err(Error::NotFound(id.to_string()).into());
    }
    session.dismissed.dismiss(id.into_inner());
    Ok(HttpResponse::NoContent().finish())
}
