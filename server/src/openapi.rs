use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "PulseProof",
    description = "Smart-contract vulnerability alert dashboard API",
))]
struct ApiDoc;

/// The merged OpenAPI document of all mounted modules.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(pulseproof_module_alert::endpoints::ApiDoc::openapi());
    doc
}
