use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use pulseproof_common::error::ErrorInformation;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("alert not found: {0}")]
    NotFound(String),
    #[error("Invalid request {msg}")]
    BadRequest { msg: String, status: StatusCode },
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::NotFound(id) => {
                HttpResponse::NotFound().json(ErrorInformation::new("NotFound", id))
            }
            Self::BadRequest { msg, status } => {
                HttpResponse::build(*status).json(ErrorInformation::new("Bad request", msg))
            }
        }
    }
}
