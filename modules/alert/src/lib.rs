pub mod endpoints;
pub mod error;
pub mod format;
pub mod model;
pub mod service;

pub use error::Error;
