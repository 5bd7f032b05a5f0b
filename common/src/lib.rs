pub mod alert;
pub mod error;
pub mod model;
