pub mod service;

pub use service::{AlertSource, Error, FixtureSource, SubgraphSource};
