//! Providers of the alert working set.
//!
//! The engine never does I/O itself; one of these sources loads the list and
//! hands it over. The fixture source backs the demo dashboard, the subgraph
//! source the live one, and both feed the same engine.

mod fixture;
mod subgraph;

pub use fixture::FixtureSource;
pub use subgraph::SubgraphSource;

use pulseproof_common::alert::VulnerabilityAlert;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Querying without an active contract is a caller mistake, surfaced
    /// upward instead of being papered over with an empty result.
    #[error("no active contract selected")]
    NoActiveContract,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    #[error("subgraph error: {0}")]
    Subgraph(String),
    #[error("malformed event: {0}")]
    Event(String),
}

pub trait AlertSource {
    /// Load the full working set of alerts for the monitored contract.
    fn fetch(&self) -> impl std::future::Future<Output = Result<Vec<VulnerabilityAlert>, Error>> + Send;
}
