mod category;
mod priority;

pub use category::*;
pub use priority::*;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Lifecycle status of an alert.
///
/// `new → acknowledged` is driven by an explicit user action and is one-way.
/// `resolved` is assigned by the upstream verification pipeline, never by the
/// dashboard backend itself.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    #[default]
    New,
    Acknowledged,
    Resolved,
}

/// A single reported vulnerability, tied to a monitored contract.
///
/// Alerts are created when the PoC registry events are ingested. Apart from
/// the status field they are immutable for the lifetime of a session, and
/// they are never deleted within one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VulnerabilityAlert {
    /// Identifier, the PoC hash from the registry event
    pub id: String,
    /// Serial number of the alert within its source
    pub serial: u64,
    /// Human-readable summary
    pub summary: String,
    /// Link to the proof-of-concept detail (IPFS metadata URI)
    pub poc_uri: String,
    /// Severity ranking, 1 (critical) to 5 (informational)
    #[schema(value_type = u8, minimum = 1, maximum = 5)]
    pub priority: Priority,
    /// Hash/address of the affected contract
    pub contract: String,
    /// Detection timestamp
    #[serde(with = "time::serde::rfc3339")]
    pub detected: OffsetDateTime,
    #[serde(default)]
    pub status: AlertStatus,
    pub category: Category,
}

impl VulnerabilityAlert {
    /// Mark the alert as acknowledged by the user.
    ///
    /// Only a `new` alert can transition; acknowledging anything else is a
    /// no-op. Returns `true` if the status changed.
    pub fn acknowledge(&mut self) -> bool {
        match self.status {
            AlertStatus::New => {
                self.status = AlertStatus::Acknowledged;
                true
            }
            _ => false,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.priority == Priority::Critical
    }
}
