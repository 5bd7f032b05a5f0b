use pulseproof_common::alert::{Category, Priority, VulnerabilityAlert};
use serde::{de, Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;
use time::OffsetDateTime;
use utoipa::IntoParams;

/// The optional predicates narrowing the displayed alert set.
///
/// Criteria combine with logical AND; within a list-valued criterion the
/// accepted values combine with logical OR. A default value filters nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Accepted priority scores, comma-separated (e.g. `1,2`); empty accepts all
    #[serde(deserialize_with = "comma_separated")]
    #[param(value_type = Option<String>, example = "1,2")]
    pub priority: Vec<Priority>,
    /// Accepted categories, comma-separated; empty accepts all
    #[serde(deserialize_with = "comma_separated")]
    #[param(value_type = Option<String>, example = "reentrancy,funds_drain")]
    pub category: Vec<Category>,
    /// Case-insensitive substring to match against the contract hash
    pub contract: Option<String>,
    /// Earliest detection timestamp to accept, inclusive
    #[serde(with = "time::serde::rfc3339::option")]
    #[param(value_type = Option<String>, example = "2024-09-01T00:00:00Z")]
    pub since: Option<OffsetDateTime>,
    /// Latest detection timestamp to accept, inclusive
    #[serde(with = "time::serde::rfc3339::option")]
    #[param(value_type = Option<String>, example = "2024-09-30T23:59:59Z")]
    pub until: Option<OffsetDateTime>,
}

impl FilterCriteria {
    /// `true` if no criterion is set, i.e. the filter is the identity.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, alert: &VulnerabilityAlert) -> bool {
        (self.priority.is_empty() || self.priority.contains(&alert.priority))
            && (self.category.is_empty() || self.category.contains(&alert.category))
            && self.contract.as_ref().is_none_or(|needle| {
                alert
                    .contract
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
            && self.since.is_none_or(|since| alert.detected >= since)
            && self.until.is_none_or(|until| alert.detected <= until)
    }
}

fn comma_separated<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = String::deserialize(deserializer)?;
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(de::Error::custom))
        .collect()
}

/// Alerts hidden by the user for the duration of the current session.
///
/// Dismissal is one-way and session-local; it is deliberately an explicit
/// value handed to the selection functions, not ambient state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DismissedAlerts {
    ids: HashSet<String>,
}

impl DismissedAlerts {
    pub fn dismiss(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn is_dismissed(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DismissedAlerts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
