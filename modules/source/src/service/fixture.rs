use super::{AlertSource, Error};
use pulseproof_common::alert::VulnerabilityAlert;

/// Static demo data, embedded at build time.
///
/// Serves the dashboard without any chain infrastructure, e.g. for local
/// development and demos.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixtureSource;

static ALERTS: &str = include_str!("../../data/alerts.json");

impl AlertSource for FixtureSource {
    async fn fetch(&self) -> Result<Vec<VulnerabilityAlert>, Error> {
        Ok(serde_json::from_str(ALERTS)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pulseproof_common::alert::{AlertStatus, Priority};

    #[test_log::test(tokio::test)]
    async fn fixture_parses() -> Result<(), anyhow::Error> {
        let alerts = FixtureSource.fetch().await?;

        assert!(!alerts.is_empty());
        // the demo set always contains something for the notification surface
        assert!(alerts.iter().any(|a| a.priority == Priority::Critical));
        assert!(alerts.iter().all(|a| a.status == AlertStatus::New));
        Ok(())
    }
}
