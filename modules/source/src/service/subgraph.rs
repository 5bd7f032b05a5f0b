use super::{AlertSource, Error};
use pulseproof_common::alert::{AlertStatus, Priority, VulnerabilityAlert};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Query for the PoC registry events indexed by the subgraph, keyed by the
/// active contract.
pub struct SubgraphSource {
    client: reqwest::Client,
    url: String,
    contract: Option<String>,
}

const QUERY: &str = r#"
query PocRegistereds($contract: String!) {
  pocRegistereds(
    where: { target: $contract }
    orderBy: blockTimestamp
    orderDirection: desc
  ) {
    id
    pocHash
    target
    pocType
    metadataURI
    severity
    summary
    blockNumber
    blockTimestamp
  }
}
"#;

impl SubgraphSource {
    /// Create a source for the given subgraph endpoint.
    ///
    /// The active contract is optional at construction; fetching without one
    /// fails with [`Error::NoActiveContract`].
    pub fn new(url: impl Into<String>, contract: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            contract,
        }
    }
}

impl AlertSource for SubgraphSource {
    async fn fetch(&self) -> Result<Vec<VulnerabilityAlert>, Error> {
        let contract = self.contract.as_ref().ok_or(Error::NoActiveContract)?;

        log::debug!("querying {} for {contract}", self.url);

        let response: QueryResponse = self
            .client
            .post(&self.url)
            .json(&QueryRequest {
                query: QUERY,
                variables: Variables { contract },
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            return Err(Error::Subgraph(
                errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            ));
        }

        response
            .data
            .map(|data| data.poc_registereds)
            .unwrap_or_default()
            .into_iter()
            .zip(1u64..)
            .map(|(event, serial)| event.into_alert(serial))
            .collect()
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    contract: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    data: Option<QueryData>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct QueryData {
    #[serde(rename = "pocRegistereds")]
    poc_registereds: Vec<PocRegistered>,
}

/// One `registerPoC` event, as the subgraph hands it out.
#[derive(Deserialize)]
struct PocRegistered {
    #[serde(rename = "pocHash")]
    poc_hash: String,
    target: String,
    #[serde(rename = "pocType")]
    poc_type: String,
    #[serde(rename = "metadataURI")]
    metadata_uri: String,
    severity: String,
    summary: String,
    #[serde(rename = "blockTimestamp")]
    block_timestamp: String,
}

impl PocRegistered {
    fn into_alert(self, serial: u64) -> Result<VulnerabilityAlert, Error> {
        let timestamp = self
            .block_timestamp
            .parse::<i64>()
            .map_err(|err| Error::Event(format!("blockTimestamp: {err}")))?;
        let detected = OffsetDateTime::from_unix_timestamp(timestamp)
            .map_err(|err| Error::Event(format!("blockTimestamp: {err}")))?;

        let priority = self.severity.parse::<Priority>().unwrap_or_else(|err| {
            log::warn!("event {}: {err}, assuming medium", self.poc_hash);
            Priority::Medium
        });

        // tags outside the known template set land in the default category
        let category = self.poc_type.parse().unwrap_or_default();

        Ok(VulnerabilityAlert {
            id: self.poc_hash,
            serial,
            summary: self.summary,
            poc_uri: self.metadata_uri,
            priority,
            contract: self.target,
            detected,
            status: AlertStatus::New,
            category,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pulseproof_common::alert::Category;

    const BODY: &str = r#"{
      "data": {
        "pocRegistereds": [
          {
            "id": "0x01-1",
            "pocHash": "0x8f4a2c1be9d07e3355f1fe2b6a9c8d4e0b7a6352c1d9e8f7a6b5c4d3e2f1a0b9",
            "target": "0x7a16ff8270133f063aab6c9977183d9e72835428",
            "pocType": "REENTRANCY",
            "metadataURI": "ipfs://bafy/metadata.json",
            "severity": "critical",
            "summary": "Reentrancy attack",
            "blockNumber": "6530124",
            "blockTimestamp": "1726128000"
          }
        ]
      }
    }"#;

    #[test_log::test]
    fn map_event() -> Result<(), anyhow::Error> {
        let response: QueryResponse = serde_json::from_str(BODY)?;
        let events = response.data.expect("data must be present").poc_registereds;

        let alert = events
            .into_iter()
            .next()
            .expect("one event")
            .into_alert(1)?;

        assert_eq!(
            alert.id,
            "0x8f4a2c1be9d07e3355f1fe2b6a9c8d4e0b7a6352c1d9e8f7a6b5c4d3e2f1a0b9"
        );
        assert_eq!(alert.serial, 1);
        assert_eq!(alert.priority, Priority::Critical);
        assert_eq!(alert.category, Category::Reentrancy);
        assert_eq!(alert.contract, "0x7a16ff8270133f063aab6c9977183d9e72835428");
        assert_eq!(alert.status, AlertStatus::New);
        assert_eq!(alert.detected.unix_timestamp(), 1726128000);
        Ok(())
    }

    #[test_log::test]
    fn unknown_tags_fall_back() -> Result<(), anyhow::Error> {
        let event = PocRegistered {
            poc_hash: "0x01".into(),
            target: "0x02".into(),
            poc_type: "rugpull".into(),
            metadata_uri: "ipfs://bafy/metadata.json".into(),
            severity: "catastrophic".into(),
            summary: "?".into(),
            block_timestamp: "1726128000".into(),
        };

        let alert = event.into_alert(1)?;
        assert_eq!(alert.category, Category::Unknown);
        assert_eq!(alert.priority, Priority::Medium);
        Ok(())
    }

    #[test_log::test]
    fn malformed_timestamp_is_an_event_error() {
        let event = PocRegistered {
            poc_hash: "0x01".into(),
            target: "0x02".into(),
            poc_type: "reentrancy".into(),
            metadata_uri: "ipfs://bafy/metadata.json".into(),
            severity: "high".into(),
            summary: "?".into(),
            block_timestamp: "not-a-number".into(),
        };

        assert!(matches!(event.into_alert(1), Err(Error::Event(_))));
    }

    #[test_log::test]
    fn graphql_errors_surface() -> Result<(), anyhow::Error> {
        let response: QueryResponse =
            serde_json::from_str(r#"{"errors": [{"message": "no such field"}]}"#)?;
        assert_eq!(
            response.errors.map(|e| e.len()),
            Some(1)
        );
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn no_active_contract_is_a_boundary_error() {
        let source = SubgraphSource::new("http://localhost:8000/subgraphs/pulseproof", None);
        assert!(matches!(
            source.fetch().await,
            Err(Error::NoActiveContract)
        ));
    }
}
