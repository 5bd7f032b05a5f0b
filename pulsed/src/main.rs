use anyhow::bail;
use clap::Parser;
use pulseproof_module_source::{AlertSource, FixtureSource, SubgraphSource};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "pulsed",
    long_about = None
)]
pub struct Pulsed {
    /// Serve the embedded fixture data instead of querying a subgraph
    #[arg(long, env = "PULSEPROOF_DEVMODE")]
    pub devmode: bool,

    /// Subgraph endpoint to query for PoC registry events
    #[arg(long, env = "PULSEPROOF_SUBGRAPH_URL")]
    pub subgraph_url: Option<String>,

    /// The contract to monitor
    #[arg(long, env = "PULSEPROOF_CONTRACT")]
    pub contract: Option<String>,

    /// Address to bind to
    #[arg(long, env = "PULSEPROOF_BIND_ADDR", default_value = "0.0.0.0")]
    pub bind_addr: String,

    /// Port to listen on
    #[arg(long, env = "PULSEPROOF_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl Pulsed {
    async fn run(self) -> ExitCode {
        match self.run_command().await {
            Ok(code) => code,
            Err(err) => {
                log::error!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        log::error!("Caused by:");
                    }
                    log::error!("\t{err}");
                }

                ExitCode::FAILURE
            }
        }
    }

    async fn run_command(self) -> anyhow::Result<ExitCode> {
        let alerts = if self.devmode {
            FixtureSource.fetch().await?
        } else {
            let Some(url) = self.subgraph_url else {
                bail!("either --devmode or --subgraph-url is required");
            };
            SubgraphSource::new(url, self.contract).fetch().await?
        };

        log::info!(
            "serving {} alerts on {}:{}",
            alerts.len(),
            self.bind_addr,
            self.port
        );

        pulseproof_server::run((self.bind_addr, self.port), alerts).await?;

        Ok(ExitCode::SUCCESS)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    Pulsed::parse().run().await
}
