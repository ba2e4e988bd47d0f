//! Websupport DNS command-line harness
//!
//! Exercises the provider against the live API: a create/list/delete round
//! trip, a simulated ACME DNS-01 challenge and a plain TXT listing.
//!
//! Credentials come from flags or the matching `WEBSUPPORT_*` variables.
//! Logs go to stderr; `RUST_LOG` overrides the default filter.

mod commands;
mod doh;

use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use websupport_dns_provider::{
    CancellationToken, DEFAULT_API_BASE, ProviderError, WebsupportConfig, WebsupportProvider, env,
};

#[derive(Parser)]
#[command(name = "websupport-dns", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// API credentials and target zone.
#[derive(Args)]
struct ConnectionArgs {
    /// API key (Basic auth user)
    #[arg(long, env = env::API_KEY, hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API secret used to sign requests
    #[arg(long, env = env::API_SECRET, hide_env_values = true, global = true)]
    api_secret: Option<String>,

    /// Numeric service id that owns the zone
    #[arg(long, env = env::SERVICE_ID, global = true)]
    service_id: Option<String>,

    /// API base URL
    #[arg(long, env = env::API_BASE, default_value = DEFAULT_API_BASE, global = true)]
    api_base: String,

    /// Request timeout in seconds
    #[arg(long, env = env::TIMEOUT_SECS, global = true)]
    timeout_secs: Option<u64>,

    /// Zone the records live in
    #[arg(long, env = "WEBSUPPORT_TEST_ZONE", default_value = "example.com", global = true)]
    zone: String,
}

impl ConnectionArgs {
    fn into_config(self) -> anyhow::Result<WebsupportConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| anyhow::anyhow!("missing --api-key / {}", env::API_KEY))?;
        let api_secret = self
            .api_secret
            .ok_or_else(|| anyhow::anyhow!("missing --api-secret / {}", env::API_SECRET))?;
        let service_id = self
            .service_id
            .ok_or_else(|| anyhow::anyhow!("missing --service-id / {}", env::SERVICE_ID))?;

        let mut config =
            WebsupportConfig::new(api_key, api_secret, service_id).with_api_base(self.api_base);
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create, list and delete a throwaway TXT record
    Test,
    /// Simulate an ACME DNS-01 challenge (no certificate is requested)
    AcmeTest {
        /// Domain whose `_acme-challenge` record is checked over DoH
        #[arg(long, env = "WEBSUPPORT_TEST_DOMAIN")]
        domain: Option<String>,

        /// Seconds to wait before the public DNS lookup
        #[arg(long, default_value_t = 5)]
        propagation_wait_secs: u64,
    },
    /// List the TXT records of the service
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 配置错误与用户中断按 warn 输出
            if e
                .downcast_ref::<ProviderError>()
                .is_some_and(ProviderError::is_expected)
            {
                tracing::warn!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let zone = cli.connection.zone.clone();
    let config = cli.connection.into_config()?;

    let cancel = spawn_ctrl_c_handler();
    let provider = WebsupportProvider::builder(config)
        .cancellation_token(cancel)
        .build()?;

    match cli.command {
        Commands::Test => commands::basic_operations(&provider, &zone).await,
        Commands::AcmeTest {
            domain,
            propagation_wait_secs,
        } => {
            let domain = domain.unwrap_or_else(|| zone.clone());
            commands::acme_challenge(
                &provider,
                &zone,
                &domain,
                Duration::from_secs(propagation_wait_secs),
            )
            .await
        }
        Commands::List { json } => commands::list(&provider, &zone, json).await,
    }
}

/// Token that fires on the first Ctrl-C.
fn spawn_ctrl_c_handler() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling in-flight requests");
            trigger.cancel();
        }
    });
    cancel
}
