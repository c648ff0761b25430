use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use invoice_wrapper::{Bolt11Decoder, InvoiceWrapper, WrapRequest, WrapperConfig};
use lnd_rest::{LndClient, LndConfig};

#[derive(Debug, Parser)]
#[command(name = "wrap-invoice")]
#[command(about = "Wrap a bolt11 invoice in a hold invoice issued by LND")]
struct Args {
    /// Outgoing bolt11 payment request
    #[arg(long)]
    bolt11: String,

    /// Incoming amount in millisatoshis, including the service margin
    #[arg(long)]
    msats: u64,

    /// Description for the incoming invoice
    #[arg(long, conflicts_with = "description_hash")]
    description: Option<String>,

    /// Hex description hash for the incoming invoice
    #[arg(long)]
    description_hash: Option<String>,

    /// Give up after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,
}

impl Args {
    fn into_request(self) -> (WrapRequest, Option<Duration>) {
        let request = WrapRequest {
            bolt11: self.bolt11,
            incoming_msats: Some(self.msats),
            description: self.description,
            description_hash: self.description_hash,
        };
        (request, self.deadline_secs.map(Duration::from_secs))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    // stdout carries the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = WrapperConfig::from_env()?;
    let lnd = LndClient::connect(LndConfig::from_env()?).await?;
    info!(config = ?lnd.config(), "Connected to LND");

    let wrapper =
        InvoiceWrapper::new(Arc::new(lnd), Arc::new(Bolt11Decoder::new())).with_config(config);

    let (request, deadline) = args.into_request();
    let wrapped = match deadline {
        Some(deadline) => wrapper.wrap_with_deadline(request, deadline).await?,
        None => wrapper.wrap(request).await?,
    };

    println!("{}", serde_json::to_string_pretty(&wrapped)?);
    Ok(())
}
