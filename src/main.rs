use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};

use climatrack::app::ports::JsonFetcher;
use climatrack::config::Config;
use climatrack::infra::http_client::ReqwestFetcher;
use climatrack::pipeline::{refresh_all, set_climate_data_by_name};
use climatrack::server::{start_server, AppState};
use climatrack::store::ClimateStore;
use climatrack::types::DatasetId;
use climatrack::logging;

#[derive(Parser)]
#[command(name = "climatrack")]
#[command(about = "Fetch and normalize climate-change datasets from global-warming.org")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported datasets and their endpoints
    List,
    /// Fetch one dataset and print its anomaly series summary
    Fetch {
        /// Dataset name or slug: temperature, co2, methane, no2, arctic-ice
        dataset: String,
    },
    /// Fetch every dataset concurrently
    FetchAll,
    /// Serve the dataset API over HTTP
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        bind: Option<String>,
        /// Fetch every dataset before accepting requests
        #[arg(long)]
        prefetch: bool,
    },
}

fn print_anomaly_summary(id: DatasetId, samples: usize, anomalies: &[f64]) {
    let missing = anomalies.iter().filter(|v| v.is_nan()).count();
    println!("{}: {} samples, {} anomaly values ({} unparsed)", id, samples, anomalies.len(), missing);
    if let (Some(first), Some(last)) = (anomalies.first(), anomalies.last()) {
        println!("   first: {}   last: {}", first, last);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();
    let mut config = Config::load().context("loading configuration")?;

    logging::init_logging(&config.logging.dir);
    if let Some(addr) = config.metrics_addr()? {
        climatrack::metrics::init_metrics(addr);
    }

    let fetcher: Arc<dyn JsonFetcher> = Arc::new(ReqwestFetcher::new(config.timeout())?);
    let mut store = ClimateStore::new(&config.api.base_url);

    match cli.command {
        Commands::List => {
            for descriptor in store.descriptors() {
                println!(
                    "{:<12} {:<11} {}",
                    descriptor.id.slug(),
                    descriptor.display_meta.label,
                    descriptor.endpoint()
                );
            }
        }
        Commands::Fetch { dataset } => {
            match set_climate_data_by_name(&mut store, fetcher.as_ref(), &dataset).await {
                Ok(samples) => {
                    let id = store.resolve(&dataset)?.id;
                    let anomalies = store.select_item_anomalies(id);
                    print_anomaly_summary(id, samples, &anomalies);
                }
                Err(e) => {
                    // Already logged by the pipeline; the dataset just has no data
                    println!("No data for {}: {}", dataset, e);
                }
            }
        }
        Commands::FetchAll => {
            for report in refresh_all(&mut store, fetcher.clone()).await {
                match (report.samples, report.error) {
                    (Some(samples), _) => {
                        let anomalies = store.select_item_anomalies(report.dataset);
                        print_anomaly_summary(report.dataset, samples, &anomalies);
                    }
                    (None, Some(e)) => println!("{}: no data ({})", report.dataset, e),
                    (None, None) => println!("{}: no data", report.dataset),
                }
            }
        }
        Commands::Serve { bind, prefetch } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            let addr = config.bind_addr()?;
            if prefetch {
                info!("Prefetching all datasets");
                for report in refresh_all(&mut store, fetcher.clone()).await {
                    if report.samples.is_some() {
                        store.select_item_anomalies(report.dataset);
                    }
                }
            }
            if let Err(e) = start_server(AppState::new(store, fetcher), addr).await {
                error!("Server exited: {}", e);
                return Err(e.into());
            }
        }
    }
    Ok(())
}
