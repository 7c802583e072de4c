use gps_tracker::{HttpTransport, JsonLinesProvider, Observer, Service, Tracker, TrackerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Reads location events as JSON lines from stdin and uploads them until
/// Ctrl-C or end of input. An optional first argument names a JSON config file.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TrackerConfig::from_json_file(&path)?,
        None => TrackerConfig::default(),
    };
    info!("Uploading as {:?} every {:?}", config.device_name, config.upload_interval);

    let client = reqwest::Client::builder()
        .user_agent(concat!("gps-tracker/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let provider = JsonLinesProvider::new(tokio::io::stdin());
    let mut input_ended = provider.input_ended();
    let mut tracker = Tracker::builder()
        .provider(provider)
        .transport(HttpTransport::with_client(client))
        .config(config)
        .observer(Observer::new(|message| println!("{message}")))
        .build();

    tracker.init()?;
    tracker.start()?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        _ = input_ended.wait_for(|ended| *ended) => {
            // Let the final tick pick up the last sample before exiting.
            tokio::time::sleep(tracker.config().upload_interval).await;
        }
    }

    if let Some(report) = tracker.last_known_report() {
        println!("{report}");
    }
    tracker.shutdown()?;
    tracker.wait_for_uploads().await;
    Ok(())
}
