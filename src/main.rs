use anyhow::Result;
use libscraper::{
    fetch,
    history::{load_processed, record_processed},
    overlay, process,
};
use reqwest::Client;
use std::{env, fs, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configure dirs ───────────────────────────────────────────
    let client = Client::new();
    let exports_dir = PathBuf::from("exports");
    let overlays_dir = PathBuf::from("overlays");
    let history_dir = PathBuf::from("history");

    for d in &[&exports_dir, &overlays_dir, &history_dir] {
        fs::create_dir_all(d)?;
    }

    // ─── 3) load history to skip processed exports ───────────────────
    let processed = load_processed(&history_dir)?;
    info!("{} exports already done", processed.len());

    // ─── 4) discover the newest export ───────────────────────────────
    let index_url = env::var("LIBRARY_DIRECTORY_URL")
        .unwrap_or_else(|_| fetch::urls::DEFAULT_DIRECTORY_URL.to_string());
    let export_urls = fetch::urls::fetch_export_urls(&client, &index_url).await?;
    info!("{} exports listed on {}", export_urls.len(), index_url);

    let url = match fetch::urls::latest_export_url(&export_urls) {
        Some(u) => u,
        None => {
            info!("no exports on index page; exit");
            return Ok(());
        }
    };
    let name = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default()
        .to_string();
    if processed.contains(&name) {
        info!(export = %name, "already processed; exit");
        return Ok(());
    }

    // ─── 5) download + run the pipeline ──────────────────────────────
    info!(export = %name, "downloading");
    let csv_path = fetch::csvs::download_csv(&client, url, &exports_dir).await?;

    let records = process::load_records_from_path(&csv_path)?;
    info!(rows = records.len(), "loaded directory export");

    let buckets = process::weekday_buckets(&records);
    for (day, bucket) in buckets.iter() {
        match bucket {
            Some(stops) => info!(day = %day, stops = stops.len(), "overlay group"),
            None => debug!(day = %day, "no stops"),
        }
    }

    // ─── 6) write overlays + record history ──────────────────────────
    let overlays = overlay::build_overlays(&buckets);
    let stem = csv_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("directoryexport");
    let out_path = overlays_dir.join(format!("{}_overlays.json", stem));
    overlay::write::write_overlays(&overlays, &out_path)?;

    record_processed(&history_dir, &name)?;
    info!("all done");
    Ok(())
}
