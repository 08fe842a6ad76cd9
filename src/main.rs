//! Downloads the PRSA air-quality files and writes the dashboard as static HTML.
//!
//! ```text
//! air-quality-dashboard --output dashboard --json
//! ```

use air_quality::{AirQuality, Dashboard, Resource, SiteOptions};
use clap::{ArgAction, Parser, ValueHint};
use log::{info, warn};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Air quality dashboard for the PRSA city measurements", long_about = None)]
struct Args {
    /// City shown on `index.html`; defaults to the first city in the dataset.
    #[arg(long)]
    city: Option<String>,

    /// Render only the `--city` page instead of one page per city.
    #[arg(long, action = ArgAction::SetTrue)]
    only_selected: bool,

    /// Directory receiving `<city>.html` pages and `index.html`.
    #[arg(short, long, default_value = "dashboard", value_hint = ValueHint::DirPath)]
    output: PathBuf,

    /// URL prefix the resource file names are appended to.
    #[arg(long, value_hint = ValueHint::Url)]
    base_url: Option<String>,

    /// Resource file names to load, in order. Defaults to the twelve PRSA sites.
    #[arg(long = "resource", value_name = "NAME")]
    resources: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Also write `<city>.json` summaries next to the pages.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let resources = if args.resources.is_empty() {
        None
    } else {
        Some(args.resources.iter().map(Resource::new).collect())
    };
    let client = AirQuality::builder()
        .maybe_base_url(args.base_url)
        .maybe_resources(resources)
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;
    let dashboard = Dashboard::new(client);

    let dataset = dashboard.client().dataset().await?;
    let report = dataset.report();
    info!(
        "Combined {} rows from {}/{} resources",
        dataset.height(),
        report.loaded.len(),
        report.attempted()
    );
    for failed in &report.failed {
        warn!("Skipped {}: {}", failed.resource, failed.error);
    }

    let options = SiteOptions {
        index_city: args.city,
        only_index: args.only_selected,
        json: args.json,
    };
    let written = dashboard.write_site(&args.output, &options).await?;
    info!("Wrote {} files to {}", written.len(), args.output.display());
    Ok(())
}
