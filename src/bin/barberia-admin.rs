use std::path::PathBuf;
use std::process;
use std::time::Duration;

use barberia_admin::prelude::*;
use clap::Parser;

/// Render one dashboard section of the barbershop API as an HTML page
#[derive(Parser, Debug)]
#[clap(name = "barberia-admin", version, about)]
struct Cli {
    /// API origin, e.g. http://localhost:8000 (default: BARBERIA_API_URL)
    #[clap(long, value_name = "URL")]
    api_url: Option<String>,

    /// Path prefix of the API (default: BARBERIA_API_PREFIX or /api)
    #[clap(long, value_name = "PREFIX")]
    api_prefix: Option<String>,

    /// clientes, barberos, servicios, citas or agenda
    #[clap(short, long, default_value = "clientes")]
    section: String,

    /// Write the page here instead of stdout
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Show timestamps in UTC instead of local time
    #[clap(long)]
    utc: bool,

    /// Request timeout in seconds
    #[clap(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        log::error!("{}", err);
        eprintln!("barberia-admin: {}", err);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DashboardError> {
    let section: Section = cli.section.parse()?;

    let mut options = DashboardOptions::from_env()?;
    if let Some(url) = &cli.api_url {
        options = options.with_base_url(url)?;
    }
    if let Some(prefix) = &cli.api_prefix {
        options = options.with_api_prefix(prefix);
    }
    if let Some(secs) = cli.timeout {
        options = options.with_request_timeout(Some(Duration::from_secs(secs)));
    }
    if cli.utc {
        options = options.with_display_zone(DisplayZone::Utc);
    }

    let dashboard = Dashboard::from_options(options)?;
    let state = dashboard.select(section).await;
    if let Phase::Failed(message) = &state.phase {
        log::warn!("{} rendered with error panel: {}", section, message);
    }

    let page = dashboard.render_page()?;
    match cli.output {
        Some(path) => {
            std::fs::write(&path, page)?;
            log::info!("wrote {} to {}", section, path.display());
        }
        None => println!("{}", page),
    }

    Ok(())
}
