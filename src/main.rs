use clap::Parser;
use fuelmap::core::config::{self, CliOverrides};
use fuelmap::core::fuel::FuelType;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fuelmap", about = "Find the cheapest fuel nearby")]
struct Args {
    /// Fuel type to compare (91, 95, 98, diesel)
    #[arg(short, long, value_enum)]
    fuel: Option<FuelType>,

    /// Device latitude (use with --lng)
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Device longitude (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Station API endpoint
    #[arg(long)]
    api_url: Option<String>,

    /// Start in the ranked price list instead of the map
    #[arg(long)]
    ranked: bool,
}

/// `~/.fuelmap/logs/fuelmap-YYYY-MM-DD.log`, or `fuelmap.log` in the
/// working directory when the home directory is unusable.
fn log_file() -> Option<File> {
    let dated = config::fuelmap_dir().and_then(|dir| {
        let logs = dir.join("logs");
        fs::create_dir_all(&logs).ok()?;
        let name = format!("fuelmap-{}.log", chrono::Local::now().format("%Y-%m-%d"));
        Some(logs.join(name))
    });
    let path = dated.unwrap_or_else(|| PathBuf::from("fuelmap.log"));
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal UI owns stdout, so logs only go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Some(file) = log_file() {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, file);
    }

    log::info!("fuelmap starting up");

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{}, using defaults", e);
            Default::default()
        }
    };
    let cli = CliOverrides {
        api_url: args.api_url,
        latitude: args.lat,
        longitude: args.lng,
        fuel: args.fuel,
        ranked: args.ranked,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!(
        "Resolved config: endpoint {}, fuel {:?}, view {:?}",
        resolved.api_base_url,
        resolved.fuel,
        resolved.start_view
    );

    fuelmap::tui::run(resolved)
}
