use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use explorer::api::{GatewayClient, SpaceApi};
use explorer::resource::Remote;
use explorer::views::apod::ApodView;
use explorer::views::earth::EarthView;
use explorer::views::neo::{NeoView, SortOrder};
use explorer::views::rover::{CameraFilter, RoverView};
use metrics_exporter_statsd::StatsdBuilder;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

mod config;

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:5000";

#[derive(Parser)]
#[command(name = "skywatch", about = "NASA data gateway and terminal explorer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the API gateway.
    Gateway {
        #[arg(long, default_value = "skywatch.yaml")]
        config: PathBuf,
    },
    /// Show the astronomy picture of the day.
    Apod {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = DEFAULT_GATEWAY_URL)]
        gateway_url: Url,
    },
    /// List rover photos for an earth date.
    Rover {
        #[arg(long)]
        earth_date: NaiveDate,
        #[arg(long, default_value = "curiosity")]
        rover: String,
        /// Camera name to show; omit or pass ALL for every camera.
        #[arg(long)]
        camera: Option<String>,
        #[arg(long, default_value = DEFAULT_GATEWAY_URL)]
        gateway_url: Url,
    },
    /// Near-earth objects for a date range, with the trailing-week series.
    Neo {
        #[arg(long)]
        start_date: NaiveDate,
        #[arg(long)]
        end_date: NaiveDate,
        #[arg(long, value_enum, default_value_t = SortArg::Feed)]
        sort: SortArg,
        #[arg(long, default_value = DEFAULT_GATEWAY_URL)]
        gateway_url: Url,
    },
    /// EPIC imagery records for a capture date.
    Earth {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = DEFAULT_GATEWAY_URL)]
        gateway_url: Url,
    },
    /// Check gateway liveness.
    Health {
        #[arg(long, default_value = DEFAULT_GATEWAY_URL)]
        gateway_url: Url,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Feed,
    Size,
    Hazardous,
}

impl From<SortArg> for SortOrder {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Feed => SortOrder::Feed,
            SortArg::Size => SortOrder::Size,
            SortArg::Hazardous => SortOrder::HazardousFirst,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Gateway(#[from] gateway::errors::GatewayError),
    #[error(transparent)]
    Api(#[from] explorer::api::ApiError),
    #[error("{0}")]
    Fetch(String),
    #[error("could not install metrics exporter: {0}")]
    Metrics(String),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli.command).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Gateway { config: path } => {
            let config = config::Config::from_file(&path)?;
            init_tracing(config.log_filter());
            tracing::info!(config = %path.display(), "starting gateway");
            if let Some(metrics_config) = config.metrics() {
                init_metrics(metrics_config)?;
            }
            gateway::run(config.gateway).await?;
            Ok(())
        }
        Command::Apod { date, gateway_url } => {
            init_tracing(None);
            show_apod(&GatewayClient::new(gateway_url), date).await
        }
        Command::Rover {
            earth_date,
            rover,
            camera,
            gateway_url,
        } => {
            init_tracing(None);
            show_rover(&GatewayClient::new(gateway_url), earth_date, rover, camera).await
        }
        Command::Neo {
            start_date,
            end_date,
            sort,
            gateway_url,
        } => {
            init_tracing(None);
            show_neo(&GatewayClient::new(gateway_url), start_date, end_date, sort).await
        }
        Command::Earth { date, gateway_url } => {
            init_tracing(None);
            show_earth(&GatewayClient::new(gateway_url), date).await
        }
        Command::Health { gateway_url } => {
            init_tracing(None);
            let health = GatewayClient::new(gateway_url).health().await?;
            println!("{}  {}  {}", health.status, health.service, health.timestamp);
            Ok(())
        }
    }
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn init_metrics(config: &config::MetricsConfig) -> Result<(), CliError> {
    let recorder = StatsdBuilder::from(config.statsd_host.as_str(), config.statsd_port)
        .build(Some(&config.prefix))
        .map_err(|err| CliError::Metrics(err.to_string()))?;
    metrics::set_global_recorder(recorder).map_err(|err| CliError::Metrics(err.to_string()))?;
    Ok(())
}

async fn show_apod(api: &GatewayClient, date: Option<NaiveDate>) -> Result<(), CliError> {
    let mut view = ApodView::new();
    view.set_date(date);
    match view.refresh(api).await {
        Remote::Success(apod) => {
            println!("{}  {}", apod.date, apod.title);
            println!();
            println!("{}", apod.explanation);
            println!();
            println!("{}", apod.url);
            Ok(())
        }
        Remote::Failed(message) => Err(CliError::Fetch(message.clone())),
        _ => Ok(()),
    }
}

async fn show_rover(
    api: &GatewayClient,
    earth_date: NaiveDate,
    rover: String,
    camera: Option<String>,
) -> Result<(), CliError> {
    let mut view = RoverView::new(earth_date);
    view.set_rover(rover);
    if let Some(camera) = camera
        && camera != "ALL"
    {
        view.set_camera(CameraFilter::Named(camera));
    }

    if let Remote::Failed(message) = view.refresh(api).await {
        return Err(CliError::Fetch(message.clone()));
    }

    let options: Vec<&str> = view.camera_options().into_iter().collect();
    if !options.is_empty() {
        println!("cameras: {}", options.join(", "));
    }
    let visible = view.visible_photos();
    println!("{} photo(s) for {}", visible.len(), view.earth_date());
    for photo in visible {
        println!("  #{}  {}  {}", photo.id, photo.camera.full_name, photo.img_src);
    }
    Ok(())
}

async fn show_neo(
    api: &GatewayClient,
    start_date: NaiveDate,
    end_date: NaiveDate,
    sort: SortArg,
) -> Result<(), CliError> {
    let mut view = NeoView::new(start_date, end_date);
    view.set_sort(sort.into());

    if let Remote::Failed(message) = view.refresh(api).await {
        return Err(CliError::Fetch(message.clone()));
    }
    for object in view.sorted_objects() {
        let hazard = if object.is_potentially_hazardous_asteroid {
            "hazardous"
        } else {
            "-"
        };
        println!(
            "{:<28} {:>9.3} km  {}",
            object.name,
            object.max_diameter_km(),
            hazard
        );
    }

    let today = Local::now().date_naive();
    if let Remote::Failed(message) = view.refresh_week(api, today).await {
        return Err(CliError::Fetch(message.clone()));
    }
    println!();
    println!("activity, past 7 days:");
    for point in view.chart_points(today) {
        println!(
            "  {}  count {:>3}  largest {:>7.3} km",
            point.date, point.count, point.largest_size
        );
    }
    Ok(())
}

async fn show_earth(api: &GatewayClient, date: NaiveDate) -> Result<(), CliError> {
    let mut view = EarthView::new(date);
    if let Remote::Failed(message) = view.refresh(api).await {
        return Err(CliError::Fetch(message.clone()));
    }

    let images = view.images().value().cloned().unwrap_or_default();
    println!("{} frame(s) for {}", images.len(), date);
    for image in &images {
        let url = view.image_url(api, image)?;
        println!("  {}  {}", url, image.caption);
    }
    Ok(())
}
