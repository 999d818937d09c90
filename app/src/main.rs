//! Interactive terminal dashboard
//!
//! Reads one command per line from stdin, sends it to the store, waits for
//! the fetches it started and redraws the active screen on stdout. Logs go to
//! stderr.
//!
//! ```bash
//! export OPENWEATHER_API_KEY=... DASHBOARD_USERNAME=admin DASHBOARD_PASSWORD=...
//! cargo run --bin dashboard
//! ```
//!
//! Variables may also come from a `.env` file in the working directory.
//! Store metrics are recorded in-process; the `metrics` command prints them
//! in Prometheus text format.

use anyhow::Context;
use dashboard::config::DashboardConfig;
use dashboard::command::{Command, CommandError, HELP};
use dashboard::{AppEnvironment, AppReducer, AppState, DashboardStore, StaticAuthenticator, view};
use dashboard_api::{HttpDirectoryClient, OpenWeatherClient, build_http_client};
use dashboard_core::environment::SystemClock;
use dashboard_runtime::Store;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long a command may keep the prompt waiting for its fetches
const EFFECT_WAIT: Duration = Duration::from_secs(15);

/// How long in-flight fetches get to finish on exit
const SHUTDOWN_WAIT: Duration = Duration::from_secs(2);

type HttpStore = DashboardStore<HttpDirectoryClient, OpenWeatherClient>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = DashboardConfig::from_env().context("loading configuration")?;
    init_tracing(&config);

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("installing metrics recorder")?;

    info!(
        environment = %config.environment,
        directory = %config.directory_base_url,
        weather = %config.weather_base_url,
        "Starting dashboard"
    );

    let store = build_store(&config).context("building HTTP clients")?;

    print_screen(&store).await?;
    run(&store, &metrics).await?;

    if let Err(e) = store.shutdown(SHUTDOWN_WAIT).await {
        warn!("Shutdown incomplete: {e}");
    }
    info!("Goodbye");
    Ok(())
}

fn init_tracing(config: &DashboardConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.environment.default_log_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn build_store(config: &DashboardConfig) -> anyhow::Result<HttpStore> {
    let http = build_http_client(config.timeout())?;

    let environment = AppEnvironment {
        directory: Arc::new(HttpDirectoryClient::with_client(
            http.clone(),
            config.directory_base_url.clone(),
        )),
        weather: Arc::new(OpenWeatherClient::with_client(
            http,
            config.weather_base_url.clone(),
            config.secrets.weather_api_key.expose(),
        )),
        authenticator: Arc::new(StaticAuthenticator::new(
            config.secrets.username.expose(),
            config.secrets.password.expose(),
        )),
        clock: Arc::new(SystemClock),
    };

    Ok(Store::new(AppState::default(), AppReducer::new(), environment))
}

/// Read-eval-render loop; returns on `quit` or end of input
async fn run(store: &HttpStore, metrics: &PrometheusHandle) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            },
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Show => print_screen(store).await?,
            Command::Metrics => println!("{}", metrics.render()),
            command => {
                if let Some(action) = command.into_action() {
                    let mut handle = store.send(action).await.context("sending action")?;
                    if handle.wait_with_timeout(EFFECT_WAIT).await.is_err() {
                        warn!(pending = handle.pending(), "Fetches still running; showing partial screen");
                    }
                }
                print_screen(store).await?;
            },
        }
    }
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}

async fn print_screen(store: &HttpStore) -> anyhow::Result<()> {
    let screen = store.state(view::render).await;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "\n{screen}")?;
    Ok(())
}
