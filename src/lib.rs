pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use cli::{Action, Cli, cmd_create_user, cmd_list_shifts, cmd_list_users};
pub use config::Config;
use config::GeneralConfig;
use services::SeaOrmUserProvisioner;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Loads `.env` and configuration, sets up logging and runs the action the
/// command line asks for. Failures are logged before being returned.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = init_tracing(&log_directive(
        rust_log.as_deref(),
        &GeneralConfig::default().log_level,
    ));

    let result = run_action(cli, rust_log.as_deref(), &filter).await;
    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}

async fn run_action(cli: Cli, rust_log: Option<&str>, filter: &FilterHandle) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    config.validate()?;

    let directive = log_directive(rust_log, &config.general.log_level);
    if let Err(e) = filter.reload(EnvFilter::new(&directive)) {
        warn!("Failed to apply log level '{directive}': {e}");
    }

    let provisioner = SeaOrmUserProvisioner::new(config.database, config.security);

    match cli.action()? {
        Action::ListShifts => cmd_list_shifts(&provisioner).await,
        Action::ListUsers => cmd_list_users(&provisioner).await,
        Action::Create(request) => cmd_create_user(&provisioner, request).await,
    }
}

/// `RUST_LOG` wins when set and non-empty, otherwise the configured level.
fn log_directive(rust_log: Option<&str>, configured: &str) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(configured)
        .to_string()
}

/// Installs the stderr subscriber before the config is read, so config
/// loading is logged too. The returned handle swaps in the configured level.
fn init_tracing(directive: &str) -> FilterHandle {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    handle
}
