use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use medcalc_cli::cli::{Cli, Command, ConfigCommand};
use medcalc_cli::commands;
use medcalc_cli::config::{self, MedcalcConfig};
use medcalc_scales::ScaleRegistry;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    let config = config::load_config(&config_path)?;
    init_logging(&config);
    if let Some(from) = config.migrated_from {
        tracing::info!(
            path = %config_path.display(),
            from,
            to = config::CURRENT_VERSION,
            "config migrated from an older version"
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => commands::list(&ScaleRegistry::load()?, &mut out),
        Command::Show { scale } => {
            let registry = ScaleRegistry::load()?;
            commands::show(registry.get(&scale)?, &mut out)
        }
        Command::Validate => commands::validate(&medcalc_scales::all_scales(), &mut out),
        Command::Calculate(args) => {
            let registry = ScaleRegistry::load()?;
            commands::calculate(&registry, &args, &config, &mut out).map(|_| ())
        }
        Command::Config { command } => match command {
            ConfigCommand::Show => commands::config_show(&config, &config_path, &mut out),
            ConfigCommand::Init { force } => commands::config_init(&config_path, force, &mut out),
        },
    }
}

/// Logs go to stderr so command output stays pipeable. `RUST_LOG` wins over
/// the configured filter.
fn init_logging(config: &MedcalcConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
