use clap::Parser;
use tracing_subscriber::EnvFilter;

use va_cli::cli::{self, Cli, Command, ConfigCommand, SettingsCommand};
use va_cli::context::Console;
use va_client::{Lead, Order};
use va_console::Route;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_tracing();

    match cli.command {
        Command::Version => {
            println!("va-admin {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Config(ConfigCommand::Validate) => {
            let (config, config_path) = cli::load_config()?;
            if !cli::config::validate(&config, &config_path) {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => {
            let (config, _) = cli::load_config()?;
            cli::config::show(&config)
        }
        Command::Doctor => {
            let (config, config_path) = cli::load_config()?;
            let console = Console::open(config)?;
            if !cli::doctor::run(&console, &config_path).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        command => {
            let (config, _) = cli::load_config()?;
            let console = Console::open(config)?;
            dispatch(&console, command).await
        }
    }
}

async fn dispatch(console: &Console, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { no_store } => cli::login::login(console, no_store).await,
        Command::Logout => cli::login::logout(console),
        Command::Settings(SettingsCommand::Show { json }) => {
            cli::settings::show(console, json).await
        }
        Command::Settings(SettingsCommand::Edit) => cli::settings::edit(console).await,
        Command::Logs { follow } => cli::logs::logs(console, follow).await,
        Command::Orders => cli::records::list::<Order>(console, Route::Orders).await,
        Command::Leads => cli::records::list::<Lead>(console, Route::Leads).await,
        Command::Health => cli::doctor::health(console).await,
        Command::Reload => cli::doctor::reload(console).await,
        Command::Doctor | Command::Config(_) | Command::Version => Ok(()),
    }
}

/// Compact stderr tracing so stdout stays clean for tables.
fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
