use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::Client;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use do_dyndns::{config::Settings, dns::DigitalOceanProvider, updater, Error};

#[derive(Parser)]
#[command(name = "do-dyndns")]
#[command(about = "Dynamic DNS updater - points a DigitalOcean A record at the current external IP")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the external IP and update the DNS record if needed (default)
    Run {
        /// Report the change without applying it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the external IP and current DNS record without changing anything
    Check,

    /// Show the effective configuration read from the environment
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match execute(cli.command.unwrap_or(Commands::Run { dry_run: false })).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn execute(command: Commands) -> Result<(), Error> {
    let mut settings = Settings::from_env()?;
    debug!("Loaded {:?}", settings);

    match command {
        Commands::Run { dry_run } => {
            settings.dry_run |= dry_run;
            let (client, provider) = clients(&settings)?;
            updater::run(&settings, &client, &provider).await?;
        }

        Commands::Check => {
            let (client, provider) = clients(&settings)?;
            updater::check(&settings, &client, &provider).await?;
        }

        Commands::Config => {
            println!("{}", settings);
        }
    }

    Ok(())
}

fn clients(settings: &Settings) -> Result<(Client, DigitalOceanProvider), Error> {
    let client = Client::builder().build().map_err(Error::ExternalIp)?;
    let provider =
        DigitalOceanProvider::new(&settings.api_token).map_err(Error::RecordLookup)?;
    Ok((client, provider))
}
