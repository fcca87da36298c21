/// Funplay - video playback sessions from the command line
use clap::Parser;
use funplay_cli::{CliConfig, Command, Player};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "funplay")]
#[command(about = "Funplay video playback sessions", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FUNPLAY_CONFIG", default_value = "funplay.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "funplay_cli=info,funplay_playback=info,funplay_storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load_from(&cli.config)?;
    config.validate()?;

    if let Some(parent) = database_dir(&config.storage.database_url) {
        std::fs::create_dir_all(parent)?;
    }

    let player = Player::open(&config).await?;
    let output = player.execute(cli.command).await?;
    println!("{}", output);

    Ok(())
}

/// Parent directory of a file-backed `sqlite://` URL
fn database_dir(database_url: &str) -> Option<PathBuf> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    PathBuf::from(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(PathBuf::from)
}
