use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = commands::Cli::parse();
    tracing::debug!(store = %cli.store.display(), command = ?cli.command, "running command");
    let mut stdout = std::io::stdout().lock();
    commands::run(&cli, &mut stdout)
}
