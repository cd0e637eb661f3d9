use std::path::Path;

use clap::Parser;
use siteboard::Siteboard;
use siteboard::cli::commands::Cli;
use siteboard::cli::handlers;
use siteboard::io::config_io;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config_io::read_config_from(Path::new(path)),
        None => config_io::read_config(),
    };
    if let Err(e) = siteboard::logging::setup(&config.log.filter) {
        eprintln!("warning: could not set up logging: {}", e);
    }

    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref(), &config);
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");
    let board = Siteboard::on_disk(data_dir);

    if let Err(e) = handlers::dispatch(cli, &board).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
