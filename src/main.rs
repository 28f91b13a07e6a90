use cavacamixa::config::SearchParams;
use cavacamixa::SearchResult;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;
use std::process;
use tracing::error;

mod cmd;
mod reports;

/// Plays every Cavacamixa deal looking for the longest and the endless games.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Folder for the checkpoint and game records; must exist and be writable
    #[arg(value_name = "SAVE_FOLDER", conflicts_with = "play")]
    save_folder: Option<PathBuf>,

    /// Play one game from a string of 40 digits 0-3 and print its moves
    #[arg(short, long, value_name = "ARRANGEMENT")]
    play: Option<String>,

    /// Do not print the move-by-move trace when playing one game
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Stop after this many batches instead of running to the end
    #[arg(long)]
    batches: Option<u64>,

    /// JSON file with search parameters; flags given explicitly win
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    params: SearchParams,
}

fn resolve_params(cli: &Cli, matches: &clap::ArgMatches) -> SearchResult<SearchParams> {
    let params = match &cli.config {
        Some(path) => {
            let mut file_params = SearchParams::load_from_file(path)?;
            file_params.merge_from_cli(&cli.params, matches);
            file_params
        }
        None => cli.params.clone(),
    };
    params.validate()?;
    Ok(params)
}

fn execute(cli: &Cli, matches: &clap::ArgMatches) -> SearchResult<()> {
    let params = resolve_params(cli, matches)?;
    match &cli.play {
        Some(arrangement) => cmd::play::run(arrangement, &params, cli.quiet),
        None => {
            let folder = cli
                .save_folder
                .clone()
                .unwrap_or_else(|| PathBuf::from("."));
            cmd::search::run(&folder, params, cli.batches)
        }
    }
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if let Err(e) = execute(&cli, &matches) {
        error!("❌ FATAL: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            error!("   caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}
