mod decode;
mod encode;
mod generate;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use w3kit::{Encoder, Error};

/// Prepare, grow, and encode Witcher 3 string databases.
///
/// The input decides what happens: a `.csv` table is resolved and encoded,
/// a `.w3strings` file is decoded back to text, and a directory is scanned
/// for new localization keys which are merged into a working table.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// A .csv table to encode, a .w3strings file to decode, or a mod
    /// directory to scan for new keys
    input: PathBuf,

    /// Output directory; when scanning a directory, may name the target
    /// .csv file directly
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target language code, or `all` for every supported language
    #[arg(short, long)]
    lang: Option<String>,

    /// Also collect quoted literals starting with this prefix when scanning
    #[arg(short, long)]
    search: Option<String>,

    /// Keep the intermediate .csv files written for the encoder
    #[arg(short, long)]
    keep_csv: bool,

    /// Print the composed document as JSON and skip the encoder
    #[arg(long)]
    dry_run: bool,

    /// Path to the w3strings encoder executable
    #[arg(long)]
    encoder: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> w3kit::Result<()> {
    if args.input.is_dir() {
        return generate::run(args);
    }

    let encoder = match &args.encoder {
        Some(path) => Encoder::new(path),
        None => Encoder::locate(),
    };
    match args.input.extension().and_then(|s| s.to_str()) {
        Some("w3strings") => decode::run(args, &encoder),
        Some("csv") => encode::run(args, &encoder),
        _ => Err(Error::UnsupportedInput(args.input.clone())),
    }
}
