//! Flowscript CLI
//!
//! Usage:
//!   flowscript [OPTIONS] <FIRST> <THEN>
//!
//! Options:
//!   -n, --times <N>        Number of rounds
//!   -c, --config <FILE>    Configuration file (TOML format)
//!   -f, --format <FORMAT>  Output format: text or json
//!   -d, --debug            Print parsed scripts and apply rounds to stderr
//!   -h, --help             Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;

use flowscript::{logging, render_edges, ApplyError, Config, Interpreter, OutputFormat, Script};

#[derive(Parser)]
#[command(name = "flowscript")]
#[command(about = "Combine two flow scripts into a repeated, renumbered edge list")]
struct Cli {
    /// Script whose edges come first in every round
    first: PathBuf,

    /// Script whose edges follow in every round
    then: PathBuf,

    /// Number of rounds (overrides the config file)
    #[arg(short = 'n', long)]
    times: Option<usize>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Debug mode: print both parsed scripts and per-round log records to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        if let Err(e) = logging::init(LevelFilter::Debug) {
            eprintln!("Error installing logger: {}", e);
        }
    }

    let mut config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    if let Some(times) = cli.times {
        config = config.with_times(times);
    }
    if let Some(format) = cli.format {
        config = config.with_format(format);
    }

    let first = read_script(&cli.first);
    let then = read_script(&cli.then);

    let interpreter = Interpreter::with_config(config);

    if cli.debug {
        for (path, source) in [(&cli.first, &first), (&cli.then, &then)] {
            if let Ok(chart) = interpreter.parse(source) {
                eprintln!("=== {} ===", path.display());
                eprint!("{}", chart);
                eprintln!("{:#?}", chart.flow_statements);
            }
        }
    }

    let edges = match interpreter.apply(&first, &then) {
        Ok(edges) => edges,
        Err(ApplyError::Parse { script, errors }) => {
            let (path, source) = match script {
                Script::First => (&cli.first, &first),
                Script::Then => (&cli.then, &then),
            };
            let filename = path.display().to_string();
            for error in &errors {
                eprint!("{}", error.format(source, &filename));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match render_edges(&edges, interpreter.config().format) {
        Ok(out) => {
            if !out.is_empty() {
                println!("{}", out);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_script(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
