//! Command-line interface for nestmap pipelines.

use clap::Parser;

mod cli;
mod run;

use cli::Cli;

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the -v default
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
