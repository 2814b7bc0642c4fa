use clap::Parser;
use log::{error, Level, LevelFilter};
use sharecard::cli::Cli;
use std::io::Write;

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            // Progress lines stay bare; anything else is tagged and colored by level.
            if record.level() == Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                let style = buf.default_level_style(record.level());
                writeln!(buf, "{style}[{}]{style:#} {}", record.level(), record.args())
            }
        })
        .init();
}

fn main() {
    // Exits with 0 on --help and 2 on malformed arguments before any work happens.
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config();
    if let Err(e) = sharecard::run(&config) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}
