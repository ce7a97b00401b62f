use clap::Parser;
use log::{info, warn};
use snafu::ErrorCompat;

mod args;
mod tally;

use crate::tally::config_reader::RunSettings;

fn main() {
    let args = args::Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
    info!("args: {:?}", args);

    let res = RunSettings::from_args(&args).and_then(|settings| tally::run_tally(&settings));

    if let Err(e) = res {
        let kind = e.kind();
        warn!("Error occured {:?}", e);
        eprintln!("An error occured ({:?}): {}", kind, e);
        for cause in ErrorCompat::iter_chain(&e).skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(kind.exit_code());
    }
}
