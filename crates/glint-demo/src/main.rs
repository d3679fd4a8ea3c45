#![forbid(unsafe_code)]

//! glint demo binary entry point.

use glint_demo::{app, cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Some(path) = &opts.log_file
        && let Err(e) = logging::init(path)
    {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = app::run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
