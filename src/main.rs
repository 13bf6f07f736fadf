use clap::Parser;

use driftfield::config::{Cli, FieldConfig};

fn main() {
    env_logger::init();
    let config = FieldConfig::from(Cli::parse());
    log::info!("driftfield starting up: {config:?}");

    if let Err(e) = driftfield::app::run(config) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
