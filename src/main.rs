mod app;
mod config;
mod error;
mod events;
mod notify;
mod state;
mod store;
mod ui;
mod utils;

use anyhow::Result;
use clap::{crate_version, App as ClapApp, Arg};
use config::Config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new("quest-tui")
        .version(crate_version!())
        .about("A terminal user interface for RPG-style quest and habit tracking")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Path to the configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("data")
                .short("d")
                .long("data")
                .value_name("DIR")
                .help("Path to the data directory")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(dir) = matches.value_of("data") {
        config.data_dir = Some(PathBuf::from(dir));
    }

    app::App::start(config).await
}
