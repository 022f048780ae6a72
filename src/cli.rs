use clap::{Arg, ArgAction, ArgMatches, Command};
use log::debug;
use std::path::PathBuf;
use std::time::Instant;

use crate::app_config::DEFAULT_CONFIG_PATH;

pub fn build_cli() -> Command {
    debug!("⚙️ Building CLI interface...");
    let start_time = Instant::now();
    let cmd = Command::new("visionrig")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Loads the vision co-processor rig descriptor, starts network state and streams the configured cameras.")
        .arg(
            Arg::new("config")
                .value_name("CONFIG")
                .help(format!("Path to the JSON rig descriptor [default: {}]", DEFAULT_CONFIG_PATH))
                .action(ArgAction::Set),
        );
    debug!("✅ CLI interface built in {:?}", start_time.elapsed());
    cmd
}

/// The descriptor path: the positional argument if given, else the default.
pub fn config_path(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
