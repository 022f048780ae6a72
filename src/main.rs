use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

use visionrig::app_config::IDLE_INTERVAL;
use visionrig::cli;
use visionrig::common::logging_setup;
use visionrig::config_loader::ConfigLoader;
use visionrig::core::dry_run::{DryRunCameraServer, DryRunNetworkState};
use visionrig::core::startup;

#[tokio::main]
async fn main() -> Result<()> {
    let main_start_time = Instant::now();
    logging_setup::initialize_logging();

    let matches = cli::build_cli().get_matches();
    let config_path = cli::config_path(&matches);
    debug!("Attempting to load configuration from: {}", config_path.display());

    let mut loader = ConfigLoader::new(config_path);
    // The loader has already reported the failure; a bad descriptor means
    // nothing gets started, not a crash.
    let report = match loader.reload() {
        Ok(report) => report,
        Err(_) => {
            info!("🛑 Not starting: configuration could not be loaded from '{}'.", loader.path().display());
            return Ok(());
        }
    };

    // No vendor SDK is linked in; the dry-run backends log every call.
    let network_state = DryRunNetworkState::new();
    let camera_server = Arc::new(DryRunCameraServer::new());

    let rig = startup::start_rig(report.config, &network_state, camera_server)
        .await
        .context("Failed to start the camera rig")?;

    startup::run_until_shutdown(&rig, IDLE_INTERVAL).await?;
    info!("🏁 visionrig finished in {:?}.", main_start_time.elapsed());
    Ok(())
}
