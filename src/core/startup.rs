use crate::app_config::{Configuration, NtMode};
use crate::camera::switched::resolve_selection;
use crate::core::camera_server::{CameraServer, SourceId, SwitchedId};
use crate::core::network_state::{NetworkState, NetworkValue};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct StartedCamera {
    pub name: String,
    pub source: SourceId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartedSwitchedCamera {
    pub name: String,
    pub key: String,
    pub handle: SwitchedId,
}

/// What the startup sequence brought up. Owns the configuration it was
/// started from.
#[derive(Debug)]
pub struct Rig {
    pub config: Configuration,
    pub cameras: Vec<StartedCamera>,
    pub switched_cameras: Vec<StartedSwitchedCamera>,
}

/// Brings the rig up: network state first, then every camera in descriptor
/// order, then the switched cameras wired to their selector keys.
///
/// A camera that fails to open is logged and left out; switched-camera
/// indices then refer to the cameras that did start.
pub async fn start_rig(
    config: Configuration,
    network_state: &dyn NetworkState,
    camera_server: Arc<dyn CameraServer>,
) -> Result<Rig> {
    let start_time = Instant::now();

    match config.mode {
        NtMode::Server => {
            info!("🌐 Setting up network-state server");
            network_state
                .start_server()
                .await
                .context("Failed to start network-state server")?;
        }
        NtMode::Client => {
            info!("🌐 Setting up network-state client for team {}", config.team);
            network_state
                .start_client_team(config.team)
                .await
                .with_context(|| format!("Failed to start network-state client for team {}", config.team))?;
        }
    }

    let mut cameras = Vec::with_capacity(config.cameras.len());
    for camera in &config.cameras {
        let cam_start = Instant::now();
        match camera_server.start_camera(camera).await {
            Ok(source) => {
                debug!("  Camera '{}' started as {:?} in {:?}", camera.name, source, cam_start.elapsed());
                cameras.push(StartedCamera {
                    name: camera.name.clone(),
                    source,
                });
            }
            Err(e) => {
                error!("❌ Failed to start camera '{}' on {}: {}", camera.name, camera.path, e);
            }
        }
    }

    let camera_names: Arc<Vec<String>> = Arc::new(cameras.iter().map(|c| c.name.clone()).collect());
    let sources: Arc<Vec<SourceId>> = Arc::new(cameras.iter().map(|c| c.source).collect());

    let mut switched_cameras = Vec::with_capacity(config.switched_cameras.len());
    for switched in &config.switched_cameras {
        let handle = camera_server
            .add_switched_camera(&switched.name)
            .await
            .with_context(|| format!("Failed to add switched camera '{}'", switched.name))?;

        let server = camera_server.clone();
        let names = camera_names.clone();
        let sources = sources.clone();
        let switched_name = switched.name.clone();
        network_state
            .add_listener(
                &switched.key,
                Arc::new(move |key: &str, value: &NetworkValue| {
                    apply_selection(server.as_ref(), handle, &switched_name, key, value, &names, &sources)
                }),
            )
            .with_context(|| {
                format!("Failed to watch key '{}' for switched camera '{}'", switched.key, switched.name)
            })?;

        switched_cameras.push(StartedSwitchedCamera {
            name: switched.name.clone(),
            key: switched.key.clone(),
            handle,
        });
    }

    info!(
        "🚀 Rig up in {:?}: {} of {} camera(s), {} switched camera(s)",
        start_time.elapsed(),
        cameras.len(),
        config.cameras.len(),
        switched_cameras.len()
    );
    Ok(Rig {
        config,
        cameras,
        switched_cameras,
    })
}

fn apply_selection(
    server: &dyn CameraServer,
    handle: SwitchedId,
    switched_name: &str,
    key: &str,
    value: &NetworkValue,
    names: &[String],
    sources: &[SourceId],
) {
    match resolve_selection(value, names) {
        Ok(index) => {
            if let Err(e) = server.select_source(handle, sources[index]) {
                error!("❌ Switched camera '{}': could not select '{}': {}", switched_name, names[index], e);
            }
        }
        Err(e) => warn!("⚠️ Switched camera '{}': ignoring {} = {}: {}", switched_name, key, value, e),
    }
}

/// Idles until Ctrl-C, waking every `interval`.
pub async fn run_until_shutdown(rig: &Rig, interval: Duration) -> Result<()> {
    info!("💤 Running with {} camera(s); press Ctrl-C to stop.", rig.cameras.len());
    let mut ticks: u64 = 0;
    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                ticks += 1;
                debug!("Idle tick #{}", ticks);
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for shutdown signal")?;
                info!("🏁 Shutdown requested after {} idle tick(s).", ticks);
                return Ok(());
            }
        }
    }
}
