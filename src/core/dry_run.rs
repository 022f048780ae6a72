use crate::camera_config::CameraConfig;
use crate::core::camera_server::{CameraServer, SourceId, SwitchedId};
use crate::core::network_state::{NetworkState, NetworkValue, ValueListener};
use crate::errors::AppError;
use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Everything the dry-run backends were asked to do, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    StartClientTeam(u32),
    StartServer,
    AddListener(String),
    StartCamera { name: String, path: String, has_stream_config: bool },
    AddSwitchedCamera(String),
    SelectSource { switched: SwitchedId, source: SourceId },
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-process network-state table. Values published with [`publish`] are
/// delivered to the listeners registered for that key.
///
/// [`publish`]: DryRunNetworkState::publish
#[derive(Default)]
pub struct DryRunNetworkState {
    calls: Mutex<Vec<BackendCall>>,
    values: Mutex<HashMap<String, NetworkValue>>,
    listeners: Mutex<HashMap<String, Vec<ValueListener>>>,
}

impl DryRunNetworkState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    pub fn get(&self, key: &str) -> Option<NetworkValue> {
        lock(&self.values).get(key).cloned()
    }

    pub fn publish(&self, key: &str, value: NetworkValue) {
        debug!("📡 [dry-run] {} = {}", key, value);
        lock(&self.values).insert(key.to_string(), value.clone());
        // Listeners run without the table locked so they may publish too.
        let listeners = lock(&self.listeners).get(key).cloned().unwrap_or_default();
        for listener in listeners {
            listener(key, &value);
        }
    }
}

#[async_trait]
impl NetworkState for DryRunNetworkState {
    async fn start_client_team(&self, team: u32) -> Result<(), AppError> {
        info!("📡 [dry-run] Setting up network-state client for team {}", team);
        lock(&self.calls).push(BackendCall::StartClientTeam(team));
        Ok(())
    }

    async fn start_server(&self) -> Result<(), AppError> {
        info!("📡 [dry-run] Setting up network-state server");
        lock(&self.calls).push(BackendCall::StartServer);
        Ok(())
    }

    fn add_listener(&self, key: &str, listener: ValueListener) -> Result<(), AppError> {
        debug!("📡 [dry-run] Listening on '{}'", key);
        lock(&self.calls).push(BackendCall::AddListener(key.to_string()));
        lock(&self.listeners)
            .entry(key.to_string())
            .or_default()
            .push(listener.clone());
        let existing = self.get(key);
        if let Some(value) = existing {
            listener(key, &value);
        }
        Ok(())
    }
}

/// Camera server that opens nothing and hands out sequential ids.
#[derive(Default)]
pub struct DryRunCameraServer {
    calls: Mutex<Vec<BackendCall>>,
    sources: Mutex<Vec<String>>,
    switched: Mutex<Vec<(String, Option<SourceId>)>>,
}

impl DryRunCameraServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    /// The source currently shown by a switched stream, if one was selected.
    pub fn selected_source(&self, switched: SwitchedId) -> Option<SourceId> {
        lock(&self.switched)
            .get(switched.0 as usize)
            .and_then(|(_, source)| *source)
    }
}

#[async_trait]
impl CameraServer for DryRunCameraServer {
    async fn start_camera(&self, camera: &CameraConfig) -> Result<SourceId, AppError> {
        info!(
            "📷 [dry-run] Starting camera '{}' on {} ({})",
            camera.name,
            camera.path,
            camera.video_mode_summary()
        );
        for property in camera.properties() {
            debug!("  [dry-run] '{}' property {} = {}", camera.name, property.name, property.value);
        }
        lock(&self.calls).push(BackendCall::StartCamera {
            name: camera.name.clone(),
            path: camera.path.clone(),
            has_stream_config: camera.stream_config.is_some(),
        });
        let mut sources = lock(&self.sources);
        sources.push(camera.name.clone());
        Ok(SourceId((sources.len() - 1) as u32))
    }

    async fn add_switched_camera(&self, name: &str) -> Result<SwitchedId, AppError> {
        info!("🔀 [dry-run] Adding switched camera '{}'", name);
        lock(&self.calls).push(BackendCall::AddSwitchedCamera(name.to_string()));
        let mut switched = lock(&self.switched);
        switched.push((name.to_string(), None));
        Ok(SwitchedId((switched.len() - 1) as u32))
    }

    fn select_source(&self, switched: SwitchedId, source: SourceId) -> Result<(), AppError> {
        if lock(&self.sources).get(source.0 as usize).is_none() {
            return Err(AppError::NotFound(format!("camera source {:?}", source)));
        }
        let mut streams = lock(&self.switched);
        let slot = streams
            .get_mut(switched.0 as usize)
            .ok_or_else(|| AppError::NotFound(format!("switched camera {:?}", switched)))?;
        info!("🔀 [dry-run] Switched camera '{}' now shows source {}", slot.0, source.0);
        slot.1 = Some(source);
        lock(&self.calls).push(BackendCall::SelectSource { switched, source });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn listener_sees_existing_and_later_values() {
        let nt = DryRunNetworkState::new();
        nt.publish("selector", NetworkValue::Double(1.0));

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        nt.add_listener(
            "selector",
            Arc::new(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        nt.publish("selector", NetworkValue::String("rear".to_string()));
        nt.publish("other", NetworkValue::Boolean(true));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn select_source_rejects_unknown_handles() {
        let server = DryRunCameraServer::new();
        assert!(server.select_source(SwitchedId(0), SourceId(0)).is_err());
    }
}
