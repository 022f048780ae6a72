use crate::app_config::{Configuration, NtMode};
use crate::camera_config::{CameraConfig, SwitchedCameraConfig};
use crate::errors::{ConfigError, ConfigWarning};
use log::{debug, error, info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A successful load plus every non-fatal diagnostic raised along the way.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub config: Configuration,
    pub warnings: Vec<ConfigWarning>,
}

/// Loads the rig descriptor at `path`. Non-fatal problems are logged and
/// dropped; use [`load_config_with_report`] to inspect them.
pub fn load_config(path: impl AsRef<Path>) -> Result<Configuration, ConfigError> {
    load_config_with_report(path, NtMode::default()).map(|report| report.config)
}

/// Loads the rig descriptor at `path`. An unrecognized `ntmode` leaves the
/// mode at `previous_mode`.
pub fn load_config_with_report(
    path: impl AsRef<Path>,
    previous_mode: NtMode,
) -> Result<LoadReport, ConfigError> {
    let path = path.as_ref();
    debug!("📄 Attempting to load config from: {}", path.display());
    let start_time = Instant::now();

    let content = fs::read_to_string(path).map_err(|e| report(open_error(path, e)))?;
    debug!("Read config file in {:?}", start_time.elapsed());

    let parse_start_time = Instant::now();
    let top: Value = serde_json::from_str(&content).map_err(|e| {
        report(ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    debug!("Parsed JSON in {:?}", parse_start_time.elapsed());

    let mut reader = DescriptorReader {
        path,
        warnings: Vec::new(),
    };
    let config = reader.read(&top, previous_mode).map_err(report)?;

    info!(
        "✅ Loaded configuration from '{}' in {:?}: team {}, {} mode, {} camera(s), {} switched camera(s), {} warning(s)",
        path.display(),
        start_time.elapsed(),
        config.team,
        config.mode,
        config.cameras.len(),
        config.switched_cameras.len(),
        reader.warnings.len()
    );
    Ok(LoadReport {
        config,
        warnings: reader.warnings,
    })
}

/// Reusable handle for loading the same descriptor more than once. Each
/// reload yields a fresh snapshot; the last good mode is the fallback for an
/// unrecognized `ntmode`.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    last_mode: NtMode,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigLoader {
            path: path.into(),
            last_mode: NtMode::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reload(&mut self) -> Result<LoadReport, ConfigError> {
        let report = load_config_with_report(&self.path, self.last_mode)?;
        self.last_mode = report.config.mode;
        Ok(report)
    }
}

fn open_error(path: &Path, source: std::io::Error) -> ConfigError {
    let path = path.to_path_buf();
    match source.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => {
            ConfigError::FileNotFound { path, source }
        }
        _ => ConfigError::Io { path, source },
    }
}

fn report(err: ConfigError) -> ConfigError {
    error!("❌ {}", err);
    err
}

struct DescriptorReader<'a> {
    path: &'a Path,
    warnings: Vec<ConfigWarning>,
}

impl DescriptorReader<'_> {
    fn read(&mut self, top: &Value, previous_mode: NtMode) -> Result<Configuration, ConfigError> {
        let obj = top
            .as_object()
            .ok_or_else(|| self.schema("must be JSON object"))?;

        let team = match obj.get("team") {
            None => return Err(self.schema("could not read team number")),
            Some(value) => coerce_team(value).ok_or_else(|| {
                self.schema(format!("could not read team number (got {})", value))
            })?,
        };

        // Scalars are read as their text; only `client`/`server` are understood.
        let mode_text = match obj.get("ntmode") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(other) => {
                return Err(self.schema(format!("ntmode must be a string (got {})", other)))
            }
        };
        let mode = match mode_text {
            None => previous_mode,
            Some(text) => match NtMode::parse(&text) {
                Some(mode) => mode,
                None => {
                    self.warn("ntmode", format!("could not understand ntmode value '{}'", text));
                    previous_mode
                }
            },
        };

        let cameras = self
            .array(obj, "cameras")?
            .iter()
            .enumerate()
            .map(|(idx, entry)| self.read_camera(idx, entry))
            .collect::<Result<Vec<_>, _>>()?;

        let switched_cameras = self
            .array(obj, "switched cameras")?
            .iter()
            .enumerate()
            .map(|(idx, entry)| self.read_switched_camera(idx, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Configuration {
            team,
            mode,
            cameras,
            switched_cameras,
        })
    }

    fn read_camera(&self, idx: usize, entry: &Value) -> Result<CameraConfig, ConfigError> {
        let obj = entry
            .as_object()
            .ok_or_else(|| self.schema(format!("camera #{} must be a JSON object", idx + 1)))?;
        let name = required_str(obj, "name")
            .ok_or_else(|| self.schema(format!("could not read camera name (camera #{})", idx + 1)))?;
        let path = required_str(obj, "path")
            .ok_or_else(|| self.schema(format!("camera '{}': could not read path", name)))?;
        let stream_config = obj.get("stream").filter(|v| !v.is_null()).cloned();

        let camera = CameraConfig {
            name,
            path,
            config: obj.clone(),
            stream_config,
        };
        debug!(
            "  Camera #{} '{}' at {} ({})",
            idx + 1,
            camera.name,
            camera.path,
            camera.video_mode_summary()
        );
        Ok(camera)
    }

    fn read_switched_camera(
        &self,
        idx: usize,
        entry: &Value,
    ) -> Result<SwitchedCameraConfig, ConfigError> {
        let obj = entry.as_object().ok_or_else(|| {
            self.schema(format!("switched camera #{} must be a JSON object", idx + 1))
        })?;
        let name = required_str(obj, "name").ok_or_else(|| {
            self.schema(format!("could not read switched camera name (switched camera #{})", idx + 1))
        })?;
        let key = required_str(obj, "key")
            .ok_or_else(|| self.schema(format!("switched camera '{}': could not read key", name)))?;
        debug!("  Switched camera #{} '{}' keyed on '{}'", idx + 1, name, key);
        Ok(SwitchedCameraConfig { name, key })
    }

    /// Optional array field; absent reads as empty.
    fn array<'v>(&self, obj: &'v Map<String, Value>, key: &str) -> Result<&'v [Value], ConfigError> {
        match obj.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(self.schema(format!("'{}' must be an array", key))),
        }
    }

    fn schema(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::Schema {
            path: self.path.to_path_buf(),
            message: message.into(),
        }
    }

    fn warn(&mut self, field: &str, message: String) {
        let warning = ConfigWarning {
            path: self.path.to_path_buf(),
            field: field.to_string(),
            message,
        };
        warn!("⚠️ {}", warning);
        self.warnings.push(warning);
    }
}

fn required_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integers, integral floats and integer strings are accepted; the result
/// must be a positive team number.
fn coerce_team(value: &Value) -> Option<u32> {
    let n: i64 = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)?,
        },
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|team| *team > 0)
}
