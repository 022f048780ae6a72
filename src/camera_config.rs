use serde_json::{Map, Value};

/// Opaque property blob, key order preserved as written in the descriptor.
pub type PropertyMap = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub name: String,
    pub path: String, // e.g. "/dev/video0"
    /// The whole camera entry, forwarded to the camera backend untouched.
    pub config: PropertyMap,
    /// The entry's `stream` block for the MJPEG server, if any.
    pub stream_config: Option<Value>,
}

/// A `{name, value}` pair from a camera's `properties` array.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedProperty<'a> {
    pub name: &'a str,
    pub value: &'a Value,
}

impl CameraConfig {
    pub fn pixel_format(&self) -> Option<&str> {
        self.config.get("pixel format").and_then(Value::as_str)
    }

    pub fn width(&self) -> Option<u32> {
        self.uint_field("width")
    }

    pub fn height(&self) -> Option<u32> {
        self.uint_field("height")
    }

    pub fn fps(&self) -> Option<u32> {
        self.uint_field("fps")
    }

    /// Entries of `properties` that have a string `name` and a `value`.
    /// Anything else in the array is skipped here and still forwarded as-is.
    pub fn properties(&self) -> Vec<NamedProperty<'_>> {
        self.config
            .get("properties")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let name = item.get("name")?.as_str()?;
                        let value = item.get("value")?;
                        Some(NamedProperty { name, value })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Short human-readable video mode, e.g. "MJPEG 640x480@30".
    pub fn video_mode_summary(&self) -> String {
        let dim = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
        format!(
            "{} {}x{}@{}",
            self.pixel_format().unwrap_or("default"),
            dim(self.width()),
            dim(self.height()),
            dim(self.fps())
        )
    }

    pub fn to_json(&self) -> Value {
        let mut entry = self.config.clone();
        entry.insert("name".to_string(), Value::String(self.name.clone()));
        entry.insert("path".to_string(), Value::String(self.path.clone()));
        if let Some(stream) = &self.stream_config {
            entry.insert("stream".to_string(), stream.clone());
        }
        Value::Object(entry)
    }

    fn uint_field(&self, key: &str) -> Option<u32> {
        self.config
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchedCameraConfig {
    pub name: String,
    /// Network-state key whose value selects the active source.
    pub key: String,
}

impl SwitchedCameraConfig {
    pub fn to_json(&self) -> Value {
        serde_json::json!({ "name": self.name, "key": self.key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn camera(entry: Value) -> CameraConfig {
        let config = entry.as_object().cloned().unwrap();
        CameraConfig {
            name: config["name"].as_str().unwrap().to_string(),
            path: config["path"].as_str().unwrap().to_string(),
            stream_config: config.get("stream").cloned(),
            config,
        }
    }

    #[test]
    fn typed_accessors_read_the_blob() {
        let cam = camera(json!({
            "name": "front",
            "path": "/dev/video0",
            "pixel format": "MJPEG",
            "width": 320,
            "height": 240,
            "fps": 30,
            "properties": [
                { "name": "contrast", "value": 50 },
                { "value": "orphan" },
                { "name": "sharpness", "value": "auto" }
            ]
        }));

        assert_eq!(cam.pixel_format(), Some("MJPEG"));
        assert_eq!(cam.width(), Some(320));
        assert_eq!(cam.height(), Some(240));
        assert_eq!(cam.fps(), Some(30));
        let props = cam.properties();
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].name, "contrast");
        assert_eq!(props[1].value, &json!("auto"));
        assert_eq!(cam.video_mode_summary(), "MJPEG 320x240@30");
    }

    #[test]
    fn malformed_optional_fields_read_as_none() {
        let cam = camera(json!({
            "name": "rear",
            "path": "/dev/video1",
            "width": "wide",
            "fps": -5,
            "properties": "none"
        }));

        assert_eq!(cam.width(), None);
        assert_eq!(cam.fps(), None);
        assert!(cam.properties().is_empty());
        assert_eq!(cam.video_mode_summary(), "default ?x?@?");
    }

    #[test]
    fn to_json_keeps_unknown_keys_and_order() {
        let cam = camera(json!({
            "name": "front",
            "path": "/dev/video0",
            "zoom": 3,
            "stream": { "properties": [] }
        }));
        let rendered = cam.to_json();
        let keys: Vec<_> = rendered.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "path", "zoom", "stream"]);
    }
}
