// Shared helpers for the integration tests.
#![allow(dead_code)]

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub use visionrig::common::logging_setup::init_test_logging;

/// Writes `body` as `frc.json` in a fresh temp dir. Keep the `TempDir`
/// alive for as long as the path is used.
pub fn write_descriptor(body: &str) -> (TempDir, PathBuf) {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frc.json");
    fs::write(&path, body).unwrap();
    (dir, path)
}

pub fn write_json(value: &Value) -> (TempDir, PathBuf) {
    write_descriptor(&serde_json::to_string_pretty(value).unwrap())
}

/// The descriptor shipped on the co-processor image, two cameras and one
/// switched stream.
pub fn sample_descriptor() -> Value {
    serde_json::json!({
        "team": 1234,
        "ntmode": "client",
        "cameras": [
            {
                "name": "front",
                "path": "/dev/video0",
                "pixel format": "MJPEG",
                "width": 320,
                "height": 240,
                "fps": 30,
                "brightness": 50,
                "white balance": "auto",
                "exposure": "hold",
                "properties": [
                    { "name": "contrast", "value": 40 }
                ],
                "stream": {
                    "properties": [
                        { "name": "compression", "value": 60 }
                    ]
                }
            },
            {
                "name": "rear",
                "path": "/dev/video1"
            }
        ],
        "switched cameras": [
            { "name": "driver", "key": "/CameraSelection" }
        ]
    })
}
