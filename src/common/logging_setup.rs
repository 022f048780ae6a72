use chrono::Local;
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Log level used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Sets up `env_logger` on stderr. `RUST_LOG` wins over `DEFAULT_LOG_LEVEL`.
pub fn initialize_logging() {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_LEVEL));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {} - {}",
            Local::now().format(LOG_TIMESTAMP_FORMAT),
            record.level(),
            record.target(),
            record.args()
        )
    });

    builder.try_init().unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", e);
    });
}

/// Quiet logger for tests; repeated calls are harmless.
pub fn init_test_logging() {
    let _ = Builder::new()
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
