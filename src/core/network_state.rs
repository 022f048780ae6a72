use crate::errors::AppError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A value as seen on the shared network-state table.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkValue {
    Double(f64),
    String(String),
    Boolean(bool),
}

impl fmt::Display for NetworkValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkValue::Double(d) => write!(f, "{}", d),
            NetworkValue::String(s) => write!(f, "'{}'", s),
            NetworkValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Callback fired whenever the watched key is created or updated.
pub type ValueListener = Arc<dyn Fn(&str, &NetworkValue) + Send + Sync>;

/// The network-state synchronization service, client or server side.
#[async_trait]
pub trait NetworkState: Send + Sync {
    /// Connect as a client to the robot of the given team.
    async fn start_client_team(&self, team: u32) -> Result<(), AppError>;

    /// Host the table locally.
    async fn start_server(&self) -> Result<(), AppError>;

    /// Watch `key`; the listener also fires for a value that already exists.
    fn add_listener(&self, key: &str, listener: ValueListener) -> Result<(), AppError>;
}
