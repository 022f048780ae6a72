use crate::core::network_state::NetworkValue;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("camera index {index} out of range (0..{count})")]
    OutOfRange { index: i64, count: usize },

    #[error("no camera named '{0}'")]
    UnknownName(String),

    #[error("unsupported selector value {0}")]
    Unsupported(NetworkValue),
}

/// Picks the physical camera a switched stream should show.
///
/// A numeric value is truncated toward zero and used as an index into
/// `camera_names`; a string value is matched exactly against the names and
/// the first match wins.
pub fn resolve_selection(
    value: &NetworkValue,
    camera_names: &[String],
) -> Result<usize, SelectionError> {
    match value {
        NetworkValue::Double(d) => {
            let index = *d as i64;
            usize::try_from(index)
                .ok()
                .filter(|i| *i < camera_names.len())
                .ok_or(SelectionError::OutOfRange {
                    index,
                    count: camera_names.len(),
                })
        }
        NetworkValue::String(name) => camera_names
            .iter()
            .position(|candidate| candidate == name)
            .ok_or_else(|| SelectionError::UnknownName(name.clone())),
        other => Err(SelectionError::Unsupported(other.clone())),
    }
}
