//! Messages posted by the page through `window.ipc.postMessage`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context_menu::ContextMenuParams;

/// Upper bound on a single message; anything larger is dropped unparsed.
pub const MAX_MESSAGE_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageMessage {
    ContextMenu { params: ContextMenuParams },
}

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("page message too large ({0} bytes)")]
    TooLarge(usize),
    #[error("malformed page message: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn parse_message(body: &str) -> Result<PageMessage, IpcError> {
    if body.len() > MAX_MESSAGE_BYTES {
        return Err(IpcError::TooLarge(body.len()));
    }
    Ok(serde_json::from_str(body)?)
}
