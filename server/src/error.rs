//! Transport- and session-facing errors. Per spec §7, nothing below this
//! layer escapes to the transport as a raw stack trace — handshake failures
//! close the connection with a reason string, everything else is logged and
//! absorbed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid connect parameters: {0}")]
    InvalidParams(String),
    #[error("websocket upgrade failed: {0}")]
    Upgrade(String),
}
