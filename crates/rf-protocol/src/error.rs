//! Error types for protocol selection

use thiserror::Error;

/// Errors that can occur while selecting a protocol
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Protocol index outside the catalog (indices are 1-based)
    #[error("protocol {index} out of range: valid protocols are 1..={size}")]
    OutOfRange { index: usize, size: usize },
}
