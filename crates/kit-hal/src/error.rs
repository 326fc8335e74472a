//! Error types for transport dispatch.

use kit_common::KitStatus;
use thiserror::Error;

use crate::interface::{InterfaceId, PhysicalInterface};

/// Errors raised when binding a transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HalError {
    /// The identifier is a sentinel, not a device bus.
    #[error("interface {0} is not a physical transport")]
    NotPhysical(InterfaceId),

    /// No driver was registered for this bus.
    #[error("no {0} transport registered")]
    NotRegistered(PhysicalInterface),
}

impl HalError {
    /// Wire status reported for this error.
    pub fn status(&self) -> KitStatus {
        KitStatus::InvalidParam
    }
}

/// Result type for transport dispatch.
pub type HalResult<T> = Result<T, HalError>;
