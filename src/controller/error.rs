//! Restore failures.

use crate::core::PanelId;
use crate::host::HostError;
use thiserror::Error;

/// Why a panel could not be re-shown after the panel docked again.
///
/// These never escape the controller; they are logged and kept as the last
/// restore error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RestoreError {
    #[error("no panel host is available to restore panel '{0}'")]
    HostUnavailable(PanelId),

    #[error("panel '{0}' is unknown to the panel host")]
    PanelNotFound(PanelId),

    #[error(transparent)]
    Host(#[from] HostError),
}
