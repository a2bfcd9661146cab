//! Violations reported by geometry and settings validation.

use thiserror::Error;

/// A size or offset that must not be written to the panel or the store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeometryViolation {
    #[error("{field} is not a finite number ({value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
}

/// A settings value the controller cannot work with.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsViolation {
    #[error("element id for {role} is empty")]
    EmptyElementId { role: &'static str },

    #[error("no resize handle classes configured")]
    NoResizeHandles,

    #[error("ambient margin must be a finite, non-negative number (got {0})")]
    InvalidMargin(f64),

    #[error("docked minimum width must be a finite, non-negative number (got {0})")]
    InvalidMinWidth(f64),

    #[error("auto-close delay must be greater than zero")]
    ZeroAutoCloseDelay,

    #[error("history limit must keep at least one transition")]
    ZeroHistoryLimit,
}
