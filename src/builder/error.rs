//! Errors raised while assembling a controller.

use crate::validation::SettingsViolation;
use thiserror::Error;

/// Errors that can occur when building a [`FloatingPanelController`](crate::FloatingPanelController).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Visual surface not specified. Call .surface(surface) before .build()")]
    MissingSurface,

    #[error("Scheduler not specified. Call .scheduler(scheduler) before .build()")]
    MissingScheduler,

    #[error("Invalid controller settings: {}", describe(.0))]
    InvalidSettings(Vec<SettingsViolation>),
}

fn describe(violations: &[SettingsViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_settings_lists_every_violation() {
        let error = BuildError::InvalidSettings(vec![
            SettingsViolation::NoResizeHandles,
            SettingsViolation::ZeroAutoCloseDelay,
        ]);
        assert_eq!(
            error.to_string(),
            "Invalid controller settings: no resize handle classes configured; \
             auto-close delay must be greater than zero"
        );
    }
}
