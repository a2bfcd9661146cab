//! Panel presentation modes.
//!
//! The controller never owns the floating flag itself; it maps every observed
//! value onto a [`PanelMode`] so transitions can be compared and recorded.

use serde::{Deserialize, Serialize};

/// How the side panel is currently presented.
///
/// # Example
///
/// ```rust
/// use floatdock::core::PanelMode;
///
/// let mode = PanelMode::from_floating(true);
/// assert!(mode.is_floating());
/// assert_eq!(mode.name(), "Floating");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PanelMode {
    /// Fixed in the sidebar column, part of the normal layout flow.
    Docked,
    /// Drawn as an overlay pinned to the sidebar edge.
    Floating,
}

impl PanelMode {
    /// Map the external floating flag onto a mode.
    pub fn from_floating(floating: bool) -> Self {
        if floating {
            Self::Floating
        } else {
            Self::Docked
        }
    }

    pub fn is_floating(self) -> bool {
        matches!(self, Self::Floating)
    }

    /// Name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Docked => "Docked",
            Self::Floating => "Floating",
        }
    }
}
