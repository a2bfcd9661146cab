//! Stored sidebar configuration and panel identifiers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a panel in the host's panel list.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Which edge of the window the sidebar is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Start,
    End,
}

impl Side {
    /// Value written to the panel's splitter-side attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// The sidebar record kept by the external config store.
///
/// The controller reads it for decisions and writes geometry back by
/// replacing the whole record. Fields the controller does not know about are
/// carried in `extra` so a replacement never drops them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarConfig {
    #[serde(rename = "position_start")]
    pub position_start: bool,
    pub auto_close_floating: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_position_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_position_top: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SidebarConfig {
    pub fn side(&self) -> Side {
        if self.position_start {
            Side::Start
        } else {
            Side::End
        }
    }

    /// Persisted floating size, only when both dimensions are stored.
    pub fn floating_size(&self) -> Option<(f64, f64)> {
        self.floating_width.zip(self.floating_height)
    }

    /// Copy of this record with a new floating size.
    #[must_use]
    pub fn with_floating_size(&self, width: f64, height: f64) -> Self {
        Self {
            floating_width: Some(width),
            floating_height: Some(height),
            ..self.clone()
        }
    }

    /// Copy of this record with a new floating offset.
    #[must_use]
    pub fn with_floating_position(&self, left: f64, top: f64) -> Self {
        Self {
            floating_position_left: Some(left),
            floating_position_top: Some(top),
            ..self.clone()
        }
    }
}
