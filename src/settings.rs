//! Controller settings.
//!
//! Everything the controller needs to know about the host's element tree and
//! its timing constants. Defaults match the stock browser chrome; hosts can
//! override any subset from JSON.

use crate::core::{WebPanelPrefixes, DEFAULT_HISTORY_LIMIT};
use crate::surface::NodeId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ids of the named elements the controller looks up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub panel_box: String,
    pub selector_box: String,
    pub splitter: String,
    /// Container whose size drives automatic panel height.
    pub ambient: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            panel_box: "panel-sidebar-box".to_string(),
            selector_box: "panel-sidebar-select-box".to_string(),
            splitter: "panel-sidebar-splitter".to_string(),
            ambient: "browser".to_string(),
        }
    }
}

impl ElementIds {
    pub fn panel_box(&self) -> NodeId {
        NodeId::new(self.panel_box.as_str())
    }

    pub fn selector_box(&self) -> NodeId {
        NodeId::new(self.selector_box.as_str())
    }

    pub fn splitter(&self) -> NodeId {
        NodeId::new(self.splitter.as_str())
    }

    pub fn ambient(&self) -> NodeId {
        NodeId::new(self.ambient.as_str())
    }
}

/// Tunables of the floating panel controller.
///
/// # Example
///
/// ```rust
/// use floatdock::settings::ControllerSettings;
/// use std::time::Duration;
///
/// let settings = ControllerSettings::from_json(r#"{ "auto_close_delay_ms": 800 }"#).unwrap();
/// assert_eq!(settings.auto_close_delay(), Duration::from_millis(800));
/// assert_eq!(settings.ambient_margin, 20.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    pub elements: ElementIds,
    /// Classes that mark resize handles on the panel edge and corner.
    pub resize_handle_classes: Vec<String>,
    /// Class of the panel's embedded content views.
    pub embedded_view_class: String,
    /// Gap kept between the ambient container height and the panel height.
    pub ambient_margin: f64,
    /// `min-width` restored when the panel docks again.
    pub docked_min_width: f64,
    pub auto_close_delay_ms: u64,
    /// Delay between deselecting and reselecting a panel after docking.
    pub restore_delay_ms: u64,
    pub web_panel_prefixes: WebPanelPrefixes,
    /// Mode transitions kept in the controller's history.
    pub history_limit: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            resize_handle_classes: vec![
                "floating-splitter-side".to_string(),
                "floating-splitter-vertical".to_string(),
                "floating-splitter-corner".to_string(),
            ],
            embedded_view_class: "sidebar-panel-browser".to_string(),
            ambient_margin: 20.0,
            docked_min_width: 225.0,
            auto_close_delay_ms: 500,
            restore_delay_ms: 50,
            web_panel_prefixes: WebPanelPrefixes::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ControllerSettings {
    /// Parse settings, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn auto_close_delay(&self) -> Duration {
        Duration::from_millis(self.auto_close_delay_ms)
    }

    pub fn restore_delay(&self) -> Duration {
        Duration::from_millis(self.restore_delay_ms)
    }
}
