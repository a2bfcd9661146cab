//! Collaborators supplied by the hosting shell.

use crate::core::PanelId;
use crate::reactive::Signal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;
use thiserror::Error;

/// Host-side record of a panel, as returned by [`PanelHost::panel_data`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    pub url: Option<String>,
}

/// Failure reported by the panel host.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("panel host failed: {0}")]
pub struct HostError(pub String);

/// The part of the shell that owns panel data and can (re)show a panel.
pub trait PanelHost {
    fn panel_data(&self, id: &PanelId) -> Option<Panel>;
    fn show_panel(&self, panel: &Panel) -> Result<(), HostError>;
}

impl<T: PanelHost + ?Sized> PanelHost for Rc<T> {
    fn panel_data(&self, id: &PanelId) -> Option<Panel> {
        (**self).panel_data(id)
    }

    fn show_panel(&self, panel: &Panel) -> Result<(), HostError> {
        (**self).show_panel(panel)
    }
}

/// Built-in panels and the document URL each one renders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRegistry {
    builtin: BTreeMap<PanelId, String>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_panel(mut self, id: impl Into<PanelId>, url: impl Into<String>) -> Self {
        self.builtin.insert(id.into(), url.into());
        self
    }

    pub fn builtin_url(&self, id: &PanelId) -> Option<&str> {
        self.builtin.get(id).map(String::as_str)
    }

    /// `true` when `uri` is the document of a built-in panel.
    pub fn is_builtin_url(&self, uri: &str) -> bool {
        self.builtin.values().any(|url| url == uri)
    }

    pub fn len(&self) -> usize {
        self.builtin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builtin.is_empty()
    }
}

/// Briefly `true` after a splitter drag elsewhere in the shell.
pub trait ResizeCooldown {
    fn is_active(&self) -> bool;
}

impl<F> ResizeCooldown for F
where
    F: Fn() -> bool,
{
    fn is_active(&self) -> bool {
        self()
    }
}

impl ResizeCooldown for Signal<bool> {
    fn is_active(&self) -> bool {
        self.get()
    }
}

/// Cooldown that is never active.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCooldown;

impl ResizeCooldown for NoCooldown {
    fn is_active(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_matches_exact_urls() {
        let registry = PanelRegistry::new()
            .with_panel("bookmarks", "chrome://browser/content/places/bookmarksSidebar.xhtml")
            .with_panel("history", "chrome://browser/content/places/historySidebar.xhtml");

        assert_eq!(registry.len(), 2);
        assert!(registry.is_builtin_url("chrome://browser/content/places/historySidebar.xhtml"));
        assert!(!registry.is_builtin_url("chrome://browser/content/places/"));
        assert_eq!(
            registry.builtin_url(&PanelId::new("bookmarks")),
            Some("chrome://browser/content/places/bookmarksSidebar.xhtml")
        );
    }

    #[test]
    fn closures_and_signals_are_cooldowns() {
        let signal = Signal::new(false);
        assert!(!signal.is_active());
        signal.set(true);
        assert!(signal.is_active());

        let always = || true;
        assert!(always.is_active());
        assert!(!NoCooldown.is_active());
    }
}
