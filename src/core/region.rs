//! Pointer target classification for the outside-interaction guard.
//!
//! The controller gathers [`TargetFacts`] from the visual surface and this
//! module turns them into a [`Region`]. Keeping the decision pure makes the
//! precedence between regions testable without a surface.

use serde::{Deserialize, Serialize};

/// Where a pointer-down landed, from the panel's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Inside the panel box itself.
    Panel,
    /// Inside one of the panel's embedded content views. Events from those
    /// do not bubble through the outer tree, so they are matched through the
    /// resolved active element.
    EmbeddedView,
    /// The panel selector strip.
    Selector,
    /// The splitter used to resize the docked sidebar.
    Splitter,
    /// Content surface of a built-in panel.
    BuiltinPanel,
    /// Content surface of a user-added web panel.
    WebPanel,
    /// None of the above: closes the panel.
    Outside,
}

impl Region {
    pub fn is_outside(self) -> bool {
        matches!(self, Self::Outside)
    }
}

/// Everything the guard knows about a pointer-down target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetFacts {
    pub inside_panel: bool,
    pub active_is_embedded_view: bool,
    pub inside_selector: bool,
    pub inside_splitter: bool,
    pub builtin_panel_document: bool,
    pub web_panel_origin: bool,
}

/// Classify a target. Earlier regions win when several match.
pub fn classify(facts: &TargetFacts) -> Region {
    if facts.inside_panel {
        Region::Panel
    } else if facts.active_is_embedded_view {
        Region::EmbeddedView
    } else if facts.inside_selector {
        Region::Selector
    } else if facts.inside_splitter {
        Region::Splitter
    } else if facts.builtin_panel_document {
        Region::BuiltinPanel
    } else if facts.web_panel_origin {
        Region::WebPanel
    } else {
        Region::Outside
    }
}

/// Recognized origins of user-added web panel surfaces.
///
/// A URI belongs to a web panel when it starts with any configured prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebPanelPrefixes(Vec<String>);

impl WebPanelPrefixes {
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self(prefixes.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, uri: &str) -> bool {
        self.0
            .iter()
            .any(|prefix| !prefix.is_empty() && uri.starts_with(prefix.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for WebPanelPrefixes {
    fn default() -> Self {
        Self::new(["chrome://browser/content/browser.xhtml?floorpWebPanelId"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_facts_means_outside() {
        assert_eq!(classify(&TargetFacts::default()), Region::Outside);
        assert!(classify(&TargetFacts::default()).is_outside());
    }

    #[test]
    fn each_fact_alone_is_recognized() {
        let cases = [
            (TargetFacts { inside_panel: true, ..Default::default() }, Region::Panel),
            (
                TargetFacts { active_is_embedded_view: true, ..Default::default() },
                Region::EmbeddedView,
            ),
            (TargetFacts { inside_selector: true, ..Default::default() }, Region::Selector),
            (TargetFacts { inside_splitter: true, ..Default::default() }, Region::Splitter),
            (
                TargetFacts { builtin_panel_document: true, ..Default::default() },
                Region::BuiltinPanel,
            ),
            (TargetFacts { web_panel_origin: true, ..Default::default() }, Region::WebPanel),
        ];

        for (facts, expected) in cases {
            assert_eq!(classify(&facts), expected);
        }
    }

    #[test]
    fn panel_wins_over_allowances() {
        let facts = TargetFacts {
            inside_panel: true,
            web_panel_origin: true,
            ..Default::default()
        };
        assert_eq!(classify(&facts), Region::Panel);
    }

    #[test]
    fn prefixes_match_by_start() {
        let prefixes = WebPanelPrefixes::new(["panel://web?", "moz-extension://"]);

        assert!(prefixes.matches("panel://web?id=3"));
        assert!(prefixes.matches("moz-extension://abc/page.html"));
        assert!(!prefixes.matches("https://panel://web?"));
    }

    #[test]
    fn empty_prefix_never_matches() {
        let prefixes = WebPanelPrefixes::new([""]);
        assert!(!prefixes.matches("anything"));
    }
}
