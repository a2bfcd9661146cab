//! Docked placement, automatic height and floating style cleanup.

use super::Inner;
use crate::core::{parse_px, px};
use crate::validation::{collect_violations, validate_offset, validate_size};
use tracing::{debug, trace, warn};

impl Inner {
    /// Pin the panel to its sidebar edge and restore a persisted size.
    ///
    /// A persisted size counts as an intentional one, so applying it
    /// suspends automatic height for the rest of the session.
    pub(super) fn apply_docked_position(&self) {
        let panel = self.settings.elements.panel_box();
        if !self.surface.exists(&panel) {
            trace!("panel box missing, skipping docked position");
            return;
        }

        self.surface.set_style(&panel, "margin", "0");
        self.surface.set_style(&panel, "position", "absolute");
        self.surface.remove_style(&panel, "right");
        self.surface.remove_style(&panel, "left");

        let Some((width, height)) = self.signals.config.with(|c| c.floating_size()) else {
            return;
        };
        let check = validate_size(width, height);
        if check.is_failure() {
            warn!(
                violations = ?collect_violations(&check),
                "ignoring persisted floating size"
            );
            return;
        }

        self.surface.set_style(&panel, "width", &px(width));
        self.surface.set_style(&panel, "height", &px(height));
        self.session.user_resized_height.set(true);
        debug!(width, height, "applied persisted floating size");
    }

    /// Size the panel to the ambient container minus the margin.
    pub(super) fn apply_auto_height(&self) {
        let panel = self.settings.elements.panel_box();
        let Some(ambient_height) = self.surface.client_height(&self.settings.elements.ambient())
        else {
            trace!("ambient container missing, skipping automatic height");
            return;
        };
        if !self.surface.exists(&panel) {
            return;
        }

        let height = (ambient_height - self.settings.ambient_margin).max(0.0);
        self.surface.set_style(&panel, "height", &px(height));
        trace!(height, "applied automatic height");
    }

    pub(super) fn remove_floating_styles(&self) {
        let panel = self.settings.elements.panel_box();
        if !self.surface.exists(&panel) {
            return;
        }

        for property in ["height", "width", "position", "left", "right", "top", "margin"] {
            self.surface.remove_style(&panel, property);
        }
        self.surface
            .set_style(&panel, "min-width", &px(self.settings.docked_min_width));
    }

    pub(super) fn commit_position(&self) {
        let panel = self.settings.elements.panel_box();
        if !self.surface.exists(&panel) {
            return;
        }

        let offset = |property: &str| {
            self.surface
                .style(&panel, property)
                .as_deref()
                .and_then(parse_px)
                .unwrap_or(0.0)
        };
        let (left, top) = (offset("left"), offset("top"));

        let check = validate_offset(left, top);
        if check.is_failure() {
            warn!(violations = ?collect_violations(&check), "not committing floating position");
            return;
        }

        self.signals
            .config
            .update(|c| c.with_floating_position(left, top));
        debug!(left, top, "committed floating position");
    }
}
