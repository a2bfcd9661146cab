//! Closing the floating panel on a pointer-down elsewhere in the shell.

use super::Inner;
use crate::core::{classify, TargetFacts};
use crate::surface::{ListenerTarget, NodeId, PointerEvent, PointerEventKind};
use std::rc::Rc;
use tracing::{debug, trace};

impl Inner {
    pub(super) fn start_outside_guard(self: &Rc<Self>) {
        if self.session.outside_listener.get().is_some() {
            return;
        }
        let listener = self.surface.add_pointer_listener(
            ListenerTarget::Document,
            PointerEventKind::Down,
            true,
            self.pointer_handler(Inner::on_outside_pointer_down),
        );
        self.session.outside_listener.set(listener);
    }

    pub(super) fn stop_outside_guard(&self) {
        if let Some(listener) = self.session.outside_listener.take() {
            self.surface.remove_pointer_listener(listener);
        }
    }

    fn on_outside_pointer_down(self: &Rc<Self>, event: &PointerEvent) {
        if !self.outside_gate.check(&self.snapshot()) {
            trace!("outside guard standing down");
            return;
        }

        let region = classify(&self.target_facts(&event.target));
        if region.is_outside() {
            debug!(node = %event.target, "pointer-down outside the panel, closing");
            self.signals.selected.set(None);
        } else {
            trace!(?region, "pointer-down inside a panel region");
        }
    }

    /// Collect what the surface knows about a pointer-down target.
    ///
    /// Embedded content views swallow their own events, so they are matched
    /// through the focused element of the target's document instead.
    fn target_facts(&self, target: &NodeId) -> TargetFacts {
        let elements = &self.settings.elements;
        let inside = |region: NodeId| self.surface.contains(&region, target);
        let active = self.surface.active_element(target);
        let panel = elements.panel_box();

        let active_is_embedded_view = active.as_ref().is_some_and(|active| {
            self.surface
                .descendants_with_class(&panel, &self.settings.embedded_view_class)
                .contains(active)
        });
        let builtin_panel_document = active
            .as_ref()
            .and_then(|active| self.surface.document_uri(active))
            .is_some_and(|uri| self.registry.is_builtin_url(&uri));
        let web_panel_origin = active
            .as_ref()
            .and_then(|active| self.surface.base_uri(active))
            .is_some_and(|uri| self.settings.web_panel_prefixes.matches(&uri));

        TargetFacts {
            inside_panel: inside(panel.clone()),
            active_is_embedded_view,
            inside_selector: inside(elements.selector_box()),
            inside_splitter: inside(elements.splitter()),
            builtin_panel_document,
            web_panel_origin,
        }
    }
}
