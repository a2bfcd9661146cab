//! Closing the floating panel after the pointer wanders off.

use super::Inner;
use crate::surface::{ListenerTarget, PointerEvent, PointerEventKind};
use std::rc::Rc;
use tracing::{debug, trace};

impl Inner {
    /// Register hover listeners on the panel and the selector.
    ///
    /// Only when auto-close is enabled at floating entry; flipping the
    /// config mid-session takes effect with the next session.
    pub(super) fn start_auto_close(self: &Rc<Self>) {
        if !self.signals.config.with(|c| c.auto_close_floating) {
            return;
        }
        if !self.session.hover_listeners.borrow().is_empty() {
            return;
        }
        let panel = self.settings.elements.panel_box();
        if !self.surface.exists(&panel) {
            trace!("auto-close inert, panel box missing");
            return;
        }

        let mut listeners = Vec::with_capacity(4);
        for element in [panel, self.settings.elements.selector_box()] {
            let enter = self.surface.add_pointer_listener(
                ListenerTarget::Element(element.clone()),
                PointerEventKind::Enter,
                false,
                self.pointer_handler(Inner::on_hover_enter),
            );
            let leave = self.surface.add_pointer_listener(
                ListenerTarget::Element(element),
                PointerEventKind::Leave,
                false,
                self.pointer_handler(Inner::on_hover_leave),
            );
            listeners.extend(enter.into_iter().chain(leave));
        }
        *self.session.hover_listeners.borrow_mut() = listeners;
    }

    pub(super) fn stop_auto_close(&self) {
        self.clear_auto_close_timer();
        let listeners = std::mem::take(&mut *self.session.hover_listeners.borrow_mut());
        for listener in listeners {
            self.surface.remove_pointer_listener(listener);
        }
    }

    fn on_hover_enter(self: &Rc<Self>, _event: &PointerEvent) {
        self.clear_auto_close_timer();
    }

    fn on_hover_leave(self: &Rc<Self>, event: &PointerEvent) {
        let still_inside = event.related_target.as_ref().is_some_and(|to| {
            [
                self.settings.elements.panel_box(),
                self.settings.elements.selector_box(),
            ]
            .iter()
            .any(|region| self.surface.contains(region, to))
        });
        if !still_inside {
            self.start_auto_close_timer();
        }
    }

    pub(super) fn start_auto_close_timer(self: &Rc<Self>) {
        if self.session.auto_close_timer.get().is_some() {
            return;
        }
        if !self.auto_close_gate.check(&self.snapshot()) {
            trace!("auto-close not armed, panel docked or auto-close disabled");
            return;
        }

        let delay = self.settings.auto_close_delay();
        let handle = self
            .scheduler
            .schedule(delay, self.deferred(|inner| inner.auto_close_elapsed()));
        self.session.auto_close_timer.set(Some(handle));
        debug!(delay_ms = delay.as_millis() as u64, "auto-close armed");
    }

    pub(super) fn clear_auto_close_timer(&self) {
        if let Some(handle) = self.session.auto_close_timer.take() {
            self.scheduler.cancel(handle);
            trace!("auto-close cancelled");
        }
    }

    fn auto_close_elapsed(&self) {
        self.session.auto_close_timer.set(None);
        debug!("auto-close elapsed, closing panel");
        self.signals.selected.set(None);
    }
}
