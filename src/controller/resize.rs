//! Automatic height reconciliation and manual resize detection.

use super::Inner;
use crate::surface::{ListenerTarget, PointerEvent, PointerEventKind, ResizeEntry};
use crate::validation::{collect_violations, validate_size};
use std::rc::Rc;
use tracing::{debug, trace, warn};

impl Inner {
    pub(super) fn start_resize_tracker(self: &Rc<Self>) {
        if self.session.resize_observer.get().is_some() {
            return;
        }
        let ambient = self.settings.elements.ambient();
        let panel = self.settings.elements.panel_box();
        if !self.surface.exists(&ambient) || !self.surface.exists(&panel) {
            trace!("resize tracker inert, ambient container or panel box missing");
            return;
        }

        let weak = Rc::downgrade(self);
        let observer = self.surface.observe_resize(
            &ambient,
            Rc::new(move |entry: &ResizeEntry| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_ambient_resized(entry);
                }
            }),
        );
        self.session.resize_observer.set(observer);

        let listener = self.surface.add_pointer_listener(
            ListenerTarget::Element(panel),
            PointerEventKind::Down,
            false,
            self.pointer_handler(Inner::on_panel_pointer_down),
        );
        self.session.resize_handle_listener.set(listener);
    }

    pub(super) fn stop_resize_tracker(&self) {
        if let Some(observer) = self.session.resize_observer.take() {
            self.surface.disconnect_observer(observer);
        }
        for slot in [
            &self.session.resize_handle_listener,
            &self.session.commit_listener,
        ] {
            if let Some(listener) = slot.take() {
                self.surface.remove_pointer_listener(listener);
            }
        }
    }

    fn on_ambient_resized(&self, entry: &ResizeEntry) {
        if entry.target != self.settings.elements.ambient() {
            return;
        }
        if !self.signals.floating.get() || self.session.user_resized_height.get() {
            return;
        }
        self.apply_auto_height();
    }

    fn on_panel_pointer_down(self: &Rc<Self>, event: &PointerEvent) {
        let on_handle = self
            .settings
            .resize_handle_classes
            .iter()
            .any(|class| self.surface.has_class(&event.target, class));
        if !on_handle {
            return;
        }

        self.session.user_resized_height.set(true);
        if self.session.commit_listener.get().is_some() {
            return;
        }
        let listener = self.surface.add_pointer_listener(
            ListenerTarget::Document,
            PointerEventKind::Up,
            false,
            self.pointer_handler(Inner::on_resize_released),
        );
        self.session.commit_listener.set(listener);
        trace!(handle = %event.target, "resize gesture started");
    }

    fn on_resize_released(self: &Rc<Self>, _event: &PointerEvent) {
        if let Some(listener) = self.session.commit_listener.take() {
            self.surface.remove_pointer_listener(listener);
        }
        self.commit_current_size();
    }

    pub(super) fn commit_current_size(&self) {
        let Some(bounds) = self
            .surface
            .bounding_box(&self.settings.elements.panel_box())
        else {
            return;
        };

        let check = validate_size(bounds.width, bounds.height);
        if check.is_failure() {
            warn!(violations = ?collect_violations(&check), "not committing floating size");
            return;
        }

        self.signals
            .config
            .update(|c| c.with_floating_size(bounds.width, bounds.height));
        debug!(width = bounds.width, height = bounds.height, "committed floating size");
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Rect, SidebarConfig};
    use crate::scheduler::ManualScheduler;
    use crate::surface::{ListenerTarget, PointerEventKind};
    use crate::testing::FakeSurface;
    use crate::{FloatingPanelController, PanelSignals};

    const PANEL: &str = "panel-sidebar-box";
    const HANDLE: &str = "corner-handle";

    fn shell() -> (FakeSurface, PanelSignals, FloatingPanelController) {
        let surface = FakeSurface::new();
        surface
            .insert("browser", None)
            .insert(PANEL, Some("browser"))
            .insert("panel-body", Some(PANEL))
            .insert(HANDLE, Some(PANEL))
            .add_class(HANDLE, "floating-splitter-corner");
        surface.resize("browser", 1200.0, 800.0);

        let signals = PanelSignals::default();
        let controller = FloatingPanelController::builder()
            .signals(signals.clone())
            .surface(surface.clone())
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();
        (surface, signals, controller)
    }

    #[test]
    fn ambient_resize_reconciles_height() {
        let (surface, signals, _controller) = shell();

        signals.floating.set(true);
        assert_eq!(surface.style_of(PANEL, "height").as_deref(), Some("780px"));

        surface.resize("browser", 1200.0, 600.0);
        assert_eq!(surface.style_of(PANEL, "height").as_deref(), Some("580px"));
    }

    #[test]
    fn docked_panel_ignores_ambient_resize() {
        let (surface, signals, _controller) = shell();
        signals.floating.set(true);
        signals.floating.set(false);

        surface.resize("browser", 1200.0, 600.0);
        assert_eq!(surface.style_of(PANEL, "height"), None);
    }

    #[test]
    fn handle_drag_commits_size() {
        let (surface, signals, controller) = shell();
        signals.config.set(SidebarConfig {
            auto_close_floating: false,
            position_start: true,
            ..SidebarConfig::default()
        });
        signals.floating.set(true);

        surface.pointer_down(HANDLE);
        assert!(controller.user_resized_height());
        surface.set_rect(PANEL, Rect::new(10.0, 10.0, 320.0, 480.0));
        surface.pointer_up("panel-body");

        let config = signals.config.get();
        assert_eq!(config.floating_width, Some(320.0));
        assert_eq!(config.floating_height, Some(480.0));
        assert!(!config.auto_close_floating);
        assert!(config.position_start);
        assert_eq!(config.floating_position_left, None);
    }

    #[test]
    fn user_resize_suspends_reconciliation() {
        let (surface, signals, _controller) = shell();
        signals.floating.set(true);

        surface.pointer_down(HANDLE);
        surface.resize("browser", 1200.0, 600.0);
        assert_eq!(surface.style_of(PANEL, "height").as_deref(), Some("780px"));
    }

    #[test]
    fn commit_listener_is_one_shot() {
        let (surface, signals, _controller) = shell();
        signals.floating.set(true);
        let up_listeners = || surface.listener_count_on(&ListenerTarget::Document, PointerEventKind::Up);

        surface.pointer_down(HANDLE);
        surface.pointer_down(HANDLE);
        assert_eq!(up_listeners(), 1);

        surface.pointer_up(HANDLE);
        assert_eq!(up_listeners(), 0);
    }

    #[test]
    fn plain_click_is_not_a_resize() {
        let (surface, signals, controller) = shell();
        signals.floating.set(true);

        surface.pointer_down("panel-body");
        assert!(!controller.user_resized_height());
        assert_eq!(
            surface.listener_count_on(&ListenerTarget::Document, PointerEventKind::Up),
            0
        );
    }

    #[test]
    fn degenerate_bounds_are_not_committed() {
        let (surface, signals, controller) = shell();
        signals.floating.set(true);
        surface.set_rect(PANEL, Rect::new(0.0, 0.0, 0.0, 480.0));

        controller.commit_current_size();
        assert_eq!(signals.config.get(), SidebarConfig::default());
    }

    #[test]
    fn missing_ambient_leaves_tracker_inert() {
        let surface = FakeSurface::new();
        surface.insert(PANEL, None).insert(HANDLE, Some(PANEL));
        surface.add_class(HANDLE, "floating-splitter-side");
        let signals = PanelSignals::default();
        let controller = FloatingPanelController::builder()
            .signals(signals.clone())
            .surface(surface.clone())
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();

        signals.floating.set(true);
        surface.pointer_down(HANDLE);

        assert_eq!(surface.observer_count(), 0);
        assert!(!controller.user_resized_height());
    }
}
