//! The floating panel controller.
//!
//! One controller instance watches the floating flag and wires five
//! cooperating subsystems to the visual surface while the panel floats:
//!
//! - the docking positioner (`docking`)
//! - the resize tracker (`resize`)
//! - the auto-close timer (`auto_close`)
//! - the outside-interaction guard (`outside`)
//! - restore-on-exit sequencing (`restore`)
//!
//! Every registration made on entering floating mode is undone on leaving
//! it, so a settled controller holds either no observers and listeners
//! (docked) or exactly one of each (floating).

mod auto_close;
mod docking;
mod error;
mod outside;
mod resize;
mod restore;

pub use error::RestoreError;

use crate::builder::ControllerBuilder;
use crate::core::{
    Guard, InteractionSnapshot, PanelId, PanelMode, Side, SidebarConfig, StateHistory,
    StateTransition,
};
use crate::host::{PanelHost, PanelRegistry, ResizeCooldown};
use crate::reactive::{Scope, Signal};
use crate::scheduler::{Scheduler, Task, TimerHandle};
use crate::settings::ControllerSettings;
use crate::surface::{ListenerId, ObserverId, PointerEvent, PointerHandler, VisualSurface};
use chrono::Utc;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Attribute on the panel box telling the stylesheet which edge it docks to.
pub const SPLITTER_SIDE_ATTR: &str = "data-floating-splitter-side";

/// The shell state the controller reacts to and writes back.
#[derive(Clone, Debug, Default)]
pub struct PanelSignals {
    /// `true` while the panel is drawn as an overlay.
    pub floating: Signal<bool>,
    pub config: Signal<SidebarConfig>,
    /// Active panel; `None` means the panel is closed.
    pub selected: Signal<Option<PanelId>>,
}

/// Transient per-session state, never persisted.
#[derive(Default)]
struct Session {
    mode: Cell<Option<PanelMode>>,
    number: Cell<u64>,
    user_resized_height: Cell<bool>,
    dragging_header: Cell<bool>,
    auto_close_timer: Cell<Option<TimerHandle>>,
    restore_timer: Cell<Option<TimerHandle>>,
    resize_observer: Cell<Option<ObserverId>>,
    resize_handle_listener: Cell<Option<ListenerId>>,
    commit_listener: Cell<Option<ListenerId>>,
    outside_listener: Cell<Option<ListenerId>>,
    hover_listeners: RefCell<Vec<ListenerId>>,
}

/// Collaborators gathered by the builder.
pub(crate) struct Parts {
    pub signals: PanelSignals,
    pub surface: Rc<dyn VisualSurface>,
    pub scheduler: Rc<dyn Scheduler>,
    pub host: Option<Rc<dyn PanelHost>>,
    pub registry: PanelRegistry,
    pub cooldown: Rc<dyn ResizeCooldown>,
    pub settings: ControllerSettings,
}

struct Inner {
    signals: PanelSignals,
    surface: Rc<dyn VisualSurface>,
    scheduler: Rc<dyn Scheduler>,
    host: Option<Rc<dyn PanelHost>>,
    registry: PanelRegistry,
    cooldown: Rc<dyn ResizeCooldown>,
    settings: ControllerSettings,
    outside_gate: Guard<InteractionSnapshot>,
    auto_close_gate: Guard<InteractionSnapshot>,
    session: Session,
    history: RefCell<StateHistory>,
    last_restore_error: RefCell<Option<RestoreError>>,
}

/// Behavioral state machine of the floating side panel.
///
/// Build one per shell with [`FloatingPanelController::builder`] and keep it
/// alive as long as the shell; its effects stop when it is dropped or when
/// the scope it was built in is disposed.
///
/// # Example
///
/// ```rust
/// use floatdock::testing::FakeSurface;
/// use floatdock::scheduler::ManualScheduler;
/// use floatdock::{FloatingPanelController, PanelSignals};
///
/// let surface = FakeSurface::new();
/// surface.insert("browser", None).insert("panel-sidebar-box", Some("browser"));
/// surface.resize("browser", 1200.0, 800.0);
///
/// let signals = PanelSignals::default();
/// let controller = FloatingPanelController::builder()
///     .signals(signals.clone())
///     .surface(surface.clone())
///     .scheduler(ManualScheduler::new())
///     .build()
///     .unwrap();
///
/// signals.floating.set(true);
/// assert_eq!(surface.style_of("panel-sidebar-box", "height").as_deref(), Some("780px"));
/// assert!(!controller.user_resized_height());
/// ```
#[must_use = "the controller stops as soon as it is dropped"]
pub struct FloatingPanelController {
    inner: Rc<Inner>,
    _root: Option<Scope>,
}

impl FloatingPanelController {
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new()
    }

    pub(crate) fn assemble(parts: Parts, scope: Option<Scope>) -> Self {
        let history = StateHistory::with_limit(parts.settings.history_limit);
        let inner = Rc::new(Inner {
            signals: parts.signals,
            surface: parts.surface,
            scheduler: parts.scheduler,
            host: parts.host,
            registry: parts.registry,
            cooldown: parts.cooldown,
            settings: parts.settings,
            outside_gate: Guard::outside_click(),
            auto_close_gate: Guard::auto_close(),
            session: Session::default(),
            history: RefCell::new(history),
            last_restore_error: RefCell::new(None),
        });

        let root = scope.is_none().then(Scope::new);
        let owner = scope.or_else(|| root.clone()).unwrap_or_default();

        let weak = Rc::downgrade(&inner);
        owner.effect(&inner.signals.floating, move |floating: &bool| {
            if let Some(inner) = weak.upgrade() {
                inner.on_floating_changed(*floating);
            }
        });

        let weak = Rc::downgrade(&inner);
        owner.effect(&inner.signals.config, move |config: &SidebarConfig| {
            if let Some(inner) = weak.upgrade() {
                inner.apply_side(config.side());
            }
        });

        Self { inner, _root: root }
    }

    pub fn signals(&self) -> &PanelSignals {
        &self.inner.signals
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.inner.settings
    }

    /// Mode as last observed by the mode effect.
    pub fn mode(&self) -> PanelMode {
        self.inner.session.mode.get().unwrap_or(PanelMode::Docked)
    }

    /// Number of floating sessions entered so far.
    pub fn session_number(&self) -> u64 {
        self.inner.session.number.get()
    }

    /// Whether automatic height reconciliation is suspended for this session.
    pub fn user_resized_height(&self) -> bool {
        self.inner.session.user_resized_height.get()
    }

    pub fn is_dragging_header(&self) -> bool {
        self.inner.session.dragging_header.get()
    }

    /// Mark a header drag; the outside-click guard stands down meanwhile.
    pub fn set_dragging_header(&self, dragging: bool) {
        self.inner.session.dragging_header.set(dragging);
    }

    /// Arm the auto-close timer unless one is already pending.
    pub fn start_auto_close_timer(&self) {
        self.inner.start_auto_close_timer();
    }

    /// Cancel a pending auto-close. Safe when nothing is pending.
    pub fn clear_auto_close_timer(&self) {
        self.inner.clear_auto_close_timer();
    }

    pub fn has_pending_auto_close(&self) -> bool {
        self.inner.session.auto_close_timer.get().is_some()
    }

    pub fn has_pending_restore(&self) -> bool {
        self.inner.session.restore_timer.get().is_some()
    }

    pub fn apply_docked_position(&self) {
        self.inner.apply_docked_position();
    }

    pub fn apply_auto_height(&self) {
        self.inner.apply_auto_height();
    }

    pub fn remove_floating_styles(&self) {
        self.inner.remove_floating_styles();
    }

    /// Persist the panel's rendered size into the config.
    pub fn commit_current_size(&self) {
        self.inner.commit_current_size();
    }

    /// Persist the panel's `left`/`top` offsets into the config.
    pub fn commit_position(&self) {
        self.inner.commit_position();
    }

    pub fn history(&self) -> StateHistory {
        self.inner.history.borrow().clone()
    }

    pub fn last_restore_error(&self) -> Option<RestoreError> {
        self.inner.last_restore_error.borrow().clone()
    }

    pub fn take_last_restore_error(&self) -> Option<RestoreError> {
        self.inner.last_restore_error.borrow_mut().take()
    }
}

impl fmt::Debug for FloatingPanelController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = &self.inner.session;
        f.debug_struct("FloatingPanelController")
            .field("mode", &self.mode())
            .field("session", &session.number.get())
            .field("user_resized_height", &session.user_resized_height.get())
            .field("dragging_header", &session.dragging_header.get())
            .field("auto_close_pending", &session.auto_close_timer.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn on_floating_changed(self: &Rc<Self>, floating: bool) {
        let mode = PanelMode::from_floating(floating);
        let previous = self.session.mode.replace(Some(mode));
        if previous == Some(mode) {
            trace!(mode = mode.name(), "mode unchanged");
            return;
        }

        match (previous, mode) {
            (_, PanelMode::Floating) => self.enter_floating(),
            (Some(PanelMode::Floating), PanelMode::Docked) => self.exit_floating(),
            (_, PanelMode::Docked) => self.remove_floating_styles(),
        }

        if let Some(from) = previous {
            self.record_transition(from, mode);
        }
    }

    fn enter_floating(self: &Rc<Self>) {
        let session = self.session.number.get() + 1;
        self.session.number.set(session);
        debug!(session, "entering floating mode");

        if !self.session.user_resized_height.get() {
            self.apply_auto_height();
        }
        self.start_resize_tracker();
        self.apply_docked_position();
        self.start_auto_close();
        self.start_outside_guard();
    }

    fn exit_floating(self: &Rc<Self>) {
        debug!(session = self.session.number.get(), "leaving floating mode");

        self.remove_floating_styles();
        self.stop_resize_tracker();
        self.stop_outside_guard();
        self.stop_auto_close();
        self.session.user_resized_height.set(false);
        self.restore_active_panel();
    }

    fn record_transition(&self, from: PanelMode, to: PanelMode) {
        let transition = StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            session: self.session.number.get(),
        };
        self.history.borrow_mut().push(transition);
    }

    fn apply_side(&self, side: Side) {
        let panel = self.settings.elements.panel_box();
        self.surface
            .set_attribute(&panel, SPLITTER_SIDE_ATTR, side.as_attr());
    }

    fn snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot {
            floating: self.signals.floating.get(),
            resize_cooldown: self.cooldown.is_active(),
            dragging_header: self.session.dragging_header.get(),
            auto_close_enabled: self.signals.config.with(|c| c.auto_close_floating),
        }
    }

    /// Wrap a method as a surface listener that does nothing once the
    /// controller is gone.
    fn pointer_handler(self: &Rc<Self>, f: fn(&Rc<Inner>, &PointerEvent)) -> PointerHandler {
        let weak = Rc::downgrade(self);
        Rc::new(move |event: &PointerEvent| {
            if let Some(inner) = weak.upgrade() {
                f(&inner, event);
            }
        })
    }

    fn deferred(self: &Rc<Self>, f: impl FnOnce(&Rc<Inner>) + 'static) -> Task {
        let weak = Rc::downgrade(self);
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                f(&inner);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::surface::PointerEventKind;
    use crate::testing::FakeSurface;

    fn shell() -> (FakeSurface, ManualScheduler, PanelSignals, FloatingPanelController) {
        let surface = FakeSurface::new();
        surface
            .insert("browser", None)
            .insert("panel-sidebar-box", Some("browser"))
            .insert("panel-sidebar-select-box", Some("browser"));
        surface.resize("browser", 1200.0, 800.0);

        let scheduler = ManualScheduler::new();
        let signals = PanelSignals::default();
        let controller = FloatingPanelController::builder()
            .signals(signals.clone())
            .surface(surface.clone())
            .scheduler(scheduler.clone())
            .build()
            .unwrap();
        (surface, scheduler, signals, controller)
    }

    #[test]
    fn starts_docked_without_registrations() {
        let (surface, _, _, controller) = shell();

        assert_eq!(controller.mode(), PanelMode::Docked);
        assert_eq!(surface.observer_count(), 0);
        assert_eq!(surface.total_listeners(), 0);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn initial_docked_run_clears_floating_styles() {
        let (surface, _, _, _controller) = shell();
        assert_eq!(
            surface.style_of("panel-sidebar-box", "min-width").as_deref(),
            Some("225px")
        );
    }

    #[test]
    fn entering_and_leaving_is_recorded() {
        let (_, _, signals, controller) = shell();

        signals.floating.set(true);
        signals.floating.set(false);

        let history = controller.history();
        assert_eq!(
            history.get_path(),
            vec![PanelMode::Docked, PanelMode::Floating, PanelMode::Docked]
        );
        assert!(history.transitions().all(|t| t.session == 1));
        assert_eq!(controller.session_number(), 1);
    }

    #[test]
    fn history_keeps_only_latest_transitions() {
        let surface = FakeSurface::new();
        surface.insert("browser", None).insert("panel-sidebar-box", Some("browser"));
        let signals = PanelSignals::default();
        let settings = ControllerSettings {
            history_limit: 4,
            ..ControllerSettings::default()
        };
        let controller = FloatingPanelController::builder()
            .signals(signals.clone())
            .surface(surface.clone())
            .scheduler(ManualScheduler::new())
            .settings(settings)
            .build()
            .unwrap();

        for _ in 0..50 {
            signals.floating.set(true);
            signals.floating.set(false);
        }

        let history = controller.history();
        assert_eq!(history.len(), 4);
        assert_eq!(controller.session_number(), 50);
        let sessions: Vec<u64> = history.transitions().map(|t| t.session).collect();
        assert_eq!(sessions, vec![49, 49, 50, 50]);
    }

    #[test]
    fn host_veto_before_controller_keeps_panel_docked() {
        let surface = FakeSurface::new();
        surface.insert("browser", None).insert("panel-sidebar-box", Some("browser"));
        surface.resize("browser", 1200.0, 800.0);
        let signals = PanelSignals::default();

        let veto = signals.floating.clone();
        let _veto = signals.floating.subscribe(move |floating| {
            if *floating {
                veto.set(false);
            }
        });
        let controller = FloatingPanelController::builder()
            .signals(signals.clone())
            .surface(surface.clone())
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();

        signals.floating.set(true);

        assert!(!signals.floating.get());
        assert_eq!(controller.mode(), PanelMode::Docked);
        assert_eq!(surface.observer_count(), 0);
        assert_eq!(surface.total_listeners(), 0);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn side_attribute_follows_config() {
        let (surface, _, signals, _controller) = shell();
        assert_eq!(
            surface.attribute("panel-sidebar-box", SPLITTER_SIDE_ATTR).as_deref(),
            Some("end")
        );

        signals.config.update(|c| SidebarConfig {
            position_start: true,
            ..c.clone()
        });
        assert_eq!(
            surface.attribute("panel-sidebar-box", SPLITTER_SIDE_ATTR).as_deref(),
            Some("start")
        );
    }

    #[test]
    fn floating_registers_one_of_each() {
        let (surface, _, signals, _controller) = shell();

        signals.floating.set(true);

        assert_eq!(surface.observer_count(), 1);
        assert_eq!(
            surface.listener_count_on(&crate::surface::ListenerTarget::Document, PointerEventKind::Down),
            1
        );
    }

    #[test]
    fn dropping_controller_stops_effects() {
        let (surface, _, signals, controller) = shell();
        drop(controller);

        signals.floating.set(true);
        assert_eq!(surface.observer_count(), 0);
        assert_eq!(signals.floating.subscriber_count(), 0);
    }

    #[test]
    fn host_scope_owns_effects() {
        let surface = FakeSurface::new();
        surface.insert("browser", None).insert("panel-sidebar-box", Some("browser"));
        let scope = Scope::new();
        let signals = PanelSignals::default();

        let _controller = FloatingPanelController::builder()
            .signals(signals.clone())
            .surface(surface.clone())
            .scheduler(ManualScheduler::new())
            .scope(&scope)
            .build()
            .unwrap();
        assert_eq!(scope.len(), 2);

        scope.dispose();
        signals.floating.set(true);
        assert_eq!(surface.observer_count(), 0);
    }
}
