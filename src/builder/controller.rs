//! Builder for constructing floating panel controllers.

use crate::builder::error::BuildError;
use crate::controller::{FloatingPanelController, PanelSignals, Parts};
use crate::host::{NoCooldown, PanelHost, PanelRegistry, ResizeCooldown};
use crate::reactive::Scope;
use crate::scheduler::Scheduler;
use crate::settings::ControllerSettings;
use crate::surface::VisualSurface;
use crate::validation::{collect_violations, validate_settings};
use std::rc::Rc;
use tracing::debug;

/// Builder wiring a controller to its collaborators.
///
/// The surface and the scheduler are required. Without a host, restores are
/// reported as failures; without a cooldown source, the resize cooldown is
/// never active.
#[derive(Default)]
pub struct ControllerBuilder {
    signals: Option<PanelSignals>,
    surface: Option<Rc<dyn VisualSurface>>,
    scheduler: Option<Rc<dyn Scheduler>>,
    host: Option<Rc<dyn PanelHost>>,
    registry: PanelRegistry,
    cooldown: Option<Rc<dyn ResizeCooldown>>,
    settings: ControllerSettings,
    scope: Option<Scope>,
}

impl ControllerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shell state to watch. Fresh signals are created when omitted.
    pub fn signals(mut self, signals: PanelSignals) -> Self {
        self.signals = Some(signals);
        self
    }

    /// Set the visual surface (required).
    pub fn surface(mut self, surface: impl VisualSurface + 'static) -> Self {
        self.surface = Some(Rc::new(surface));
        self
    }

    /// Set the scheduler for deferred actions (required).
    pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Some(Rc::new(scheduler));
        self
    }

    pub fn host(mut self, host: impl PanelHost + 'static) -> Self {
        self.host = Some(Rc::new(host));
        self
    }

    /// Built-in panels whose documents count as part of the panel.
    pub fn registry(mut self, registry: PanelRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn resize_cooldown(mut self, cooldown: impl ResizeCooldown + 'static) -> Self {
        self.cooldown = Some(Rc::new(cooldown));
        self
    }

    pub fn settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Attach the controller's effects to a host-owned scope.
    ///
    /// Disposing the scope stops the controller. Without one, the controller
    /// owns its effects and stops when dropped.
    pub fn scope(mut self, scope: &Scope) -> Self {
        self.scope = Some(scope.clone());
        self
    }

    /// Build the controller.
    /// Returns an error if a required collaborator is missing or the
    /// settings are invalid.
    #[must_use = "the controller stops as soon as it is dropped"]
    pub fn build(self) -> Result<FloatingPanelController, BuildError> {
        let surface = self.surface.ok_or(BuildError::MissingSurface)?;
        let scheduler = self.scheduler.ok_or(BuildError::MissingScheduler)?;

        let check = validate_settings(&self.settings);
        if check.is_failure() {
            return Err(BuildError::InvalidSettings(collect_violations(&check)));
        }

        debug!(
            panel = %self.settings.elements.panel_box,
            has_host = self.host.is_some(),
            builtin_panels = self.registry.len(),
            "building floating panel controller"
        );

        let parts = Parts {
            signals: self.signals.unwrap_or_default(),
            surface,
            scheduler,
            host: self.host,
            registry: self.registry,
            cooldown: self.cooldown.unwrap_or_else(|| Rc::new(NoCooldown)),
            settings: self.settings,
        };
        Ok(FloatingPanelController::assemble(parts, self.scope))
    }
}
