//! Floatdock: behavior of a side panel that floats over the page
//!
//! A browser-style shell can show its side panel docked beside the content or
//! floating above it. Floatdock is the state machine behind the floating
//! mode. It watches a few reactive values owned by the shell and, while the
//! panel floats, keeps it positioned and sized, closes it after the pointer
//! leaves or on a click elsewhere, and re-shows the active panel once it
//! docks again.
//!
//! The pure core (modes, history, guards, classification) needs nothing but
//! values. The imperative shell talks to the host through three traits:
//!
//! - **`VisualSurface`**: the element tree, styles, geometry and listeners
//! - **`Scheduler`**: single-shot deferred callbacks
//! - **`PanelHost`**: panel data and re-showing a panel
//!
//! # Example
//!
//! ```rust
//! use floatdock::core::{PanelId, SidebarConfig};
//! use floatdock::scheduler::ManualScheduler;
//! use floatdock::testing::FakeSurface;
//! use floatdock::{FloatingPanelController, PanelSignals};
//! use std::time::Duration;
//!
//! let surface = FakeSurface::new();
//! surface
//!     .insert("browser", None)
//!     .insert("panel-sidebar-box", Some("browser"))
//!     .insert("page", Some("browser"));
//! surface.resize("browser", 1280.0, 800.0);
//!
//! let scheduler = ManualScheduler::new();
//! let signals = PanelSignals::default();
//! signals.config.set(SidebarConfig { auto_close_floating: true, ..SidebarConfig::default() });
//! signals.selected.set(Some(PanelId::new("bookmarks")));
//!
//! let controller = FloatingPanelController::builder()
//!     .signals(signals.clone())
//!     .surface(surface.clone())
//!     .scheduler(scheduler.clone())
//!     .build()
//!     .unwrap();
//!
//! signals.floating.set(true);
//! surface.pointer_leave("panel-sidebar-box", Some("page"));
//! assert!(controller.has_pending_auto_close());
//!
//! scheduler.advance(Duration::from_millis(500));
//! assert_eq!(signals.selected.get(), None);
//! ```

pub mod builder;
pub mod controller;
pub mod core;
pub mod host;
pub mod reactive;
pub mod scheduler;
pub mod settings;
pub mod surface;
pub mod testing;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, ControllerBuilder};
pub use controller::{FloatingPanelController, PanelSignals, RestoreError};
pub use self::core::{PanelId, PanelMode, SidebarConfig, StateHistory, StateTransition};
pub use host::{HostError, Panel, PanelHost, PanelRegistry, ResizeCooldown};
pub use reactive::{Scope, Signal, Subscription};
pub use scheduler::{ManualScheduler, Scheduler};
pub use settings::ControllerSettings;
pub use surface::VisualSurface;
