//! Pure core of the panel controller.
//!
//! This module holds the values and decisions that need no surface, no
//! timers and no signals:
//! - Panel modes and their bounded transition history
//! - The stored sidebar record and its copy-on-write updates
//! - Guard predicates and pointer target classification
//! - Geometry helpers

mod config;
mod geometry;
mod guard;
mod history;
mod region;
mod state;

pub use config::{PanelId, SidebarConfig, Side};
pub use geometry::{parse_px, px, Rect};
pub use guard::{Guard, InteractionSnapshot};
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use region::{classify, Region, TargetFacts, WebPanelPrefixes};
pub use state::PanelMode;
