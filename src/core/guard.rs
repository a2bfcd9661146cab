//! Guard predicates for gating pointer-driven reactions.
//!
//! Guards are pure boolean functions over a snapshot of the controller's
//! interaction state. The outside-click guard and the auto-close timer each
//! hold one and consult it before reacting to an event.

use std::fmt;

/// Snapshot of the flags that decide whether pointer events may act.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionSnapshot {
    /// The panel is currently floating.
    pub floating: bool,
    /// A splitter drag elsewhere in the shell just ended.
    pub resize_cooldown: bool,
    /// The panel header is being dragged.
    pub dragging_header: bool,
    /// Auto-close is enabled in the stored configuration.
    pub auto_close_enabled: bool,
}

/// Pure predicate that decides whether a reaction may run.
///
/// # Example
///
/// ```rust
/// use floatdock::core::{Guard, InteractionSnapshot};
///
/// let only_when_floating = Guard::new(|s: &InteractionSnapshot| s.floating);
///
/// let docked = InteractionSnapshot::default();
/// let floating = InteractionSnapshot { floating: true, ..docked };
///
/// assert!(!only_when_floating.check(&docked));
/// assert!(only_when_floating.check(&floating));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows the reaction for this snapshot.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

impl Guard<InteractionSnapshot> {
    /// Outside clicks only close the panel while floating, outside the
    /// resize cooldown and when no header drag is in progress.
    pub fn outside_click() -> Self {
        Guard::new(|s: &InteractionSnapshot| {
            s.floating && !s.resize_cooldown && !s.dragging_header
        })
    }

    /// Auto-close timers may only be armed while floating with the
    /// behavior enabled.
    pub fn auto_close() -> Self {
        Guard::new(|s: &InteractionSnapshot| s.floating && s.auto_close_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floating() -> InteractionSnapshot {
        InteractionSnapshot {
            floating: true,
            ..InteractionSnapshot::default()
        }
    }

    #[test]
    fn outside_click_allows_plain_floating() {
        assert!(Guard::outside_click().check(&floating()));
    }

    #[test]
    fn outside_click_is_suppressed_by_each_flag() {
        let guard = Guard::outside_click();

        assert!(!guard.check(&InteractionSnapshot::default()));
        assert!(!guard.check(&InteractionSnapshot {
            resize_cooldown: true,
            ..floating()
        }));
        assert!(!guard.check(&InteractionSnapshot {
            dragging_header: true,
            ..floating()
        }));
    }

    #[test]
    fn auto_close_requires_enabled_config() {
        let guard = Guard::auto_close();

        assert!(!guard.check(&floating()));
        assert!(guard.check(&InteractionSnapshot {
            auto_close_enabled: true,
            ..floating()
        }));
        assert!(!guard.check(&InteractionSnapshot {
            auto_close_enabled: true,
            ..InteractionSnapshot::default()
        }));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::outside_click();
        let snapshot = floating();

        assert_eq!(guard.check(&snapshot), guard.check(&snapshot));
    }
}
