//! Mode transition history.
//!
//! Every floating/docked transition the controller performs is appended to a
//! bounded history so hosts can inspect how the panel got where it is. Only
//! the most recent transitions are kept; the oldest are evicted first.

use super::state::PanelMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Transitions kept when no limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// Record of a single mode transition.
///
/// # Example
///
/// ```rust
/// use floatdock::core::{PanelMode, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: PanelMode::Docked,
///     to: PanelMode::Floating,
///     timestamp: Utc::now(),
///     session: 1,
/// };
/// assert_eq!(transition.session, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The mode being transitioned from
    pub from: PanelMode,
    /// The mode being transitioned to
    pub to: PanelMode,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// Floating session the transition belongs to (entry and exit share it)
    pub session: u64,
}

/// Ordered, bounded history of transitions.
///
/// `push` appends in place and evicts the oldest entry once the limit is
/// reached. `record` is the pure variant and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use floatdock::core::{PanelMode, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_limit(2);
/// for (from, to) in [
///     (PanelMode::Docked, PanelMode::Floating),
///     (PanelMode::Floating, PanelMode::Docked),
///     (PanelMode::Docked, PanelMode::Floating),
/// ] {
///     history.push(StateTransition { from, to, timestamp: Utc::now(), session: 1 });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![PanelMode::Floating, PanelMode::Docked, PanelMode::Floating]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    #[serde(default = "default_limit")]
    limit: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHistory {
    /// Create a new empty history keeping [`DEFAULT_HISTORY_LIMIT`] entries.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a new empty history keeping at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn push(&mut self, transition: StateTransition) {
        while self.transitions.len() >= self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Record a transition, returning a new history.
    #[must_use]
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut next = self.clone();
        next.push(transition);
        next
    }

    /// Get the path of modes traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<PanelMode> {
        self.transitions
            .front()
            .map(|first| first.from)
            .into_iter()
            .chain(self.transitions.iter().map(|t| t.to))
            .collect()
    }

    /// Time between the first and the last retained transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of retained transitions that entered floating mode.
    pub fn overlay_entries(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.to.is_floating() && !t.from.is_floating())
            .count()
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
