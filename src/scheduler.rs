//! Deferred single-shot callbacks.
//!
//! The controller defers exactly two actions, the auto-close and the
//! post-exit restore. Both go through a [`Scheduler`] so hosts can plug in
//! their event loop and tests can drive time by hand.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Handle of a pending deferred callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A deferred callback.
pub type Task = Box<dyn FnOnce()>;

/// Host timer facility.
pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Drop a pending task. Returns `false` when it already ran or was
    /// cancelled.
    fn cancel(&self, handle: TimerHandle) -> bool;
}

struct Pending {
    handle: TimerHandle,
    deadline: Duration,
    task: Task,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

/// Deterministic scheduler driven by [`advance`](ManualScheduler::advance).
///
/// Clones share the same virtual clock. Tasks due at the same instant run in
/// scheduling order; a task may schedule or cancel others while running.
///
/// # Example
///
/// ```rust
/// use floatdock::scheduler::{ManualScheduler, Scheduler};
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
///
/// let flag = Rc::clone(&fired);
/// scheduler.schedule(Duration::from_millis(50), Box::new(move || flag.set(true)));
///
/// scheduler.advance(Duration::from_millis(49));
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Move the clock forward, running every task that falls due.
    ///
    /// Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }
        self.inner.borrow_mut().now = target;
        ran
    }

    /// Run everything pending, however far in the future.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let latest = self
                .inner
                .borrow()
                .pending
                .iter()
                .map(|p| p.deadline)
                .max();
            let Some(latest) = latest else {
                return ran;
            };
            let by = latest.saturating_sub(self.now());
            ran += self.advance(by);
        }
    }

    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut inner = self.inner.borrow_mut();
        let index = inner
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= target)
            .min_by_key(|(_, p)| (p.deadline, p.handle.raw()))
            .map(|(i, _)| i)?;
        let pending = inner.pending.remove(index);
        inner.now = pending.deadline;
        Some(pending.task)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = TimerHandle(inner.next_id);
        inner.next_id += 1;
        let deadline = inner.now.saturating_add(delay);
        inner.pending.push(Pending {
            handle,
            deadline,
            task,
        });
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.pending.len();
        inner.pending.retain(|p| p.handle != handle);
        inner.pending.len() != before
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &inner.now)
            .field("pending", &inner.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn tasks_run_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (delay, tag) in [(30, "c"), (10, "a"), (20, "b")] {
            let log = Rc::clone(&order);
            scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(tag)),
            );
        }

        assert_eq!(scheduler.advance(Duration::from_millis(100)), 3);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.now(), Duration::from_millis(100));
    }

    #[test]
    fn cancelled_task_never_runs() {
        let scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(5), Box::new(|| panic!("cancelled")));

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert_eq!(scheduler.advance(Duration::from_millis(10)), 0);
    }

    #[test]
    fn task_may_schedule_follow_up() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let inner_scheduler = scheduler.clone();
        let log = Rc::clone(&hits);
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                log.borrow_mut().push(inner_scheduler.now());
                let log = Rc::clone(&log);
                let clock = inner_scheduler.clone();
                inner_scheduler.schedule(
                    Duration::from_millis(10),
                    Box::new(move || log.borrow_mut().push(clock.now())),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(25));
        assert_eq!(
            *hits.borrow(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
    }

    #[test]
    fn run_all_drains_future_tasks() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_secs(60), Box::new(|| {}));
        scheduler.schedule(Duration::from_millis(1), Box::new(|| {}));

        assert_eq!(scheduler.run_all(), 2);
        assert_eq!(scheduler.pending_count(), 0);
    }
}
