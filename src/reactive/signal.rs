//! Observable values with synchronous subscribers.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Callback<T>)>>,
}

struct SignalInner<T> {
    value: RefCell<T>,
    // Bumped on every change; a notification pass stops once it is stale.
    version: Cell<u64>,
    subscribers: Rc<Subscribers<T>>,
}

/// A shared value that notifies subscribers when it changes.
///
/// Clones share the same value. `set` only notifies when the new value
/// differs from the current one. When a subscriber writes the signal while
/// being notified, the remaining subscribers only see the newer value.
///
/// # Example
///
/// ```rust
/// use floatdock::reactive::Signal;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let floating = Signal::new(false);
/// let seen = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&seen);
/// let _sub = floating.subscribe(move |_| counter.set(counter.get() + 1));
///
/// assert!(floating.set(true));
/// assert!(!floating.set(true));
/// assert_eq!(seen.get(), 1);
/// ```
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.entries.borrow().len())
            .finish()
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                value: RefCell::new(value),
                version: Cell::new(0),
                subscribers: Rc::new(Subscribers {
                    next_id: Cell::new(0),
                    entries: RefCell::new(Vec::new()),
                }),
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value. Returns `true` when subscribers were notified.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        let version = self.inner.version.get() + 1;
        self.inner.version.set(version);
        self.notify(&value, version);
        true
    }

    /// Replace the value with one derived from the current snapshot.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = self.with(f);
        self.set(next)
    }

    /// Register a callback invoked after every change.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let subscribers = &self.inner.subscribers;
        let id = subscribers.next_id.get();
        subscribers.next_id.set(id + 1);
        let callback: Callback<T> = Rc::new(callback);
        subscribers.entries.borrow_mut().push((id, callback));

        let weak: Weak<Subscribers<T>> = Rc::downgrade(subscribers);
        Subscription::new(move || {
            if let Some(subscribers) = weak.upgrade() {
                subscribers.entries.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.entries.borrow().len()
    }

    // Subscribers run against a snapshot of the list so they may subscribe,
    // unsubscribe or write signals while being notified. A nested write has
    // already notified everyone with the newer value, so this pass ends.
    fn notify(&self, value: &T, version: u64) {
        let callbacks: Vec<Callback<T>> = self
            .inner
            .subscribers
            .entries
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            if self.inner.version.get() != version {
                return;
            }
            callback(value);
        }
    }
}

/// Handle that keeps a signal callback registered.
///
/// Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
