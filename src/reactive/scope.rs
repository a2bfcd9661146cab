//! Ownership scopes for effects.

use super::signal::{Signal, Subscription};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct ScopeInner {
    subscriptions: Vec<Subscription>,
    disposed: bool,
}

/// Owns a group of effects and disposes them together.
///
/// Clones share the same scope. A controller built inside a host scope ties
/// its effects to that scope; without one it roots its own.
///
/// # Example
///
/// ```rust
/// use floatdock::reactive::{Scope, Signal};
///
/// let scope = Scope::new();
/// let mode = Signal::new(false);
///
/// scope.effect(&mode, |floating| println!("floating = {floating}"));
/// assert_eq!(mode.subscriber_count(), 1);
///
/// scope.dispose();
/// assert_eq!(mode.subscriber_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct Scope {
    inner: Rc<RefCell<ScopeInner>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the current value now and again after every change.
    pub fn effect<T, F>(&self, signal: &Signal<T>, f: F)
    where
        T: Clone + PartialEq + 'static,
        F: Fn(&T) + 'static,
    {
        if self.is_disposed() {
            return;
        }
        let current = signal.get();
        f(&current);
        self.adopt(signal.subscribe(f));
    }

    /// Take ownership of a subscription. A disposed scope drops it at once.
    pub fn adopt(&self, subscription: Subscription) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            drop(inner);
            subscription.unsubscribe();
        } else {
            inner.subscriptions.push(subscription);
        }
    }

    /// Unsubscribe every owned effect. Later effects are ignored.
    pub fn dispose(&self) {
        let subscriptions = {
            let mut inner = self.inner.borrow_mut();
            inner.disposed = true;
            std::mem::take(&mut inner.subscriptions)
        };
        drop(subscriptions);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Scope")
            .field("effects", &inner.subscriptions.len())
            .field("disposed", &inner.disposed)
            .finish()
    }
}
