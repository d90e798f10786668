//! `Action`: the work an event performs when it fires.
//!
//! An action takes no arguments and returns nothing the scheduler looks at.
//! Any `FnMut()` closure is an action.  For the common case of calling a
//! method on a scene or controller object that may be destroyed before the
//! event fires, bind through [`weak`]: the receiver is held by a `Weak`
//! reference and resolved at fire time, so a dropped receiver turns the
//! call into a silent no-op.
//!
//! Actions compose: `a.then(b)` runs `a` and then `b` on every fire.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Zero-argument work bound to a scheduler event.
///
/// # Contract
///
/// - Must not panic for a receiver that has gone away; do nothing instead.
/// - Runs synchronously inside `Scheduler::update` / `Scheduler::stop`.
pub trait Action {
    fn perform(&mut self);
}

impl<F: FnMut()> Action for F {
    #[inline]
    fn perform(&mut self) {
        (*self)()
    }
}

// ── No-op ─────────────────────────────────────────────────────────────────────

/// An action that does nothing.
pub struct NoAction;

impl Action for NoAction {
    #[inline]
    fn perform(&mut self) {}
}

// ── Weak receiver binding ─────────────────────────────────────────────────────

/// Calls `method` on a receiver held by weak reference.
///
/// The call is skipped when the receiver has been dropped, or when it is
/// already mutably borrowed (an action firing from inside a method of the
/// same receiver).
pub struct WeakAction<T, F> {
    target: Weak<RefCell<T>>,
    method: F,
}

impl<T, F: FnMut(&mut T)> WeakAction<T, F> {
    pub fn new(target: &Rc<RefCell<T>>, method: F) -> Self {
        Self { target: Rc::downgrade(target), method }
    }

    /// `true` while the receiver is still alive.
    pub fn is_bound(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl<T, F: FnMut(&mut T)> Action for WeakAction<T, F> {
    fn perform(&mut self) {
        let Some(target) = self.target.upgrade() else {
            return;
        };
        let Ok(mut receiver) = target.try_borrow_mut() else {
            return;
        };
        (self.method)(&mut *receiver);
    }
}

/// Bind `method` to `target` without keeping `target` alive.
///
/// ```rust,ignore
/// let scene = Rc::new(RefCell::new(Scene::default()));
/// scheduler.every(0.5).bind(weak(&scene, Scene::spawn_sprite)).commit()?;
/// ```
pub fn weak<T, F: FnMut(&mut T)>(target: &Rc<RefCell<T>>, method: F) -> WeakAction<T, F> {
    WeakAction::new(target, method)
}

// ── Chained action ────────────────────────────────────────────────────────────

/// Runs two actions in sequence.  Construct with `first.then(second)`.
pub struct Chained<A: Action, B: Action> {
    first:  A,
    second: B,
}

impl<A: Action, B: Action> Action for Chained<A, B> {
    fn perform(&mut self) {
        self.first.perform();
        self.second.perform();
    }
}

/// Extension trait that adds `.then(other)` to any `Action`.
pub trait ActionExt: Action + Sized {
    fn then<B: Action>(self, other: B) -> Chained<Self, B> {
        Chained { first: self, second: other }
    }
}

impl<A: Action + Sized> ActionExt for A {}
