//! Observable single-threaded state cells.
//!
//! `MutableState` is the binding seam between the swipe engine and whatever
//! draws it: a renderer either polls `value()` each frame or subscribes and
//! re-renders on change.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

type Listener<T> = Rc<dyn Fn(&T)>;

struct StateCell<T> {
    value: RefCell<T>,
    listeners: RefCell<FxHashMap<u64, Listener<T>>>,
    next_listener_id: Cell<u64>,
}

/// A shared value that notifies subscribers when it changes.
pub struct MutableState<T> {
    cell: Rc<StateCell<T>>,
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(StateCell {
                value: RefCell::new(value),
                listeners: RefCell::new(FxHashMap::default()),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    pub fn value(&self) -> T {
        self.cell.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    /// Stores `value`; listeners run only when it differs from the old one.
    pub fn set_value(&self, value: T) {
        {
            let mut current = self.cell.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value;
        }
        self.notify();
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, changed) = {
            let mut current = self.cell.value.borrow_mut();
            let before = current.clone();
            let result = f(&mut current);
            (result, *current != before)
        };
        if changed {
            self.notify();
        }
        result
    }

    pub fn as_state(&self) -> State<T> {
        State {
            cell: Rc::clone(&self.cell),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        subscribe_cell(&self.cell, listener)
    }

    fn notify(&self) {
        let value = self.value();
        // Listeners may subscribe, unsubscribe or write back while running.
        let listeners: Vec<Listener<T>> = self.cell.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(&value);
        }
    }
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableState")
            .field(&*self.cell.value.borrow())
            .finish()
    }
}

/// Read-only view of a [`MutableState`].
pub struct State<T> {
    cell: Rc<StateCell<T>>,
}

impl<T: Clone + 'static> State<T> {
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        subscribe_cell(&self.cell, listener)
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State")
            .field(&*self.cell.value.borrow())
            .finish()
    }
}

fn subscribe_cell<T: 'static>(
    cell: &Rc<StateCell<T>>,
    listener: impl Fn(&T) + 'static,
) -> Subscription {
    let id = cell.next_listener_id.get();
    cell.next_listener_id.set(id + 1);
    cell.listeners.borrow_mut().insert(id, Rc::new(listener));
    let weak: Weak<StateCell<T>> = Rc::downgrade(cell);
    Subscription {
        unsubscribe: Some(Box::new(move || {
            if let Some(cell) = weak.upgrade() {
                cell.listeners.borrow_mut().remove(&id);
            }
        })),
    }
}

/// Listener registration; dropping it unsubscribes.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keeps the listener registered for the lifetime of the state.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
