//! Callback lists backing the in-memory host's notifications.

use crate::subscription::Subscription;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Box<dyn FnMut(T)>;

struct ListenerTable<T> {
    next_id: u64,
    callbacks: Vec<(u64, Callback<T>)>,
}

/// A list of callbacks notified with a value of type `T`.
///
/// Callbacks must not subscribe or unsubscribe while being notified.
pub struct Listeners<T> {
    table: Rc<RefCell<ListenerTable<T>>>,
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            table: Rc::clone(&self.table),
        }
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            table: Rc::new(RefCell::new(ListenerTable {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }
}

impl<T: Clone + 'static> Listeners<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: Callback<T>) -> Subscription {
        let id = {
            let mut table = self.table.borrow_mut();
            let id = table.next_id;
            table.next_id += 1;
            table.callbacks.push((id, callback));
            id
        };
        let table: Weak<RefCell<ListenerTable<T>>> = Rc::downgrade(&self.table);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().callbacks.retain(|(cb_id, _)| *cb_id != id);
            }
        })
    }

    pub fn emit(&self, value: T) {
        let mut table = self.table.borrow_mut();
        for (_, callback) in table.callbacks.iter_mut() {
            callback(value.clone());
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.table.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Listeners<()> {
    /// Subscribe a callback that takes no argument.
    pub fn subscribe_unit(&self, mut callback: Box<dyn FnMut()>) -> Subscription {
        self.subscribe(Box::new(move |()| callback()))
    }
}
