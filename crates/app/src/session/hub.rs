use std::cell::RefCell;
use std::rc::{Rc, Weak};

use shared_types::Session;

type Listener = Rc<dyn Fn(Option<Session>)>;

#[derive(Default)]
struct HubInner {
    current: Option<Session>,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

/// The client's view of the signed-in session.
///
/// Provided once as Dioxus context. Sign-in, sign-up and sign-out publish
/// here; the dashboard selector subscribes with [`SessionHub::on_change`].
#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Rc<RefCell<HubInner>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.borrow().current.clone()
    }

    /// Replace the current session. Subscribers are notified only when the
    /// value actually changes.
    pub fn publish(&self, session: Option<Session>) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            if inner.current == session {
                return;
            }
            inner.current = session.clone();
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        // Listeners run with the hub unborrowed so they may publish or
        // unsubscribe themselves.
        for listener in listeners {
            listener(session.clone());
        }
    }

    /// Register a change callback. The callback stays registered until the
    /// returned subscription is dropped or unsubscribed.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn on_change(&self, callback: impl Fn(Option<Session>) + 'static) -> SessionSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(callback)));

        SessionSubscription {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Handle for one [`SessionHub::on_change`] registration.
pub struct SessionSubscription {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl SessionSubscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
