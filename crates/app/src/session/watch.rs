use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use shared_types::Session;

use super::{SessionHub, SessionSubscription};

/// Call `on_session` with the hub's session once after mount and again on
/// every change until the component unmounts.
pub fn use_session_watch(on_session: impl Fn(Option<Session>) + 'static) {
    let hub = use_context::<SessionHub>();
    let on_session = use_hook(move || Rc::new(on_session) as Rc<dyn Fn(Option<Session>)>);
    let subscription = use_hook(|| Rc::new(RefCell::new(None::<SessionSubscription>)));

    {
        let subscription = subscription.clone();
        use_effect(move || {
            if subscription.borrow().is_some() {
                return;
            }
            let listener = on_session.clone();
            *subscription.borrow_mut() = Some(hub.on_change(move |session| listener(session)));
            on_session(hub.current());
        });
    }

    use_drop(move || {
        subscription.borrow_mut().take();
    });
}
