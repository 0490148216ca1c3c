pub mod admin;
pub mod customer;
pub mod delivery_partner;

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use shared_types::Role;
use shared_ui::LoadingScreen;

use crate::components::InvalidRoleNotice;
use crate::routes::Route;
use crate::session::{
    complete_lookup, DashboardSelector, DashboardState, SelectorEffect, SessionBackend,
    SessionEvent, SessionHub, SessionSubscription, ViewLease,
};

/// Owns one mount's selector and runs the effects it asks for.
#[derive(Clone)]
struct SelectorDriver {
    selector: Rc<RefCell<DashboardSelector>>,
    state: Signal<DashboardState>,
    lease: ViewLease,
    backend: SessionBackend,
    on_redirect: EventHandler<()>,
}

impl SelectorDriver {
    fn dispatch(&self, event: SessionEvent) {
        if !self.lease.is_alive() {
            return;
        }
        let (effect, next) = {
            let mut selector = self.selector.borrow_mut();
            let effect = selector.apply(event);
            (effect, selector.state().clone())
        };
        let mut state = self.state;
        if *state.peek() != next {
            state.set(next);
        }

        match effect {
            Some(SelectorEffect::RedirectToSignIn) => self.on_redirect.call(()),
            Some(SelectorEffect::LookupRole { epoch, user_id }) => {
                let driver = self.clone();
                spawn(async move {
                    let lease = driver.lease.clone();
                    complete_lookup(&driver.backend, &lease, epoch, user_id, |event| {
                        driver.dispatch(event)
                    })
                    .await;
                });
            }
            None => {}
        }
    }
}

/// `/dashboard`: waits for a definitive session, resolves the user's role
/// once, then shows the matching dashboard.
#[component]
pub fn Dashboard() -> Element {
    let nav = navigator();

    rsx! {
        DashboardGate {
            on_redirect: move |_| {
                nav.replace(Route::Auth {});
            },
            view: move |state: DashboardState| rsx! { DashboardView { state } },
        }
    }
}

/// Drives a [`DashboardSelector`] from the session hub and the
/// [`SessionBackend`] in context, rendering each state through `view`.
#[component]
pub fn DashboardGate(on_redirect: EventHandler<()>, view: Callback<DashboardState, Element>) -> Element {
    let hub = use_context::<SessionHub>();
    let state = use_signal(|| DashboardState::Loading);

    let driver = use_hook(|| SelectorDriver {
        selector: Rc::new(RefCell::new(DashboardSelector::new())),
        state,
        lease: ViewLease::new(),
        backend: try_consume_context::<SessionBackend>().unwrap_or_else(SessionBackend::server),
        on_redirect,
    });
    let subscription = use_hook(|| Rc::new(RefCell::new(None::<SessionSubscription>)));

    {
        let driver = driver.clone();
        let subscription = subscription.clone();
        use_effect(move || {
            if subscription.borrow().is_some() {
                return;
            }
            let live = driver.clone();
            *subscription.borrow_mut() =
                Some(hub.on_change(move |session| live.dispatch(SessionEvent::Changed(session))));

            let initial = driver.clone();
            spawn(async move {
                let session = match initial.backend.check_session().await {
                    Ok(session) => session,
                    Err(e) => {
                        tracing::warn!(error = %e, "session check failed");
                        None
                    }
                };
                initial.dispatch(SessionEvent::InitialCheck(session));
            });
        });
    }

    {
        let driver = driver.clone();
        use_drop(move || {
            driver.lease.release();
            subscription.borrow_mut().take();
        });
    }

    view.call(state())
}

/// Pure rendering of a [`DashboardState`].
#[component]
pub fn DashboardView(state: DashboardState) -> Element {
    match state {
        DashboardState::Loading => rsx! { LoadingScreen { message: "Checking your session..." } },
        DashboardState::Unauthenticated => {
            rsx! { LoadingScreen { message: "Redirecting to sign in..." } }
        }
        DashboardState::ResolvingRole(_) => {
            rsx! { LoadingScreen { message: "Loading your dashboard..." } }
        }
        DashboardState::InvalidRole(..) => rsx! { InvalidRoleNotice {} },
        DashboardState::Ready(session, role) => match role {
            Role::Admin => rsx! { admin::AdminDashboard { user: session.user } },
            Role::DeliveryPartner => {
                rsx! { delivery_partner::DeliveryPartnerDashboard { user: session.user } }
            }
            Role::Customer => rsx! { customer::CustomerDashboard { user: session.user } },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{Session, SessionUser, ALL_ROLES};
    use std::cell::Cell;
    use std::time::Duration;
    use tokio::sync::oneshot;
    use uuid::Uuid;

    fn session(email: &str) -> Session {
        Session {
            session_id: "s1".into(),
            expires_at: 1_900_000_000,
            user: SessionUser {
                id: Uuid::new_v4(),
                email: email.into(),
            },
        }
    }

    #[component]
    fn Harness(state: DashboardState) -> Element {
        use_context_provider(SessionHub::new);
        rsx! {
            shared_ui::ToastProvider {
                DashboardView { state }
            }
        }
    }

    fn render(state: DashboardState) -> String {
        let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { state });
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn delivery_partner_sees_their_dashboard_with_email_in_header() {
        let html = render(DashboardState::Ready(
            session("u1@fruitunion.local"),
            Role::DeliveryPartner,
        ));

        assert!(html.contains("Delivery Partner Dashboard"), "{html}");
        assert!(html.contains("u1@fruitunion.local"));
        assert!(!html.contains("Admin Dashboard"));
        assert!(!html.contains("My Dashboard"));
    }

    #[test]
    fn each_role_renders_only_its_dashboard() {
        for role in ALL_ROLES {
            let html = render(DashboardState::Ready(session("u@fruitunion.local"), *role));
            for other in ALL_ROLES {
                let title = other.dashboard_title();
                assert_eq!(
                    html.contains(title),
                    other == role,
                    "{role} page and {title}: {html}"
                );
            }
        }
    }

    #[test]
    fn unknown_role_shows_blocking_message_only() {
        let html = render(DashboardState::InvalidRole(
            session("u1@fruitunion.local"),
            "manager".into(),
        ));

        assert!(html.contains("Invalid user role. Please contact support."));
        for role in ALL_ROLES {
            assert!(!html.contains(role.dashboard_title()));
        }
    }

    #[test]
    fn pending_states_show_no_dashboard() {
        for state in [
            DashboardState::Loading,
            DashboardState::Unauthenticated,
            DashboardState::ResolvingRole(session("u1@fruitunion.local")),
        ] {
            let html = render(state);
            assert!(html.contains("loading-screen"), "{html}");
            assert!(!html.contains("u1@fruitunion.local"));
        }
    }

    #[derive(Clone, Default)]
    struct Redirects(Rc<Cell<usize>>);

    fn label(state: &DashboardState) -> String {
        match state {
            DashboardState::Loading => "loading".into(),
            DashboardState::Unauthenticated => "unauthenticated".into(),
            DashboardState::ResolvingRole(_) => "resolving".into(),
            DashboardState::Ready(session, role) => format!("ready {role} {}", session.user.email),
            DashboardState::InvalidRole(_, raw) => format!("invalid {raw}"),
        }
    }

    #[component]
    fn GateHarness() -> Element {
        let redirects = use_context::<Redirects>();
        rsx! {
            DashboardGate {
                on_redirect: move |_| redirects.0.set(redirects.0.get() + 1),
                view: |state: DashboardState| rsx! { p { {label(&state)} } },
            }
        }
    }

    /// Backend with a fixed initial session and a counted role lookup.
    fn backend(initial: Option<Session>, row: Option<&str>, queries: Rc<Cell<usize>>) -> SessionBackend {
        let row = row.map(str::to_string);
        SessionBackend::new(
            move || {
                let initial = initial.clone();
                async move { Ok(initial) }
            },
            move |_| {
                queries.set(queries.get() + 1);
                let row = row.clone();
                async move { Ok(row) }
            },
        )
    }

    fn mount(hub: &SessionHub, backend: SessionBackend, redirects: &Redirects) -> VirtualDom {
        let mut dom = VirtualDom::new(GateHarness)
            .with_root_context(hub.clone())
            .with_root_context(backend)
            .with_root_context(redirects.clone());
        dom.rebuild_in_place();
        dom
    }

    async fn settle(dom: &mut VirtualDom) {
        while tokio::time::timeout(Duration::from_millis(50), dom.wait_for_work())
            .await
            .is_ok()
        {
            dom.render_immediate_to_vec();
        }
    }

    #[tokio::test]
    async fn no_session_at_mount_redirects_without_a_role_lookup() {
        let hub = SessionHub::new();
        let queries = Rc::new(Cell::new(0));
        let redirects = Redirects::default();
        let mut dom = mount(&hub, backend(None, Some("admin"), queries.clone()), &redirects);
        settle(&mut dom).await;

        assert_eq!(redirects.0.get(), 1);
        assert_eq!(queries.get(), 0);
        assert!(dioxus_ssr::render(&dom).contains("unauthenticated"));
    }

    #[tokio::test]
    async fn signed_in_partner_reaches_their_dashboard_with_one_lookup() {
        let hub = SessionHub::new();
        let queries = Rc::new(Cell::new(0));
        let redirects = Redirects::default();
        let initial = Some(session("u1@fruitunion.local"));
        let mut dom = mount(
            &hub,
            backend(initial, Some("delivery_partner"), queries.clone()),
            &redirects,
        );
        settle(&mut dom).await;

        let html = dioxus_ssr::render(&dom);
        assert!(html.contains("ready delivery_partner u1@fruitunion.local"), "{html}");
        assert_eq!(queries.get(), 1);
        assert_eq!(redirects.0.get(), 0);
    }

    #[tokio::test]
    async fn unknown_role_row_stops_at_the_invalid_role_state() {
        let hub = SessionHub::new();
        let redirects = Redirects::default();
        let initial = Some(session("u1@fruitunion.local"));
        let mut dom = mount(&hub, backend(initial, Some("manager"), Rc::default()), &redirects);
        settle(&mut dom).await;

        assert!(dioxus_ssr::render(&dom).contains("invalid manager"));
        assert_eq!(redirects.0.get(), 0);
    }

    #[tokio::test]
    async fn live_sign_out_redirects() {
        let hub = SessionHub::new();
        let redirects = Redirects::default();
        let user = session("u1@fruitunion.local");
        hub.publish(Some(user.clone()));
        let mut dom = mount(&hub, backend(Some(user), None, Rc::default()), &redirects);
        settle(&mut dom).await;
        assert!(dioxus_ssr::render(&dom).contains("ready customer"));

        dom.in_runtime(|| hub.publish(None));
        settle(&mut dom).await;

        assert_eq!(redirects.0.get(), 1);
        assert!(dioxus_ssr::render(&dom).contains("unauthenticated"));
    }

    #[tokio::test]
    async fn unmount_unsubscribes_from_the_hub() {
        let hub = SessionHub::new();
        let redirects = Redirects::default();
        let mut dom = mount(&hub, backend(None, None, Rc::default()), &redirects);
        settle(&mut dom).await;
        assert_eq!(hub.subscriber_count(), 1);

        drop(dom);

        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn unmount_during_role_lookup_ignores_later_session_changes() {
        let hub = SessionHub::new();
        let redirects = Redirects::default();
        let (tx, rx) = oneshot::channel::<Option<String>>();
        let gate = Rc::new(RefCell::new(Some(rx)));
        let initial = Some(session("u1@fruitunion.local"));
        let gated = SessionBackend::new(
            move || {
                let initial = initial.clone();
                async move { Ok(initial) }
            },
            move |_| {
                let rx = gate.borrow_mut().take();
                async move {
                    match rx {
                        Some(rx) => rx.await.map_err(|_| shared_types::AppError::internal("gate closed")),
                        None => Ok(None),
                    }
                }
            },
        );
        let mut dom = mount(&hub, gated, &redirects);
        settle(&mut dom).await;
        assert!(dioxus_ssr::render(&dom).contains("resolving"));

        drop(dom);
        let _ = tx.send(Some("admin".to_string()));
        hub.publish(None);

        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(redirects.0.get(), 0);
    }
}
