use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdApple, LdLogOut};
use dioxus_free_icons::Icon;
use shared_types::SessionUser;
use shared_ui::{Button, ButtonVariant, PageActions, PageHeader, PageTitle};

use crate::routes::Route;
use crate::session::SessionHub;

/// Title bar shared by every dashboard: the dashboard title, the signed-in
/// user's email and a sign-out button.
#[component]
pub fn DashboardHeader(title: String, user: SessionUser) -> Element {
    let mut signing_out = use_signal(|| false);

    let handle_sign_out = move |_: MouseEvent| {
        let nav = navigator();
        let hub = try_consume_context::<SessionHub>();
        signing_out.set(true);
        spawn(async move {
            if let Err(e) = server::api::sign_out().await {
                tracing::warn!(error = %e, "sign-out request failed");
            }
            if let Some(hub) = hub {
                hub.publish(None);
            }
            nav.push(Route::Home {});
        });
    };

    rsx! {
        PageHeader {
            div { class: "dashboard-brand",
                Icon { icon: LdApple, width: 28, height: 28 }
                PageTitle { subtitle: "Signed in as {user.email}", "{title}" }
            }
            PageActions {
                Button {
                    variant: ButtonVariant::Outline,
                    loading: signing_out(),
                    onclick: handle_sign_out,
                    Icon { icon: LdLogOut, width: 16, height: 16 }
                    "Sign Out"
                }
            }
        }
    }
}
