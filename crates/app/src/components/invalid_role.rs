use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdShield;
use dioxus_free_icons::Icon;

pub const INVALID_ROLE_MESSAGE: &str = "Invalid user role. Please contact support.";

/// Blocking notice for a role outside the known set. No dashboard renders
/// behind it.
#[component]
pub fn InvalidRoleNotice() -> Element {
    rsx! {
        div { class: "invalid-role", role: "alert",
            Icon { icon: LdShield, width: 40, height: 40 }
            p { class: "invalid-role-message", "{INVALID_ROLE_MESSAGE}" }
        }
    }
}
