use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdApple;
use dioxus_free_icons::Icon;

use crate::routes::Route;

/// Public landing page.
#[component]
pub fn Home() -> Element {
    rsx! {
        div { class: "home-page",
            section { class: "home-hero",
                span { class: "home-logo", Icon { icon: LdApple, width: 40, height: 40 } }
                h1 { class: "home-title", "The Fruit Union" }
                p { class: "home-tagline",
                    "Seasonal fruit boxes delivered to your door on a monthly, quarterly or yearly plan."
                }
                div { class: "home-actions",
                    Link { to: Route::Auth {}, class: "home-cta", "Sign In" }
                    Link { to: Route::Dashboard {}, class: "home-secondary", "Go to Dashboard" }
                }
            }
        }
    }
}
