use dioxus::prelude::*;
use dioxus_primitives::toast as prim;

use dioxus_primitives::toast::{use_toast, ToastOptions, Toasts};

/// Mount once near the root; children can then call [`use_notices`].
#[component]
pub fn ToastProvider(props: prim::ToastProviderProps) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::ToastProvider { ..props }
    }
}

/// Outcome notices for mutations: one success or error toast per action.
#[derive(Clone, Copy)]
pub struct Notices {
    toasts: Toasts,
}

impl Notices {
    pub fn success(&self, message: impl Into<String>) {
        self.toasts.success(message.into(), ToastOptions::new());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.toasts.error(message.into(), ToastOptions::new());
    }
}

/// [`Notices`] backed by the nearest [`ToastProvider`].
pub fn use_notices() -> Notices {
    Notices {
        toasts: use_toast(),
    }
}
