use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{AppError, FeatureFlags, Session};
use shared_ui::{
    Button, Card, CardContent, CardHeader, Input, TabContent, TabList, TabTrigger, Tabs,
};

use crate::routes::Route;
use crate::session::{use_session_watch, SessionHub};

/// Sign-in and sign-up forms. A successful submit publishes the new session;
/// any signed-in session forwards to the dashboard.
#[component]
pub fn Auth() -> Element {
    let hub = use_context::<SessionHub>();
    let flags: FeatureFlags = use_context();
    let nav = navigator();

    // Covers a visitor who is already signed in as well as a fresh sign-in.
    use_session_watch(move |session| {
        if session.is_some() {
            nav.replace(Route::Dashboard {});
        }
    });

    let signed_in = move |session: Session| {
        tracing::info!(user_id = %session.user_id(), "signed in");
        hub.publish(Some(session));
    };

    rsx! {
        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    title: "The Fruit Union",
                    description: "Sign in to manage your fruit deliveries",
                }
                CardContent {
                    Tabs { default_value: "sign-in", horizontal: true,
                        TabList {
                            TabTrigger { value: "sign-in", index: 0usize, "Sign In" }
                            TabTrigger { value: "sign-up", index: 1usize, "Sign Up" }
                        }
                        TabContent { value: "sign-in", index: 0usize,
                            SignInForm { on_success: signed_in.clone() }
                        }
                        TabContent { value: "sign-up", index: 1usize,
                            if flags.self_signup {
                                SignUpForm { on_success: signed_in }
                            } else {
                                p { class: "auth-closed",
                                    "New accounts are created by The Fruit Union team. Contact us to start a subscription."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SignInForm(on_success: EventHandler<Session>) -> Element {
    let mut login = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| None::<String>);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::sign_in(login(), password()).await {
            Ok(session) => on_success.call(session),
            Err(e) => {
                let err = e.to_string();
                let fe = AppError::parse_field_errors(&err);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    let field_error = move |field: &str| field_errors.read().get(field).cloned();

    rsx! {
        form { class: "auth-form", onsubmit: handle_submit,
            if let Some(err) = error_msg() {
                div { class: "auth-error", role: "alert", "{err}" }
            }
            Input {
                id: "sign-in-login",
                label: "Email or Username",
                required: true,
                value: login(),
                on_input: move |e: FormEvent| login.set(e.value()),
            }
            if let Some(msg) = field_error("login") {
                span { class: "auth-field-error", "{msg}" }
            }
            Input {
                id: "sign-in-password",
                label: "Password",
                input_type: "password",
                required: true,
                value: password(),
                on_input: move |e: FormEvent| password.set(e.value()),
            }
            if let Some(msg) = field_error("password") {
                span { class: "auth-field-error", "{msg}" }
            }
            Button { button_type: "submit", loading: loading(), "Sign In" }
        }
    }
}

#[component]
fn SignUpForm(on_success: EventHandler<Session>) -> Element {
    let mut full_name = use_signal(String::new);
    let mut login = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut error_msg = use_signal(|| None::<String>);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        let phone = Some(phone()).filter(|p| !p.trim().is_empty());
        match server::api::sign_up(full_name(), login(), password(), phone).await {
            Ok(session) => on_success.call(session),
            Err(e) => {
                let err = e.to_string();
                let fe = AppError::parse_field_errors(&err);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    let field_error = move |field: &str| field_errors.read().get(field).cloned();

    rsx! {
        form { class: "auth-form", onsubmit: handle_submit,
            if let Some(err) = error_msg() {
                div { class: "auth-error", role: "alert", "{err}" }
            }
            Input {
                id: "sign-up-full-name",
                label: "Full Name",
                required: true,
                value: full_name(),
                on_input: move |e: FormEvent| full_name.set(e.value()),
            }
            if let Some(msg) = field_error("full_name") {
                span { class: "auth-field-error", "{msg}" }
            }
            Input {
                id: "sign-up-login",
                label: "Email or Username",
                required: true,
                value: login(),
                on_input: move |e: FormEvent| login.set(e.value()),
            }
            if let Some(msg) = field_error("login") {
                span { class: "auth-field-error", "{msg}" }
            }
            Input {
                id: "sign-up-password",
                label: "Password",
                input_type: "password",
                required: true,
                placeholder: "At least 8 characters",
                value: password(),
                on_input: move |e: FormEvent| password.set(e.value()),
            }
            if let Some(msg) = field_error("password") {
                span { class: "auth-field-error", "{msg}" }
            }
            Input {
                id: "sign-up-phone",
                label: "Phone",
                input_type: "tel",
                value: phone(),
                on_input: move |e: FormEvent| phone.set(e.value()),
            }
            Button { button_type: "submit", loading: loading(), "Create Account" }
        }
    }
}

