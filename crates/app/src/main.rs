use dioxus::prelude::*;
use shared_types::FeatureFlags;

mod components;
mod format_helpers;
mod routes;
mod session;

use routes::Route;
use session::SessionHub;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_feature_flags();
        let flags = server::config::feature_flags();

        if flags.telemetry {
            server::telemetry::init_telemetry();
        }
        server::health::record_start_time();

        let pool = server::db::create_pool()?;
        server::db::run_migrations(&pool).await?;

        // Expired refresh tokens are never accepted, so pruning is housekeeping only.
        let cleanup_pool = pool.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(60 * 60));
            loop {
                interval.tick().await;
                match server::repo::refresh_token::delete_expired(&cleanup_pool).await {
                    Ok(0) => {}
                    Ok(n) => tracing::info!(removed = n, "pruned expired refresh tokens"),
                    Err(e) => tracing::warn!(error = %e, "refresh token cleanup failed"),
                }
            }
        });

        let state = server::db::AppState { pool: pool.clone() };

        let mut router = dioxus::server::router(App).merge(server::openapi::api_router(pool));

        if flags.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let router = router
            .layer(axum::middleware::from_fn_with_state(
                state,
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Defaults all-off when the flags cannot be fetched.
    let flags_resource =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;

    let flags = flags_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(FeatureFlags::default()))
        .unwrap_or_default();

    use_context_provider(|| flags);
    let hub = use_context_provider(SessionHub::new);

    // Seed the hub so pages outside the dashboard know who is signed in.
    use_effect(move || {
        let hub = hub.clone();
        spawn(async move {
            match server::api::get_session().await {
                Ok(session) => hub.publish(session),
                Err(e) => tracing::debug!(error = %e, "initial session check failed"),
            }
        });
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    shared_ui::LoadingScreen { message: "Loading..." }
                },
                Router::<Route> {}
            }
        }
    }
}
