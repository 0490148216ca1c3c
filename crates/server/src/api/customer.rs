use dioxus::prelude::*;
use shared_types::CustomerOverview;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

/// Subscription and delivery history of the signed-in user.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_my_subscription() -> Result<CustomerOverview, ServerFnError> {
    let claims = require_auth()?;
    crate::dashboard::customer_overview(db().await?, claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())
}
