use std::future::Future;

use shared_types::{AppError, Role, UnrecognizedRole};
use uuid::Uuid;

use super::{SessionEvent, ViewLease};

/// Where role rows come from.
pub trait RoleSource {
    /// The raw `role` column for the user, `None` when there is no row.
    fn lookup_role(&self, user_id: Uuid) -> impl Future<Output = Result<Option<String>, AppError>>;
}

/// Role rows fetched through the `lookup_role` server function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerRoleSource;

impl RoleSource for ServerRoleSource {
    async fn lookup_role(&self, user_id: Uuid) -> Result<Option<String>, AppError> {
        server::api::lookup_role(user_id)
            .await
            .map(|row| row.map(|row| row.role))
            .map_err(super::backend::server_error)
    }
}

/// Resolve the dashboard role for a user with a single query.
///
/// No row means `customer`. A failed query is also treated as "no row" and
/// logged; it is never retried. Unknown stored values come back as
/// `Err(UnrecognizedRole)`.
pub async fn resolve_role<S: RoleSource>(source: &S, user_id: Uuid) -> Result<Role, UnrecognizedRole> {
    match source.lookup_role(user_id).await {
        Ok(raw) => Role::resolve(raw.as_deref()),
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "role lookup failed, falling back to customer");
            Ok(Role::Customer)
        }
    }
}

/// Run the lookup requested by a `LookupRole` effect and hand the result to
/// `apply`, unless the view was torn down while the query was in flight.
pub async fn complete_lookup<S: RoleSource>(
    source: &S,
    lease: &ViewLease,
    epoch: u64,
    user_id: Uuid,
    apply: impl FnOnce(SessionEvent),
) {
    let result = resolve_role(source, user_id).await;
    if lease
        .run(|| apply(SessionEvent::RoleResolved { epoch, result }))
        .is_none()
    {
        tracing::debug!(%user_id, "view gone before role lookup finished");
    }
}
