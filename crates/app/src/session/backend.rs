use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use dioxus::prelude::ServerFnError;
use shared_types::{AppError, Session};
use uuid::Uuid;

use super::resolver::{RoleSource, ServerRoleSource};

type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;
type CheckFn = dyn Fn() -> LocalFuture<Result<Option<Session>, AppError>>;
type RolesFn = dyn Fn(Uuid) -> LocalFuture<Result<Option<String>, AppError>>;

/// The one-shot session check and the role lookup a dashboard mount uses.
///
/// Read from context when present, otherwise [`SessionBackend::server`].
#[derive(Clone)]
pub struct SessionBackend {
    check: Rc<CheckFn>,
    roles: Rc<RolesFn>,
}

impl SessionBackend {
    pub fn new<C, CF, R, RF>(check: C, roles: R) -> Self
    where
        C: Fn() -> CF + 'static,
        CF: Future<Output = Result<Option<Session>, AppError>> + 'static,
        R: Fn(Uuid) -> RF + 'static,
        RF: Future<Output = Result<Option<String>, AppError>> + 'static,
    {
        Self {
            check: Rc::new(move || Box::pin(check()) as LocalFuture<_>),
            roles: Rc::new(move |user_id| Box::pin(roles(user_id)) as LocalFuture<_>),
        }
    }

    /// `get_session` and `lookup_role` server functions.
    pub fn server() -> Self {
        Self::new(
            || async { server::api::get_session().await.map_err(server_error) },
            |user_id| async move { ServerRoleSource.lookup_role(user_id).await },
        )
    }

    pub async fn check_session(&self) -> Result<Option<Session>, AppError> {
        (self.check)().await
    }
}

impl RoleSource for SessionBackend {
    fn lookup_role(&self, user_id: Uuid) -> impl Future<Output = Result<Option<String>, AppError>> {
        (self.roles)(user_id)
    }
}

/// Recover the `AppError` a server function serialized into its error.
pub(crate) fn server_error(e: ServerFnError) -> AppError {
    let message = e.to_string();
    AppError::from_server_error(&message).unwrap_or_else(|| AppError::internal(message))
}
