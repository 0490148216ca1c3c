use shared_types::{Role, Session, UnrecognizedRole};
use uuid::Uuid;

/// What the dashboard route shows. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    /// No session check has completed yet.
    Loading,
    /// No session; the view redirects to sign-in. Terminal for the mount.
    Unauthenticated,
    ResolvingRole(Session),
    Ready(Session, Role),
    /// The stored role is not one we know. Terminal for the mount; `String`
    /// is the raw stored value.
    InvalidRole(Session, String),
}

impl DashboardState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            DashboardState::ResolvingRole(s)
            | DashboardState::Ready(s, _)
            | DashboardState::InvalidRole(s, _) => Some(s),
            DashboardState::Loading | DashboardState::Unauthenticated => None,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self,
            DashboardState::Unauthenticated | DashboardState::InvalidRole(..)
        )
    }
}

/// Input to the selector. The one-shot initial check and the live change
/// subscription arrive on the same stream.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    InitialCheck(Option<Session>),
    Changed(Option<Session>),
    RoleResolved {
        epoch: u64,
        result: Result<Role, UnrecognizedRole>,
    },
}

/// Side effect the view must run after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEffect {
    RedirectToSignIn,
    /// Look up the role for `user_id` and feed the answer back as
    /// `RoleResolved { epoch, .. }`.
    LookupRole { epoch: u64, user_id: Uuid },
}

/// Reducer deciding which dashboard a session may see.
///
/// Invariants:
/// - one lookup is issued per distinct signed-in user observed; a token
///   refresh for the same user updates the session without a new lookup
/// - once a live change has been applied, a late initial check is ignored
/// - role results tagged with a superseded epoch are dropped
#[derive(Debug)]
pub struct DashboardSelector {
    state: DashboardState,
    epoch: u64,
    live_seen: bool,
}

impl Default for DashboardSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardSelector {
    pub fn new() -> Self {
        Self {
            state: DashboardState::Loading,
            epoch: 0,
            live_seen: false,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn apply(&mut self, event: SessionEvent) -> Option<SelectorEffect> {
        if self.state.is_terminal() {
            return None;
        }

        match event {
            SessionEvent::InitialCheck(_) if self.live_seen => {
                tracing::debug!("ignoring initial session check superseded by a live change");
                None
            }
            SessionEvent::InitialCheck(session) => self.observe(session),
            SessionEvent::Changed(session) => {
                self.live_seen = true;
                self.observe(session)
            }
            SessionEvent::RoleResolved { epoch, result } => {
                self.resolve(epoch, result);
                None
            }
        }
    }

    fn observe(&mut self, session: Option<Session>) -> Option<SelectorEffect> {
        let Some(session) = session else {
            self.state = DashboardState::Unauthenticated;
            return Some(SelectorEffect::RedirectToSignIn);
        };

        let same_user = self
            .state
            .session()
            .is_some_and(|current| current.same_identity(&session));

        if same_user {
            // Refreshed tokens for the identity already resolved or in flight.
            match &mut self.state {
                DashboardState::ResolvingRole(s) | DashboardState::Ready(s, _) => *s = session,
                _ => {}
            }
            return None;
        }

        self.epoch += 1;
        let user_id = session.user_id();
        self.state = DashboardState::ResolvingRole(session);
        Some(SelectorEffect::LookupRole {
            epoch: self.epoch,
            user_id,
        })
    }

    fn resolve(&mut self, epoch: u64, result: Result<Role, UnrecognizedRole>) {
        if epoch != self.epoch {
            tracing::debug!(epoch, current = self.epoch, "dropping stale role lookup");
            return;
        }
        let DashboardState::ResolvingRole(session) = &self.state else {
            return;
        };
        let session = session.clone();

        self.state = match result {
            Ok(role) => DashboardState::Ready(session, role),
            Err(UnrecognizedRole(raw)) => {
                tracing::warn!(user_id = %session.user_id(), role = %raw, "unrecognized role");
                DashboardState::InvalidRole(session, raw)
            }
        };
    }
}
