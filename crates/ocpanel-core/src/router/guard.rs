use serde::Serialize;
use tracing::{debug, warn};

use crate::session::SessionStore;

use super::route::RouteName;

/// Outcome of evaluating one navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum GuardDecision {
    Allowed,
    /// Send the user here instead. The requested route is not remembered.
    Redirected(RouteName),
}

/// Gate run before every view transition.
///
/// `login` is always reachable. Every other target needs a session token;
/// without one the navigation is redirected to `login`.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    session: SessionStore,
}

impl NavigationGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// `to` is `None` for paths that match no route; those are never `login`.
    pub fn evaluate(&self, from: Option<RouteName>, to: Option<RouteName>) -> GuardDecision {
        if to == Some(RouteName::Login) {
            return GuardDecision::Allowed;
        }

        let has_token = match self.session.get_token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Session storage unreadable, treating as logged out");
                false
            }
        };

        if has_token {
            GuardDecision::Allowed
        } else {
            debug!(?from, ?to, "No session token, redirecting to login");
            GuardDecision::Redirected(RouteName::Login)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::tests::BrokenStorage;

    const PROTECTED: [RouteName; 6] = [
        RouteName::Dashboard,
        RouteName::Services,
        RouteName::Monitor,
        RouteName::Logs,
        RouteName::Users,
        RouteName::Config,
    ];

    #[test]
    fn test_login_always_allowed() {
        let session = SessionStore::in_memory();
        let guard = NavigationGuard::new(session.clone());

        assert_eq!(guard.evaluate(None, Some(RouteName::Login)), GuardDecision::Allowed);

        session.set_token("abc").unwrap();
        assert_eq!(
            guard.evaluate(Some(RouteName::Users), Some(RouteName::Login)),
            GuardDecision::Allowed
        );

        let broken = NavigationGuard::new(SessionStore::new(BrokenStorage));
        assert_eq!(broken.evaluate(None, Some(RouteName::Login)), GuardDecision::Allowed);
    }

    #[test]
    fn test_protected_routes_follow_token() {
        let session = SessionStore::in_memory();
        let guard = NavigationGuard::new(session.clone());

        for to in PROTECTED {
            assert_eq!(
                guard.evaluate(None, Some(to)),
                GuardDecision::Redirected(RouteName::Login)
            );
        }

        session.set_token("abc").unwrap();
        for to in PROTECTED {
            assert_eq!(guard.evaluate(None, Some(to)), GuardDecision::Allowed);
        }

        session.clear_token().unwrap();
        for to in PROTECTED {
            assert_eq!(
                guard.evaluate(Some(RouteName::Dashboard), Some(to)),
                GuardDecision::Redirected(RouteName::Login)
            );
        }
    }

    #[test]
    fn test_unknown_target_is_guarded() {
        let session = SessionStore::in_memory();
        let guard = NavigationGuard::new(session.clone());
        assert_eq!(
            guard.evaluate(None, None),
            GuardDecision::Redirected(RouteName::Login)
        );

        session.set_token("abc").unwrap();
        assert_eq!(guard.evaluate(None, None), GuardDecision::Allowed);
    }

    #[test]
    fn test_storage_failure_fails_closed() {
        let guard = NavigationGuard::new(SessionStore::new(BrokenStorage));
        for to in PROTECTED {
            assert_eq!(
                guard.evaluate(None, Some(to)),
                GuardDecision::Redirected(RouteName::Login)
            );
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let session = SessionStore::in_memory();
        session.set_token("abc").unwrap();
        let guard = NavigationGuard::new(session);

        let first = guard.evaluate(None, Some(RouteName::Monitor));
        let second = guard.evaluate(None, Some(RouteName::Monitor));
        assert_eq!(first, second);
    }

    #[test]
    fn test_decision_serialization() {
        assert_eq!(
            serde_json::to_string(&GuardDecision::Redirected(RouteName::Login)).unwrap(),
            r#"{"decision":"redirected","to":"login"}"#
        );
        assert_eq!(
            serde_json::to_string(&GuardDecision::Allowed).unwrap(),
            r#"{"decision":"allowed"}"#
        );
    }
}
