//! Route table, navigation guard and the router that ties them together.

pub mod guard;
pub mod route;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::NavigationError;
use crate::rpc::ClientRegistry;
use crate::views::View;

pub use guard::{GuardDecision, NavigationGuard};
pub use route::{resolve, route, Route, RouteName, ROUTES};

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Navigation {
    Allowed { route: RouteName },
    /// `requested` is reported but not replayed after login
    Redirected { requested: String, to: RouteName },
}

impl Navigation {
    /// The route that is now current
    pub fn route(&self) -> RouteName {
        match self {
            Navigation::Allowed { route } => *route,
            Navigation::Redirected { to, .. } => *to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirected { .. })
    }
}

/// A navigation plus the view built for the route it landed on
pub struct OpenedView {
    pub navigation: Navigation,
    pub view: Box<dyn View>,
}

pub struct Router {
    registry: Arc<ClientRegistry>,
    guard: NavigationGuard,
    current: Option<RouteName>,
}

impl Router {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        let guard = NavigationGuard::new(registry.session().clone());
        Self {
            registry,
            guard,
            current: None,
        }
    }

    pub fn current(&self) -> Option<RouteName> {
        self.current
    }

    pub fn registry(&self) -> &Arc<ClientRegistry> {
        &self.registry
    }

    /// Resolve `path`, run the guard, and record the resulting route.
    ///
    /// Unknown paths are guarded like any protected route, so without a
    /// session they redirect to `login`. With a session they are `NotFound`.
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let target = resolve(path);
        let decision = self
            .guard
            .evaluate(self.current, target.map(|route| route.name));

        let navigation = match (decision, target) {
            (GuardDecision::Redirected(to), _) => Navigation::Redirected {
                requested: path.to_string(),
                to,
            },
            (GuardDecision::Allowed, Some(route)) => Navigation::Allowed { route: route.name },
            (GuardDecision::Allowed, None) => {
                debug!(path, "No route for path");
                return Err(NavigationError::NotFound(path.to_string()));
            }
        };

        info!(path, route = %navigation.route(), redirected = navigation.is_redirect(), "Navigated");
        self.current = Some(navigation.route());
        Ok(navigation)
    }

    /// Navigate and build the view for wherever the navigation landed
    pub fn open(&mut self, path: &str) -> Result<OpenedView, NavigationError> {
        let navigation = self.navigate(path)?;
        let view = route(navigation.route()).build_view(Arc::clone(&self.registry));
        Ok(OpenedView { navigation, view })
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;

    fn router() -> (Router, SessionStore) {
        let session = SessionStore::in_memory();
        let registry =
            ClientRegistry::new("http://127.0.0.1:7777/backend", session.clone()).unwrap();
        (Router::new(Arc::new(registry)), session)
    }

    #[tokio::test]
    async fn test_login_then_logout_scenario() {
        let (mut router, session) = router();

        let nav = router.navigate("/users").unwrap();
        assert_eq!(
            nav,
            Navigation::Redirected {
                requested: "/users".to_string(),
                to: RouteName::Login
            }
        );
        assert_eq!(router.current(), Some(RouteName::Login));

        session.set_token("abc").unwrap();
        let nav = router.navigate("/users").unwrap();
        assert_eq!(nav, Navigation::Allowed { route: RouteName::Users });
        assert_eq!(router.current(), Some(RouteName::Users));

        session.clear_token().unwrap();
        let nav = router.navigate("/monitor").unwrap();
        assert_eq!(nav.route(), RouteName::Login);
        assert!(nav.is_redirect());
    }

    #[tokio::test]
    async fn test_login_reachable_without_session() {
        let (mut router, _session) = router();
        let nav = router.navigate("/login").unwrap();
        assert_eq!(nav, Navigation::Allowed { route: RouteName::Login });
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (mut router, session) = router();

        let nav = router.navigate("/does-not-exist").unwrap();
        assert_eq!(nav.route(), RouteName::Login);

        session.set_token("abc").unwrap();
        let err = router.navigate("/does-not-exist").unwrap_err();
        assert!(matches!(err, NavigationError::NotFound(ref p) if p == "/does-not-exist"));
        // Failed navigation keeps the previous route
        assert_eq!(router.current(), Some(RouteName::Login));
    }

    #[tokio::test]
    async fn test_open_builds_login_view_on_redirect() {
        let (mut router, session) = router();

        let opened = router.open("/config").unwrap();
        assert!(opened.navigation.is_redirect());
        assert_eq!(opened.view.route(), RouteName::Login);

        session.set_token("abc").unwrap();
        let opened = router.open("/config").unwrap();
        assert_eq!(opened.view.route(), RouteName::Config);
    }

    #[test]
    fn test_navigation_serialization() {
        let nav = Navigation::Redirected {
            requested: "/users".to_string(),
            to: RouteName::Login,
        };
        assert_eq!(
            serde_json::to_string(&nav).unwrap(),
            r#"{"outcome":"redirected","requested":"/users","to":"login"}"#
        );
    }
}
