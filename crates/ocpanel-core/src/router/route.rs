use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::rpc::ClientRegistry;
use crate::views::{self, View, ViewFactory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteName {
    Login,
    Dashboard,
    Services,
    Monitor,
    Logs,
    Users,
    Config,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Login => "login",
            RouteName::Dashboard => "dashboard",
            RouteName::Services => "services",
            RouteName::Monitor => "monitor",
            RouteName::Logs => "logs",
            RouteName::Users => "users",
            RouteName::Config => "config",
        }
    }

    /// Human-readable title for listings
    pub fn title(&self) -> &'static str {
        match self {
            RouteName::Login => "Login",
            RouteName::Dashboard => "Dashboard",
            RouteName::Services => "Services",
            RouteName::Monitor => "Monitor",
            RouteName::Logs => "Logs",
            RouteName::Users => "Users",
            RouteName::Config => "Server Config",
        }
    }

    /// Every route except `login` requires a session
    pub fn requires_auth(&self) -> bool {
        !matches!(self, RouteName::Login)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A navigable unit: path, name, and the factory that builds its view on demand
pub struct Route {
    pub name: RouteName,
    pub path: &'static str,
    factory: ViewFactory,
}

impl Route {
    pub fn requires_auth(&self) -> bool {
        self.name.requires_auth()
    }

    /// Build the view. Nothing is constructed until a navigation reaches it.
    pub fn build_view(&self, registry: Arc<ClientRegistry>) -> Box<dyn View> {
        (self.factory)(registry)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

pub static ROUTES: [Route; 7] = [
    Route {
        name: RouteName::Login,
        path: "/login",
        factory: views::login::build,
    },
    Route {
        name: RouteName::Dashboard,
        path: "/",
        factory: views::dashboard::build,
    },
    Route {
        name: RouteName::Services,
        path: "/services",
        factory: views::services::build,
    },
    Route {
        name: RouteName::Monitor,
        path: "/monitor",
        factory: views::monitor::build,
    },
    Route {
        name: RouteName::Logs,
        path: "/logs",
        factory: views::logs::build,
    },
    Route {
        name: RouteName::Users,
        path: "/users",
        factory: views::users::build,
    },
    Route {
        name: RouteName::Config,
        path: "/config",
        factory: views::config::build,
    },
];

/// Strip query, fragment and trailing `/` so `/users/?tab=roles` matches `/users`
fn normalize(path: &str) -> &str {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let trimmed = path[..end].trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Look up the route for a path. A missing leading `/` is tolerated.
pub fn resolve(path: &str) -> Option<&'static Route> {
    let normalized = normalize(path);
    let normalized = normalized.strip_prefix('/').unwrap_or(normalized);
    ROUTES
        .iter()
        .find(|route| route.path.trim_start_matches('/') == normalized)
}

pub fn route(name: RouteName) -> &'static Route {
    // ROUTES is ordered like RouteName
    &ROUTES[name as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_paths() {
        assert_eq!(resolve("/login").unwrap().name, RouteName::Login);
        assert_eq!(resolve("/").unwrap().name, RouteName::Dashboard);
        assert_eq!(resolve("/services").unwrap().name, RouteName::Services);
        assert_eq!(resolve("/monitor").unwrap().name, RouteName::Monitor);
        assert_eq!(resolve("/logs").unwrap().name, RouteName::Logs);
        assert_eq!(resolve("/users").unwrap().name, RouteName::Users);
        assert_eq!(resolve("/config").unwrap().name, RouteName::Config);
    }

    #[test]
    fn test_resolve_ignores_query_and_trailing_slash() {
        assert_eq!(resolve("/users/").unwrap().name, RouteName::Users);
        assert_eq!(resolve("/users?page=2").unwrap().name, RouteName::Users);
        assert_eq!(resolve("/logs/#latest").unwrap().name, RouteName::Logs);
        assert_eq!(resolve("").unwrap().name, RouteName::Dashboard);
        assert_eq!(resolve("?x=1").unwrap().name, RouteName::Dashboard);
        assert_eq!(resolve("monitor").unwrap().name, RouteName::Monitor);
    }

    #[test]
    fn test_resolve_unknown_path() {
        assert!(resolve("/nope").is_none());
        assert!(resolve("/users/42").is_none());
        assert!(resolve("/LOGIN").is_none());
    }

    #[test]
    fn test_only_login_is_public() {
        let public: Vec<_> = ROUTES.iter().filter(|r| !r.requires_auth()).collect();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].name, RouteName::Login);
    }

    #[test]
    fn test_route_table_is_consistent() {
        for entry in &ROUTES {
            assert_eq!(route(entry.name).path, entry.path);
            assert_eq!(resolve(entry.path).unwrap().name, entry.name);
        }
    }

    #[test]
    fn test_route_name_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RouteName::Dashboard).unwrap(),
            "\"dashboard\""
        );
        assert_eq!(RouteName::Config.to_string(), "config");
    }
}
