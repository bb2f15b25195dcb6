//! The route namespace of an administration.
//!
//! A [`Blueprint`] records every view URL bound under the administration's
//! URL prefix, keyed by endpoint, and rejects collisions.

use std::path::PathBuf;

use repo_admin_core::{AdminError, AdminResult};

/// Folder, relative to the crate, holding the built-in templates.
pub const TEMPLATE_FOLDER: &str = "templates";

/// One view bound in a blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRule {
    /// The view URL as resolved by the view.
    pub rule: String,
    /// The view endpoint, unqualified.
    pub endpoint: String,
    /// The full router path.
    pub route: String,
}

/// The route namespace views are bound in.
///
/// # Examples
///
/// ```
/// use repo_admin_panel::blueprint::Blueprint;
///
/// let mut blueprint = Blueprint::new("administration", "/administration");
/// blueprint.add_url_rule("/records", "records").unwrap();
/// assert_eq!(blueprint.rules()[0].route, "/administration/records");
/// assert!(blueprint.add_url_rule("/other", "records").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Blueprint {
    name: String,
    url_prefix: String,
    template_folder: String,
    static_folder: Option<PathBuf>,
    rules: Vec<UrlRule>,
}

impl Blueprint {
    /// Creates an empty blueprint.
    pub fn new(name: &str, url_prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            template_folder: TEMPLATE_FOLDER.to_string(),
            static_folder: None,
            rules: Vec::new(),
        }
    }

    /// Sets the folder served under `<prefix>/static`.
    #[must_use]
    pub fn static_folder(mut self, folder: Option<PathBuf>) -> Self {
        self.static_folder = folder;
        self
    }

    /// The blueprint name (the administration endpoint).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The URL prefix, without trailing slash.
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// The template folder.
    pub fn template_folder(&self) -> &str {
        &self.template_folder
    }

    /// The static folder, if any.
    pub const fn static_folder_path(&self) -> Option<&PathBuf> {
        self.static_folder.as_ref()
    }

    /// The router path the static folder is served under.
    pub fn static_route(&self) -> String {
        format!("{}/static", self.url_prefix)
    }

    /// The bound rules, in binding order.
    pub fn rules(&self) -> &[UrlRule] {
        &self.rules
    }

    /// Returns the router path for a view URL.
    ///
    /// URLs already under the prefix are kept; others are prefixed.
    pub fn route_path(&self, url: &str) -> String {
        let prefix = self.url_prefix.as_str();
        let under_prefix = !prefix.is_empty()
            && (url == prefix
                || url
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/')));
        if under_prefix {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{prefix}{url}")
        } else {
            format!("{prefix}/{url}")
        }
    }

    /// Binds `rule` to `endpoint`.
    ///
    /// Routes differing only in path parameter names (`/items/{id}` and
    /// `/items/{pid_value}`) are the same route. When a static folder is
    /// set, its route and everything under it are reserved.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateView` if the endpoint or the route is taken. The
    /// error's `view` is the endpoint being bound.
    pub fn add_url_rule(&mut self, rule: &str, endpoint: &str) -> AdminResult<&UrlRule> {
        let route = self.route_path(rule);
        if self.rules.iter().any(|r| r.endpoint == endpoint) {
            return Err(AdminError::DuplicateView {
                view: endpoint.to_string(),
                conflict: format!(
                    "endpoint '{}.{endpoint}' is already registered",
                    self.name
                ),
            });
        }
        if self.static_folder.is_some() {
            let static_route = self.static_route();
            let reserved = route
                .strip_prefix(&static_route)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
            if reserved {
                return Err(AdminError::DuplicateView {
                    view: endpoint.to_string(),
                    conflict: format!(
                        "URL '{route}' is reserved for static files under '{static_route}'"
                    ),
                });
            }
        }
        let shape = route_shape(&route);
        if let Some(existing) = self.rules.iter().find(|r| route_shape(&r.route) == shape) {
            return Err(AdminError::DuplicateView {
                view: endpoint.to_string(),
                conflict: format!(
                    "URL '{route}' conflicts with '{}' registered by '{}.{}'",
                    existing.route, self.name, existing.endpoint
                ),
            });
        }
        self.rules.push(UrlRule {
            rule: rule.to_string(),
            endpoint: endpoint.to_string(),
            route,
        });
        Ok(&self.rules[self.rules.len() - 1])
    }
}

/// Replaces every path parameter name with an empty one.
fn route_shape(route: &str) -> String {
    route
        .split('/')
        .map(|segment| {
            if segment.starts_with("{*") && segment.ends_with('}') {
                "{*}"
            } else if segment.starts_with('{') && segment.ends_with('}') {
                "{}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_path_prefixes_view_urls() {
        let blueprint = Blueprint::new("administration", "/administration");
        assert_eq!(blueprint.route_path("/"), "/administration/");
        assert_eq!(blueprint.route_path("/records"), "/administration/records");
        assert_eq!(
            blueprint.route_path("/records/{pid_value}"),
            "/administration/records/{pid_value}"
        );
    }

    #[test]
    fn test_route_path_keeps_prefixed_urls() {
        let blueprint = Blueprint::new("administration", "/administration/");
        assert_eq!(blueprint.url_prefix(), "/administration");
        assert_eq!(
            blueprint.route_path("/administration/stats"),
            "/administration/stats"
        );
        assert_eq!(
            blueprint.route_path("/administrationstats"),
            "/administration/administrationstats"
        );
    }

    #[test]
    fn test_add_url_rule_rejects_duplicate_endpoint() {
        let mut blueprint = Blueprint::new("administration", "/administration");
        blueprint.add_url_rule("/records", "records").unwrap();
        let err = blueprint.add_url_rule("/records-2", "records").unwrap_err();
        assert!(err.to_string().contains("administration.records"));
    }

    #[test]
    fn test_add_url_rule_rejects_duplicate_route() {
        let mut blueprint = Blueprint::new("administration", "/administration");
        blueprint.add_url_rule("/records", "records").unwrap();
        let err = blueprint
            .add_url_rule("/administration/records", "records_again")
            .unwrap_err();
        match err {
            AdminError::DuplicateView { view, conflict } => {
                assert_eq!(view, "records_again");
                assert!(conflict.contains("/administration/records"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_add_url_rule_rejects_renamed_parameter() {
        let mut blueprint = Blueprint::new("administration", "/administration");
        blueprint.add_url_rule("/items/{pid_value}", "items").unwrap();
        let err = blueprint.add_url_rule("/items/{id}", "items-by-id").unwrap_err();
        match err {
            AdminError::DuplicateView { view, conflict } => {
                assert_eq!(view, "items-by-id");
                assert!(conflict.contains("/administration/items/{pid_value}"));
            }
            other => panic!("unexpected error: {other}"),
        }
        blueprint.add_url_rule("/items/new", "items-new").unwrap();
        blueprint.add_url_rule("/items/{pid_value}/files", "files").unwrap();
    }

    #[test]
    fn test_static_route_reserved() {
        let mut blueprint = Blueprint::new("administration", "/administration")
            .static_folder(Some(PathBuf::from("static")));
        for (rule, endpoint) in [("/static", "static"), ("/static/app.css", "css")] {
            let err = blueprint.add_url_rule(rule, endpoint).unwrap_err();
            assert!(err.to_string().contains("reserved for static files"), "{err}");
        }
        blueprint.add_url_rule("/statistics", "statistics").unwrap();

        let mut no_static = Blueprint::new("administration", "/administration");
        no_static.add_url_rule("/static", "static").unwrap();
    }

    #[test]
    fn test_route_shape() {
        assert_eq!(route_shape("/a/{id}/b"), "/a/{}/b");
        assert_eq!(route_shape("/a/{*rest}"), "/a/{*}");
        assert_eq!(route_shape("/a/b"), "/a/b");
    }

    #[test]
    fn test_folders() {
        let blueprint = Blueprint::new("administration", "/administration")
            .static_folder(Some(PathBuf::from("static")));
        assert_eq!(blueprint.template_folder(), "templates");
        assert_eq!(blueprint.static_folder_path(), Some(&PathBuf::from("static")));
        assert_eq!(blueprint.static_route(), "/administration/static");
        assert_eq!(blueprint.name(), "administration");
    }
}
