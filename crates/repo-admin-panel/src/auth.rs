//! Access control for administration views.
//!
//! Authentication is the host's job: a host middleware inserts an
//! [`Identity`] into the request extensions. Every admin handler calls the
//! configured [`Authorizer`] before the view runs.

use std::collections::HashSet;

use repo_admin_core::{AdminError, AdminResult};

/// An authenticated user and the roles they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The user identifier.
    pub id: String,
    /// Role names held by the user.
    pub roles: HashSet<String>,
}

impl Identity {
    /// Creates an identity with no roles.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: HashSet::new(),
        }
    }

    /// Adds a role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Returns whether the identity holds `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// Decides whether a request may reach an admin view.
pub trait Authorizer: Send + Sync {
    /// Returns `Ok(())` if access is granted.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when there is no identity, `PermissionDenied` when the
    /// identity is not allowed.
    fn authorize(&self, identity: Option<&Identity>) -> AdminResult<()>;
}

/// Grants access to identities holding a single fixed role.
///
/// # Examples
///
/// ```
/// use repo_admin_panel::auth::{Authorizer, Identity, RoleRequired};
///
/// let check = RoleRequired::new("admin");
/// assert!(check.authorize(Some(&Identity::new("1").with_role("admin"))).is_ok());
/// assert!(check.authorize(Some(&Identity::new("2"))).is_err());
/// assert!(check.authorize(None).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RoleRequired {
    role: String,
}

impl RoleRequired {
    /// Creates a check requiring `role`.
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }

    /// Returns the required role.
    pub fn role(&self) -> &str {
        &self.role
    }
}

impl Authorizer for RoleRequired {
    fn authorize(&self, identity: Option<&Identity>) -> AdminResult<()> {
        let Some(identity) = identity else {
            return Err(AdminError::Unauthorized(
                "Authentication required".to_string(),
            ));
        };
        if identity.has_role(&self.role) {
            Ok(())
        } else {
            Err(AdminError::PermissionDenied(format!(
                "Role '{}' required",
                self.role
            )))
        }
    }
}
