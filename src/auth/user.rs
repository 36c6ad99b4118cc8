use oso::PolarClass;
use serde::{Deserialize, Serialize};

/// Role claim that grants the admin dashboard. Exposed to the policy as `ADMIN_ROLE`.
pub const ADMIN_ROLE: &str = "admin";

/// An identity established by logging in. Roles are claims taken from the credentials file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub display_name: String,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(username: &str, display_name: &str, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: String) -> bool {
        self.roles.iter().any(|x| x == &role)
    }
}

impl PolarClass for User {
    fn get_polar_class_builder() -> oso::ClassBuilder<User> {
        oso::Class::builder()
            .name("User")
            .add_attribute_getter("username", |recv: &User| recv.username.clone())
            .add_attribute_getter("roles", |recv: &User| recv.roles.clone())
            .add_method("has_role", User::has_role)
    }

    fn get_polar_class() -> oso::Class {
        let builder = User::get_polar_class_builder();
        builder.build()
    }
}

/// Login state of a request: a live session, a session that was presented but is no longer
/// valid, or no session at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated(User),
    Rejected,
    Anonymous,
}
