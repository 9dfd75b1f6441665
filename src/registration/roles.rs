/// Supplies the role granted to freshly registered users.
pub trait RoleProvider: Send + Sync {
    fn default_role(&self) -> String;
}

pub struct StaticRoles;

impl RoleProvider for StaticRoles {
    fn default_role(&self) -> String {
        "ROLE_USER".to_string()
    }
}
