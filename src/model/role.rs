use strum_macros::{Display, EnumString};

/// Login role tag stored on the employee row (`login_role` column).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl Role {
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_tags_round_trip() {
        assert_eq!(Role::from_tag("admin"), Some(Role::Admin));
        assert_eq!(Role::from_tag("hr"), Some(Role::Hr));
        assert_eq!(Role::from_tag("employee"), Some(Role::Employee));
        assert_eq!(Role::from_tag("superuser"), None);
        assert_eq!(Role::Hr.to_string(), "hr");
    }
}
