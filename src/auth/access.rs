//! Ownership capability check shared by every mutating route.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Access::Allow
    }
}

/// Only the owner of a resource may modify it.
pub fn check_owner(owner_id: i64, requester_id: i64) -> Access {
    if owner_id == requester_id {
        Access::Allow
    } else {
        Access::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_allowed() {
        assert_eq!(check_owner(99, 99), Access::Allow);
        assert!(check_owner(99, 99).is_allowed());
    }

    #[test]
    fn anyone_else_is_denied() {
        assert_eq!(check_owner(99, 11), Access::Deny);
        assert!(!check_owner(11, 99).is_allowed());
    }
}
