/// Actor driving like mutations and suggestion personalisation
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Authenticated user or anonymous visitor
///
/// Only presence/absence and the identifier matter to the player: an
/// anonymous identity cannot mutate likes and gets unpersonalised suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(UserId),
}

impl Identity {
    pub fn authenticated(user_id: UserId) -> Self {
        Self::Authenticated(user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The user ID, if authenticated
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Authenticated(id) => Some(id),
            Self::Anonymous => None,
        }
    }
}

impl From<Option<UserId>> for Identity {
    fn from(user_id: Option<UserId>) -> Self {
        user_id.map_or(Self::Anonymous, Self::Authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_anonymous() {
        let identity = Identity::default();
        assert!(!identity.is_authenticated());
        assert!(identity.user_id().is_none());
    }

    #[test]
    fn from_optional_user() {
        let identity = Identity::from(Some(UserId::new("u1")));
        assert_eq!(identity.user_id().map(UserId::as_str), Some("u1"));
        assert_eq!(Identity::from(None), Identity::Anonymous);
    }
}
