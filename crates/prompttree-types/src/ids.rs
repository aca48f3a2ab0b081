use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

record_id!(
    /// Server-assigned prompt identifier, unique within a tree
    PromptId
);

record_id!(
    /// Server-assigned node identifier, unique within its prompt
    NodeId
);

record_id!(
    /// Server-assigned note identifier
    NoteId
);

impl PromptId {
    /// Path id used by `POST /prompts/{id}` to request creation
    pub const CREATE: PromptId = PromptId(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&PromptId::new(42)).unwrap();
        assert_eq!(json, "42");

        let id: NodeId = serde_json::from_str("7").unwrap();
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn test_create_sentinel_is_zero() {
        assert_eq!(PromptId::CREATE.to_string(), "0");
    }
}
