//! Strongly-typed ID wrappers for projects, their rows, and cost records
//!
//! Cost records reference a project by `ProjectId`; the newtypes keep an
//! order id from being passed where a project id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form used in terminal output, e.g. `prj-550e8400`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Check whether `text` names this ID, either as the full UUID or
            /// as a (possibly prefixed) leading fragment of at least 4 chars.
            pub fn matches(&self, text: &str) -> bool {
                let text = text.trim();
                let text = text.strip_prefix($display_prefix).unwrap_or(text);
                if text.len() < 4 {
                    return false;
                }
                let full = self.0.to_string();
                full.starts_with(text) || self.0.simple().to_string().starts_with(text)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ProjectId, "prj-");
define_id!(LineItemId, "itm-");
define_id!(PaymentId, "pay-");
define_id!(OrderId, "ord-");
define_id!(LaborId, "lab-");
define_id!(ExpenseId, "exp-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = ProjectId::new();
        let display = id.to_string();
        assert!(display.starts_with("prj-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_equality() {
        let id1 = OrderId::new();
        let id2 = id1;
        assert_eq!(id1, id2);
        assert_ne!(id1, OrderId::new());
    }

    #[test]
    fn test_id_serialization() {
        let id = ExpenseId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let plain: ProjectId = uuid_str.parse().unwrap();
        let prefixed: ProjectId = format!("prj-{}", uuid_str).parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_matches_short_form() {
        let id: LineItemId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert!(id.matches("itm-550e8400"));
        assert!(id.matches("550e84"));
        assert!(id.matches(&id.to_string()));
        assert!(!id.matches("550"));
        assert!(!id.matches("itm-deadbeef"));
    }
}
