use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::errors::ValidationError;

// Identifiers are UUIDs wrapped per entity so they cannot be mixed up.
// They render and parse as plain strings at the edges.
macro_rules! entity_id {
  ($(#[$meta:meta])* $name:ident, $field:literal) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(Uuid);

    impl $name {
      /// Creates a new random identifier
      pub fn new() -> Self {
        Self(Uuid::new_v4())
      }

      pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
      }

      pub fn as_uuid(&self) -> &Uuid {
        &self.0
      }

      pub fn into_inner(self) -> Uuid {
        self.0
      }
    }

    impl Default for $name {
      fn default() -> Self {
        Self::new()
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
      }
    }

    impl FromStr for $name {
      type Err = ValidationError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
          .map(Self)
          .map_err(|_| ValidationError::InvalidField {
            field: $field.to_string(),
          })
      }
    }

    impl From<Uuid> for $name {
      fn from(uuid: Uuid) -> Self {
        Self(uuid)
      }
    }

    impl From<$name> for Uuid {
      fn from(id: $name) -> Self {
        id.0
      }
    }
  };
}

entity_id!(
  /// Identifier of a registered user
  UserId,
  "user_id"
);
entity_id!(
  /// Identifier of a client owned by a user
  ClientId,
  "client_id"
);
entity_id!(
  /// Identifier of an invoice
  InvoiceId,
  "invoice_id"
);
entity_id!(QuoteId, "quote_id");
entity_id!(
  /// Identifier of a single line inside a commercial document
  LineId,
  "line_id"
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_id_string_round_trip() {
    let id = ClientId::new();
    let parsed: ClientId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
  }

  #[test]
  fn test_invalid_id_names_the_field() {
    let err = "client-1".parse::<InvoiceId>().unwrap_err();
    assert_eq!(
      err,
      ValidationError::InvalidField {
        field: "invoice_id".to_string()
      }
    );
  }

  #[test]
  fn test_ids_are_unique() {
    assert_ne!(UserId::new(), UserId::new());
  }
}
