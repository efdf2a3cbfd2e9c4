pub mod clock;
pub mod errors;
pub mod ids;
pub mod pagination;

pub use clock::Clock;
pub use errors::{
  AuthFailure, ConflictReason, DomainError, EntityKind, RepositoryError, ValidationError,
};
pub use ids::{ClientId, InvoiceId, LineId, QuoteId, UserId};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest};
