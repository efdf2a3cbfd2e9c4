pub mod document;
pub mod entities;
pub mod numbering;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use document::{CommercialDocument, DocumentLine, DocumentTotals};
pub use entities::{Invoice, InvoiceChanges, NewInvoice, Quote};
pub use ports::InvoiceRepository;
pub use services::{InvoiceDraft, InvoiceService};
pub use value_objects::{DocumentKind, DocumentNumber, InvoiceNumber, InvoiceStatus, QuoteStatus};
