//! Invoice use cases

mod change_invoice_status;
mod create_invoice;
mod delete_invoice;
mod get_invoice_details;
mod list_invoices;
mod update_invoice;

pub use change_invoice_status::{
  ChangeInvoiceStatusCommand, ChangeInvoiceStatusResponse, ChangeInvoiceStatusUseCase,
};
pub use create_invoice::{
  CreateInvoiceCommand, CreateInvoiceResponse, CreateInvoiceUseCase, InvoiceLineInput,
};
pub use delete_invoice::{DeleteInvoiceCommand, DeleteInvoiceUseCase};
pub use get_invoice_details::{
  GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, InvoiceDetailsResponse, InvoiceDto,
  InvoiceLineDto,
};
pub use list_invoices::{
  InvoiceListItemDto, ListInvoicesCommand, ListInvoicesResponse, ListInvoicesUseCase,
};
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceResponse, UpdateInvoiceUseCase};
