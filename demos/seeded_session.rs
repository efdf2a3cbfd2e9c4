//! Walks the seeded account through a client and invoice lifecycle.
//!
//! Run with `cargo run --example seeded_session`. Set `RUST_LOG=factureo=info`
//! to quiet the service logs.

use anyhow::Context;
use chrono::{Datelike, Duration};
use rust_decimal_macros::dec;

use factureo::application::auth::LoginUserCommand;
use factureo::application::client::{CreateClientCommand, ListClientsCommand};
use factureo::application::invoice::{
  ChangeInvoiceStatusCommand, CreateInvoiceCommand, InvoiceLineInput, ListInvoicesCommand,
};
use factureo::infrastructure::AppContainer;
use factureo::infrastructure::config::Config;
use factureo::infrastructure::persistence::memory::seed;
use factureo::infrastructure::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  let mut config = Config::load().context("Failed to load configuration")?;
  init_tracing(&config.logging.filter);
  config.data.seed_demo_data = true;

  let app = AppContainer::build(&config).context("Failed to wire the application")?;

  let session = app
    .login_user
    .execute(LoginUserCommand {
      email: seed::USER_EMAIL.to_string(),
      password: seed::USER_PASSWORD.to_string(),
    })
    .await?;
  let user_id = session.user.id;
  println!("Signed in as {} ({})", session.user.full_name, session.user.company_name);

  let client = app
    .create_client
    .execute(CreateClientCommand {
      user_id,
      first_name: "Jean".to_string(),
      last_name: "Dupont".to_string(),
      email: "jean@x.com".to_string(),
      phone: "0600000000".to_string(),
      address: "Paris".to_string(),
      siret: None,
    })
    .await?
    .client;
  println!("Created client {}", client.full_name);

  let clients = app
    .list_clients
    .execute(ListClientsCommand {
      user_id,
      ..Default::default()
    })
    .await?
    .clients;
  println!(
    "{} clients, page {}/{}",
    clients.total_items, clients.page, clients.total_pages
  );

  let today = chrono::Utc::now().date_naive();
  let invoice = app
    .create_invoice
    .execute(CreateInvoiceCommand {
      user_id,
      client_id: client.id,
      issue_date: today,
      due_date: today + Duration::days(30),
      lines: vec![
        InvoiceLineInput {
          description: "Conseil".to_string(),
          quantity: dec!(2),
          unit_price: dec!(500),
          tax_rate: dec!(20),
        },
        InvoiceLineInput {
          description: "Formation".to_string(),
          quantity: dec!(1),
          unit_price: dec!(300),
          tax_rate: dec!(20),
        },
      ],
    })
    .await?
    .invoice;
  println!(
    "Issued {} for {}: HT {:.2} / TVA {:.2} / TTC {:.2}",
    invoice.number, today.year(), invoice.total_ht, invoice.total_tva, invoice.total_ttc
  );

  for status in ["SENT", "PAID"] {
    let changed = app
      .change_invoice_status
      .execute(ChangeInvoiceStatusCommand {
        invoice_id: invoice.id,
        new_status: status.to_string(),
      })
      .await?
      .invoice;
    println!("{} is now {}", changed.number, changed.status);
  }

  let listing = app
    .list_invoices
    .execute(ListInvoicesCommand {
      user_id,
      ..Default::default()
    })
    .await?
    .invoices;
  for item in &listing.items {
    println!(
      "  {}  {:<16} {:>10.2}  {}",
      item.number, item.client_name, item.total_ttc, item.status
    );
  }

  Ok(())
}
