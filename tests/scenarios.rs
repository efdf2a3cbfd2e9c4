use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;

use factureo::application::auth::{LoginUserCommand, RegisterUserCommand};
use factureo::application::client::{
  CreateClientCommand, DeleteClientCommand, GetClientCommand, UpdateClientCommand,
};
use factureo::application::invoice::{
  ChangeInvoiceStatusCommand, CreateInvoiceCommand, DeleteInvoiceCommand,
  GetInvoiceDetailsCommand, InvoiceLineInput, ListInvoicesCommand, UpdateInvoiceCommand,
};
use factureo::domain::common::{
  AuthFailure, ClientId, ConflictReason, DomainError, EntityKind, UserId, ValidationError,
};
use factureo::infrastructure::AppContainer;
use factureo::infrastructure::clock::FixedClock;
use factureo::infrastructure::config::Config;
use factureo::infrastructure::persistence::memory::seed;

fn container(seeded: bool) -> AppContainer {
  let mut config = Config::default();
  config.data.seed_demo_data = seeded;
  AppContainer::with_clock(&config, Arc::new(FixedClock::ymd(2024, 3, 15))).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn line(quantity: rust_decimal::Decimal, unit_price: rust_decimal::Decimal) -> InvoiceLineInput {
  InvoiceLineInput {
    description: "Prestation".to_string(),
    quantity,
    unit_price,
    tax_rate: dec!(20),
  }
}

fn jean(user_id: UserId) -> CreateClientCommand {
  CreateClientCommand {
    user_id,
    first_name: "Jean".to_string(),
    last_name: "Dupont".to_string(),
    email: "jean@x.com".to_string(),
    phone: "0600000000".to_string(),
    address: "Paris".to_string(),
    siret: None,
  }
}

async fn register(app: &AppContainer, email: &str) -> UserId {
  app
    .register_user
    .execute(RegisterUserCommand {
      email: email.to_string(),
      password: "Secret12!".to_string(),
      first_name: "Claire".to_string(),
      last_name: "Fontaine".to_string(),
      phone: "0611223344".to_string(),
      company_name: "Fontaine Conseil".to_string(),
      address: "Lille".to_string(),
      bank: None,
    })
    .await
    .unwrap()
    .user
    .id
}

fn invoice_for(user_id: UserId, client_id: ClientId, issue: NaiveDate) -> CreateInvoiceCommand {
  CreateInvoiceCommand {
    user_id,
    client_id,
    issue_date: issue,
    due_date: issue + chrono::Duration::days(30),
    lines: vec![line(dec!(2), dec!(500)), line(dec!(1), dec!(300))],
  }
}

#[tokio::test]
async fn test_create_client_jean_dupont() {
  let app = container(false);
  let user_id = register(&app, "claire@fontaine.fr").await;

  let created = app.create_client.execute(jean(user_id)).await.unwrap().client;
  assert_eq!(created.full_name, "Jean Dupont");

  let fetched = app
    .get_client
    .execute(GetClientCommand {
      client_id: created.id,
    })
    .await
    .unwrap()
    .client;
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_invoice_totals_and_numbering_for_new_user() {
  let app = container(false);
  let user_id = register(&app, "claire@fontaine.fr").await;
  let client_id = app.create_client.execute(jean(user_id)).await.unwrap().client.id;

  let first = app
    .create_invoice
    .execute(invoice_for(user_id, client_id, date(2024, 1, 5)))
    .await
    .unwrap()
    .invoice;
  let second = app
    .create_invoice
    .execute(invoice_for(user_id, client_id, date(2024, 2, 5)))
    .await
    .unwrap()
    .invoice;

  assert_eq!(first.number, "FAC-2024-001");
  assert_eq!(second.number, "FAC-2024-002");
  assert_eq!(first.status, "OVERDUE");
  assert_eq!(first.total_ht, dec!(1300));
  assert_eq!(first.total_tva, dec!(260));
  assert_eq!(first.total_ttc, dec!(1560));

  // A new year restarts the sequence
  let next_year = app
    .create_invoice
    .execute(invoice_for(user_id, client_id, date(2025, 1, 2)))
    .await
    .unwrap()
    .invoice;
  assert_eq!(next_year.number, "FAC-2025-001");
}

#[tokio::test]
async fn test_wrong_password_is_indistinguishable_from_unknown_email() {
  let app = container(true);

  let wrong_password = app
    .login_user
    .execute(LoginUserCommand {
      email: "test@factureo.com".to_string(),
      password: "WrongPass1!".to_string(),
    })
    .await
    .unwrap_err();
  let unknown_email = app
    .login_user
    .execute(LoginUserCommand {
      email: "ghost@factureo.com".to_string(),
      password: "WrongPass1!".to_string(),
    })
    .await
    .unwrap_err();

  assert!(matches!(
    wrong_password,
    DomainError::Auth(AuthFailure::InvalidCredentials)
  ));
  assert_eq!(wrong_password.code(), unknown_email.code());

  let ok = app
    .login_user
    .execute(LoginUserCommand {
      email: seed::USER_EMAIL.to_string(),
      password: seed::USER_PASSWORD.to_string(),
    })
    .await
    .unwrap();
  assert_eq!(ok.user.id, seed::USER_ID);
}

#[tokio::test]
async fn test_client_deletion_guard() {
  let app = container(true);

  let err = app
    .delete_client
    .execute(DeleteClientCommand {
      client_id: seed::CLIENT_MARIE_ID,
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    DomainError::Conflict(ConflictReason::ClientHasInvoices)
  ));

  app
    .delete_client
    .execute(DeleteClientCommand {
      client_id: seed::CLIENT_PIERRE_ID,
    })
    .await
    .unwrap();

  let err = app
    .delete_client
    .execute(DeleteClientCommand {
      client_id: seed::CLIENT_PIERRE_ID,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, DomainError::NotFound(EntityKind::Client)));
}

#[tokio::test]
async fn test_client_deletable_once_its_invoices_are_gone() {
  let app = container(true);
  let invoice = app
    .create_invoice
    .execute(invoice_for(seed::USER_ID, seed::CLIENT_THOMAS_ID, date(2024, 3, 1)))
    .await
    .unwrap()
    .invoice;

  assert!(
    app
      .delete_client
      .execute(DeleteClientCommand {
        client_id: seed::CLIENT_THOMAS_ID,
      })
      .await
      .is_err()
  );

  app
    .delete_invoice
    .execute(DeleteInvoiceCommand {
      invoice_id: invoice.id,
    })
    .await
    .unwrap();
  app
    .delete_client
    .execute(DeleteClientCommand {
      client_id: seed::CLIENT_THOMAS_ID,
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_paid_invoice_guards() {
  let app = container(true);

  let err = app
    .delete_invoice
    .execute(DeleteInvoiceCommand {
      invoice_id: seed::INVOICE_PAID_ID,
    })
    .await
    .unwrap_err();
  assert_eq!(err.code(), "invoice_paid");

  let err = app
    .update_invoice
    .execute(UpdateInvoiceCommand {
      invoice_id: seed::INVOICE_PAID_ID,
      due_date: Some(date(2024, 6, 1)),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert_eq!(err.code(), "invoice_paid");

  // Restating PAID is the one accepted edit
  let unchanged = app
    .update_invoice
    .execute(UpdateInvoiceCommand {
      invoice_id: seed::INVOICE_PAID_ID,
      status: Some("PAID".to_string()),
      ..Default::default()
    })
    .await
    .unwrap()
    .invoice;
  assert_eq!(unchanged.status, "PAID");
  assert_eq!(unchanged.total_ttc, dec!(6000));

  let err = app
    .change_invoice_status
    .execute(ChangeInvoiceStatusCommand {
      invoice_id: seed::INVOICE_PAID_ID,
      new_status: "CANCELLED".to_string(),
    })
    .await
    .unwrap_err();
  assert_eq!(err.code(), "invoice_paid");

  // Generic update cannot move a paid invoice elsewhere either
  let err = app
    .update_invoice
    .execute(UpdateInvoiceCommand {
      invoice_id: seed::INVOICE_PAID_ID,
      status: Some("SENT".to_string()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert_eq!(err.code(), "invoice_paid");

  let reverted = app
    .change_invoice_status
    .execute(ChangeInvoiceStatusCommand {
      invoice_id: seed::INVOICE_PAID_ID,
      new_status: "SENT".to_string(),
    })
    .await
    .unwrap()
    .invoice;
  // Due 2024-03-01, the clock says 2024-03-15
  assert_eq!(reverted.status, "OVERDUE");
  assert!(reverted.paid_at.is_none());
}

#[tokio::test]
async fn test_date_order_wins_over_line_errors() {
  let app = container(true);

  let mut command = invoice_for(seed::USER_ID, seed::CLIENT_JEAN_ID, date(2024, 3, 1));
  command.due_date = date(2024, 3, 1);
  command.lines = vec![line(dec!(0), dec!(-5))];

  let err = app.create_invoice.execute(command).await.unwrap_err();
  assert!(matches!(
    err,
    DomainError::Validation(ValidationError::DateOrder)
  ));

  let mut command = invoice_for(seed::USER_ID, seed::CLIENT_JEAN_ID, date(2024, 3, 1));
  command.lines = vec![];
  let err = app.create_invoice.execute(command).await.unwrap_err();
  assert_eq!(err.code(), "no_lines");

  let listed = app
    .list_invoices
    .execute(ListInvoicesCommand {
      user_id: seed::USER_ID,
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(listed.invoices.total_items, 2);
}

#[tokio::test]
async fn test_invoice_listing_filters() {
  let app = container(true);

  let overdue = app
    .list_invoices
    .execute(ListInvoicesCommand {
      user_id: seed::USER_ID,
      overdue_only: true,
      ..Default::default()
    })
    .await
    .unwrap()
    .invoices;
  // FAC-2024-002 was due 2024-03-10
  assert_eq!(overdue.total_items, 1);
  assert_eq!(overdue.items[0].number, "FAC-2024-002");
  assert_eq!(overdue.items[0].client_name, "Marie Martin");
  assert_eq!(overdue.items[0].status, "OVERDUE");

  let by_client_name = app
    .list_invoices
    .execute(ListInvoicesCommand {
      user_id: seed::USER_ID,
      query: Some("jean".to_string()),
      ..Default::default()
    })
    .await
    .unwrap()
    .invoices;
  assert_eq!(by_client_name.total_items, 1);
  assert_eq!(by_client_name.items[0].number, "FAC-2024-001");

  let by_client_id = app
    .list_invoices
    .execute(ListInvoicesCommand {
      user_id: seed::USER_ID,
      client_id: Some(seed::CLIENT_MARIE_ID),
      ..Default::default()
    })
    .await
    .unwrap()
    .invoices;
  assert_eq!(by_client_id.total_items, 1);
  assert_eq!(by_client_id.items[0].total_ttc, dec!(900));
}

#[tokio::test]
async fn test_invoice_details_include_client() {
  let app = container(true);

  let details = app
    .get_invoice_details
    .execute(GetInvoiceDetailsCommand {
      invoice_id: seed::INVOICE_PAID_ID,
    })
    .await
    .unwrap();

  assert_eq!(details.invoice.number, "FAC-2024-001");
  assert_eq!(details.invoice.lines.len(), 1);
  assert_eq!(details.invoice.lines[0].amount_tva, dec!(1000));
  assert!(details.invoice.paid_at.is_some());
  assert_eq!(details.client.full_name, "Jean Dupont");
}

#[tokio::test]
async fn test_update_client_revalidates_email() {
  let app = container(true);

  let err = app
    .update_client
    .execute(UpdateClientCommand {
      client_id: seed::CLIENT_SOPHIE_ID,
      email: Some("sophie.at.solutions.fr".to_string()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert_eq!(err.code(), "invalid_format");

  let updated = app
    .update_client
    .execute(UpdateClientCommand {
      client_id: seed::CLIENT_SOPHIE_ID,
      phone: Some("+33 6 00 00 00 00".to_string()),
      ..Default::default()
    })
    .await
    .unwrap()
    .client;
  assert_eq!(updated.phone, "+33 6 00 00 00 00");
  assert_eq!(updated.email, "sophie.dubois@solutions.fr");
}

#[tokio::test]
async fn test_update_client_rejects_blank_names() {
  let app = container(true);

  for (first_name, last_name, field) in [
    (Some("   ".to_string()), None, "first_name"),
    (None, Some(String::new()), "last_name"),
  ] {
    let err = app
      .update_client
      .execute(UpdateClientCommand {
        client_id: seed::CLIENT_PIERRE_ID,
        first_name,
        last_name,
        ..Default::default()
      })
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      DomainError::Validation(ValidationError::MissingField { field: f }) if f == field
    ));
  }

  let client = app
    .get_client
    .execute(GetClientCommand {
      client_id: seed::CLIENT_PIERRE_ID,
    })
    .await
    .unwrap()
    .client;
  assert_eq!(client.full_name, "Pierre Bernard");
}

#[tokio::test]
async fn test_oversized_amounts_are_rejected_before_any_write() {
  let app = container(true);

  let mut command = invoice_for(seed::USER_ID, seed::CLIENT_JEAN_ID, date(2024, 3, 1));
  command.lines = vec![line(dec!(2), rust_decimal::Decimal::MAX)];
  let err = app.create_invoice.execute(command).await.unwrap_err();
  assert!(matches!(
    err,
    DomainError::Validation(ValidationError::Amount { line: 1 })
  ));
  assert_eq!(err.code(), "amount");

  let err = app
    .update_invoice
    .execute(UpdateInvoiceCommand {
      invoice_id: seed::INVOICE_SENT_ID,
      lines: Some(vec![line(dec!(1), dec!(10)), line(dec!(3), rust_decimal::Decimal::MAX)]),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert_eq!(err.code(), "amount");

  let listed = app
    .list_invoices
    .execute(ListInvoicesCommand {
      user_id: seed::USER_ID,
      client_id: Some(seed::CLIENT_MARIE_ID),
      ..Default::default()
    })
    .await
    .unwrap()
    .invoices;
  assert_eq!(listed.total_items, 1);
  assert_eq!(listed.items[0].total_ttc, dec!(900));

  // the failed creation did not consume a number
  let created = app
    .create_invoice
    .execute(invoice_for(seed::USER_ID, seed::CLIENT_JEAN_ID, date(2024, 3, 1)))
    .await
    .unwrap()
    .invoice;
  assert_eq!(created.number, "FAC-2024-003");
}

#[tokio::test]
async fn test_draft_cannot_be_requested_explicitly() {
  let app = container(true);
  let err = app
    .change_invoice_status
    .execute(ChangeInvoiceStatusCommand {
      invoice_id: seed::INVOICE_SENT_ID,
      new_status: "DRAFT".to_string(),
    })
    .await
    .unwrap_err();
  assert_eq!(err.code(), "invalid_status_transition");
}

#[tokio::test]
async fn test_reset_restores_seed() {
  let app = container(true);
  app
    .delete_client
    .execute(DeleteClientCommand {
      client_id: seed::CLIENT_SOPHIE_ID,
    })
    .await
    .unwrap();

  app.database.reset().await;

  let client = app
    .get_client
    .execute(GetClientCommand {
      client_id: seed::CLIENT_SOPHIE_ID,
    })
    .await
    .unwrap()
    .client;
  assert_eq!(client.full_name, "Sophie Dubois");
}
