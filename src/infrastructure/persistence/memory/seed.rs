//! Demo data: one account with five clients and two invoices

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::database::Tables;
use crate::domain::auth::{BankDetails, Email, PasswordHash, User, UserProfile};
use crate::domain::client::{Client, NewClient};
use crate::domain::common::{ClientId, InvoiceId, UserId};
use crate::domain::invoice::{
  DocumentKind, DocumentLine, Invoice, InvoiceNumber, NewInvoice,
};

pub const USER_EMAIL: &str = "test@factureo.com";
pub const USER_PASSWORD: &str = "Test1234!";

pub const USER_ID: UserId = UserId::from_uuid(Uuid::from_u128(0x1));

pub const CLIENT_JEAN_ID: ClientId = ClientId::from_uuid(Uuid::from_u128(0x101));
pub const CLIENT_MARIE_ID: ClientId = ClientId::from_uuid(Uuid::from_u128(0x102));
pub const CLIENT_PIERRE_ID: ClientId = ClientId::from_uuid(Uuid::from_u128(0x103));
pub const CLIENT_SOPHIE_ID: ClientId = ClientId::from_uuid(Uuid::from_u128(0x104));
pub const CLIENT_THOMAS_ID: ClientId = ClientId::from_uuid(Uuid::from_u128(0x105));

/// FAC-2024-001, paid
pub const INVOICE_PAID_ID: InvoiceId = InvoiceId::from_uuid(Uuid::from_u128(0x201));
/// FAC-2024-002, sent
pub const INVOICE_SENT_ID: InvoiceId = InvoiceId::from_uuid(Uuid::from_u128(0x202));

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, d).expect("seed dates are valid")
}

fn midnight(year: i32, month: u32, d: u32) -> DateTime<Utc> {
  Utc.from_utc_datetime(&day(year, month, d).and_hms_opt(0, 0, 0).unwrap_or_default())
}

fn user() -> User {
  let mut user = User::new(
    Email::new(USER_EMAIL).expect("seed email is valid"),
    PasswordHash::from_hash(format!("hashed_{USER_PASSWORD}")),
    UserProfile {
      first_name: "Heritsilavina".to_string(),
      last_name: "RAZAFIARISON".to_string(),
      phone: "+261 34 12 345 67".to_string(),
      company_name: "Moocies".to_string(),
      address: "Madagascar".to_string(),
      bank: Some(BankDetails {
        bank_name: Some("BNP Paribas".to_string()),
        iban: Some("FR76 1234 5678 9012 3456 7890 123".to_string()),
        swift: Some("BNPAFRPPXXX".to_string()),
      }),
    },
    midnight(2024, 1, 1),
  );
  user.id = USER_ID;
  user
}

fn client(
  id: ClientId,
  first_name: &str,
  last_name: &str,
  email: &str,
  phone: &str,
  address: &str,
  created: DateTime<Utc>,
) -> Client {
  let mut client = Client::new(
    USER_ID,
    NewClient {
      first_name: first_name.to_string(),
      last_name: last_name.to_string(),
      email: email.to_string(),
      phone: phone.to_string(),
      address: address.to_string(),
      siret: None,
    },
    created,
  )
  .expect("seed client is valid");
  client.id = id;
  client
}

fn clients() -> Vec<Client> {
  vec![
    client(
      CLIENT_JEAN_ID,
      "Jean",
      "Dupont",
      "jean.dupont@entreprise.fr",
      "+33 6 12 34 56 78",
      "15 Rue de Paris, 75001 Paris",
      midnight(2024, 1, 15),
    ),
    client(
      CLIENT_MARIE_ID,
      "Marie",
      "Martin",
      "marie.martin@agence.fr",
      "+33 6 98 76 54 32",
      "42 Avenue de Lyon, 69000 Lyon",
      midnight(2024, 1, 20),
    ),
    client(
      CLIENT_PIERRE_ID,
      "Pierre",
      "Bernard",
      "p.bernard@techcorp.com",
      "+33 7 45 67 89 01",
      "8 Boulevard des Champs, 33000 Bordeaux",
      midnight(2024, 2, 1),
    ),
    client(
      CLIENT_SOPHIE_ID,
      "Sophie",
      "Dubois",
      "sophie.dubois@solutions.fr",
      "+33 6 23 45 67 89",
      "33 Rue du Commerce, 44000 Nantes",
      midnight(2024, 2, 10),
    ),
    client(
      CLIENT_THOMAS_ID,
      "Thomas",
      "Petit",
      "thomas.petit@startup.io",
      "+33 7 89 01 23 45",
      "127 Avenue de la République, 13000 Marseille",
      midnight(2024, 2, 15),
    ),
  ]
}

fn invoices() -> Vec<Invoice> {
  let mut paid = Invoice::new(
    NewInvoice {
      user_id: USER_ID,
      client_id: CLIENT_JEAN_ID,
      number: InvoiceNumber::new(DocumentKind::Invoice, 2024, 1),
      issue_date: day(2024, 2, 1),
      due_date: day(2024, 3, 1),
      lines: vec![DocumentLine::new(
        "Développement site web",
        dec!(1),
        dec!(5000),
        dec!(20),
      )],
    },
    midnight(2024, 2, 1),
  )
  .expect("seed invoice is valid");
  paid.id = INVOICE_PAID_ID;
  paid
    .mark_paid(midnight(2024, 2, 25))
    .expect("draft can be paid");

  let mut sent = Invoice::new(
    NewInvoice {
      user_id: USER_ID,
      client_id: CLIENT_MARIE_ID,
      number: InvoiceNumber::new(DocumentKind::Invoice, 2024, 2),
      issue_date: day(2024, 2, 10),
      due_date: day(2024, 3, 10),
      lines: vec![DocumentLine::new(
        "Consultation SEO",
        dec!(5),
        dec!(150),
        dec!(20),
      )],
    },
    midnight(2024, 2, 10),
  )
  .expect("seed invoice is valid");
  sent.id = INVOICE_SENT_ID;
  sent
    .mark_sent(midnight(2024, 2, 10))
    .expect("draft can be sent");

  vec![paid, sent]
}

pub(crate) fn tables() -> Tables {
  let user = user();
  Tables {
    users: [(user.id, user)].into_iter().collect(),
    clients: clients().into_iter().map(|c| (c.id, c)).collect(),
    invoices: invoices().into_iter().map(|i| (i.id, i)).collect(),
  }
}
